//! `client-config` command implementation.

use std::io::Write;

use ovpnforge_config::{ClientOptions, client_config};
use ovpnforge_pki::{Certificate, PrivateKey};

use crate::cli::ClientConfigArgs;
use crate::error::CliError;
use crate::pemio;

/// Assembles and writes a client.ovpn with embedded key material.
///
/// # Errors
///
/// Returns an error if any input file cannot be read or parsed, or if the
/// output cannot be written.
pub fn run<W: Write>(out: &mut W, args: &ClientConfigArgs) -> Result<(), CliError> {
    let ca_der = pemio::read_pem_file(&args.ca_cert)?;
    let cert_der = pemio::read_pem_file(&args.cert)?;
    let key_der = pemio::read_pem_file(&args.key)?;
    let tls_key = pemio::read_file(&args.tls_crypt)?;

    let options = ClientOptions {
        remote: args.remote.clone(),
        port: args.port,
        proto: args.proto.clone(),
    };
    let config = client_config(&options);

    config.embed("ca", Certificate::from_der(&ca_der)?.pem().as_bytes())?;
    config.embed("cert", Certificate::from_der(&cert_der)?.pem().as_bytes())?;
    config.embed("key", PrivateKey::new(key_der).pem().as_bytes())?;

    config.embed("tls-crypt", &tls_key)?;

    pemio::write_file(&args.output, &config.render())?;

    writeln!(
        out,
        "Your new client configuration file was written to: {:?}",
        args.output
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use ovpnforge_pki::types::SubjectProfile;
    use ovpnforge_pki::{build_ca, build_client_certificate};

    #[test]
    fn client_config_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let profile = SubjectProfile::default();

        let (ca_cert, ca_key) = build_ca(&profile).expect("ca");
        let (cert, key) =
            build_client_certificate(ca_cert.der(), ca_key.der(), "laptop", &profile)
                .expect("leaf");

        let ca_path = dir.path().join("ca.crt");
        let cert_path = dir.path().join("client.crt");
        let key_path = dir.path().join("client.key");
        let tls_path = dir.path().join("key.tlsauth");
        let out_path = dir.path().join("client.ovpn");

        std::fs::write(&ca_path, ca_cert.pem()).expect("write ca");
        std::fs::write(&cert_path, cert.pem()).expect("write cert");
        std::fs::write(&key_path, key.pem()).expect("write key");
        std::fs::write(
            &tls_path,
            ovpnforge_config::generate_static_key().expect("static key"),
        )
        .expect("write tls key");

        let cli = Cli::parse_from([
            "ovpnforge",
            "client-config",
            "--remote",
            "vpn.example.com",
            "--port",
            "443",
            "-r",
            ca_path.to_str().expect("utf-8 path"),
            "-c",
            cert_path.to_str().expect("utf-8 path"),
            "-k",
            key_path.to_str().expect("utf-8 path"),
            "-t",
            tls_path.to_str().expect("utf-8 path"),
            "-o",
            out_path.to_str().expect("utf-8 path"),
        ]);

        let Commands::ClientConfig(args) = cli.command else {
            panic!("expected client-config command");
        };

        let mut sink = Vec::new();
        run(&mut sink, &args).expect("command succeeds");

        let output = std::fs::read_to_string(&out_path).expect("output exists");
        assert!(output.starts_with("client\n"));
        assert!(output.contains("remote \"vpn.example.com\" \"443\""));
        assert!(output.contains("<ca>\n-----BEGIN CERTIFICATE-----"));
        assert!(output.contains("</tls-crypt>"));
    }
}
