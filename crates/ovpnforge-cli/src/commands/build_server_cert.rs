//! `build-server-cert` command implementation.

use std::io::Write;
use std::path::Path;

use ovpnforge_pki::build_server_certificate;

use crate::cli::BuildServerCertArgs;
use crate::error::CliError;
use crate::pemio;

/// Creates and signs a server certificate against an existing CA.
///
/// # Errors
///
/// Returns an error if the CA material cannot be read or parsed, or if
/// issuance or file output fails.
pub fn run<W: Write>(out: &mut W, args: &BuildServerCertArgs) -> Result<(), CliError> {
    let ca_cert = pemio::read_pem_file(&args.ca_cert)?;
    let ca_key = pemio::read_pem_file(&args.ca_key)?;

    let profile = args.subject.profile(&args.name);
    let (cert, key) = build_server_certificate(&ca_cert, &ca_key, &args.name, &profile)?;

    let basename = pemio::base_name(&args.name);
    let cert_file = format!("{basename}.crt");
    let key_file = format!("{basename}.key");

    pemio::write_file(Path::new(&cert_file), cert.pem().as_bytes())?;
    pemio::write_file(Path::new(&key_file), key.pem().as_bytes())?;

    writeln!(out, "Your new server certificate was successfully generated.")?;
    writeln!(out, "certificate: {cert_file:?}")?;
    writeln!(out, "private key: {key_file:?}")?;

    Ok(())
}
