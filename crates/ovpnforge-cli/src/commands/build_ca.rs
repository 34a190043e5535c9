//! `build-ca` command implementation.

use std::io::Write;
use std::path::Path;

use ovpnforge_pki::build_ca;

use crate::cli::BuildCaArgs;
use crate::error::CliError;
use crate::pemio;

/// Creates a self-signed CA certificate pair in the working directory.
///
/// # Errors
///
/// Returns an error if issuance or file output fails.
pub fn run<W: Write>(out: &mut W, args: &BuildCaArgs) -> Result<(), CliError> {
    let profile = args.subject.profile(&args.cn);
    let (cert, key) = build_ca(&profile)?;

    let basename = pemio::base_name(&args.basename);
    let cert_file = format!("{basename}.crt");
    let key_file = format!("{basename}.key");

    pemio::write_file(Path::new(&cert_file), cert.pem().as_bytes())?;
    pemio::write_file(Path::new(&key_file), key.pem().as_bytes())?;

    writeln!(out, "Your new CA certificate was successfully generated.")?;
    writeln!(out, "certificate: {cert_file:?}")?;
    writeln!(out, "private key: {key_file:?}")?;

    Ok(())
}
