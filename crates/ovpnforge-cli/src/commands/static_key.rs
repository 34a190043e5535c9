//! `static-key` command implementation.

use std::io::Write;

use ovpnforge_config::generate_static_key;

use crate::cli::StaticKeyArgs;
use crate::error::CliError;
use crate::pemio;

/// Generates a static key and writes it to the output file.
///
/// # Errors
///
/// Returns an error if key generation or file output fails.
pub fn run<W: Write>(out: &mut W, args: &StaticKeyArgs) -> Result<(), CliError> {
    let key = generate_static_key()?;

    pemio::write_file(&args.output, &key)?;

    writeln!(out, "Your new static key was written to: {:?}", args.output)?;

    Ok(())
}
