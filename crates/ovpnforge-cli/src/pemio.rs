//! PEM decoding and file I/O helpers.
//!
//! The core crates exchange DER buffers; this module is the collaborator
//! layer that moves them in and out of PEM files on disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::CliError;

/// Reads a PEM file and returns the DER body of its first block.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains no PEM block.
pub fn read_pem_file(path: &Path) -> Result<Vec<u8>, CliError> {
    let buf = fs::read(path)?;
    let block = pem::parse(&buf)
        .map_err(|e| CliError::Pem(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "read PEM block");
    Ok(block.into_contents())
}

/// Reads a file verbatim.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    Ok(fs::read(path)?)
}

/// Writes a file verbatim.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_file(path: &Path, buf: &[u8]) -> Result<(), CliError> {
    fs::write(path, buf)?;
    debug!(path = %path.display(), bytes = buf.len(), "wrote file");
    Ok(())
}

/// Strips any directory components from a user-supplied base name.
#[must_use]
pub fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned())
}
