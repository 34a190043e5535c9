//! CLI error types.

use std::fmt;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Certificate issuance or validation failed.
    Pki(ovpnforge_pki::Error),
    /// Configuration assembly failed.
    Config(ovpnforge_config::Error),
    /// A PEM file could not be decoded.
    Pem(String),
    /// Invalid argument.
    InvalidArgument(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pki(e) => write!(f, "pki error: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Pem(msg) => write!(f, "PEM error: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pki(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ovpnforge_pki::Error> for CliError {
    fn from(err: ovpnforge_pki::Error) -> Self {
        Self::Pki(err)
    }
}

impl From<ovpnforge_config::Error> for CliError {
    fn from(err: ovpnforge_config::Error) -> Self {
        Self::Config(err)
    }
}
