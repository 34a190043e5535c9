//! PKI error types.

use thiserror::Error;

/// Result type for PKI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// PKI error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Key pair or serial number generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Certificate construction or signing failed.
    #[error("certificate signing failed: {0}")]
    Signing(String),

    /// Marshaling the issued certificate or key failed.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// The supplied CA certificate or private key could not be parsed.
    #[error("invalid CA material: {0}")]
    InvalidCa(String),

    /// Certificate parsing failed.
    #[error("certificate parsing failed: {0}")]
    Parse(String),

    /// Certificate validation failed.
    #[error("certificate validation failed: {0}")]
    Validation(String),

    /// Certificate has expired.
    #[error("certificate has expired")]
    Expired,

    /// Certificate not yet valid.
    #[error("certificate not yet valid")]
    NotYetValid,

    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    SignatureVerification(String),
}
