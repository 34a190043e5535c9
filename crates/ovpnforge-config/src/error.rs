//! Configuration error types.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// A unique directive was already defined.
    #[error("directive already defined: {0}")]
    DuplicateKey(String),

    /// The named directive does not exist.
    #[error("directive does not exist: {0}")]
    KeyNotFound(String),

    /// A directive was given no usable value.
    #[error("directive has no value: {0}")]
    EmptyValue(String),

    /// The randomness source failed.
    #[error("randomness source failed: {0}")]
    Randomness(String),
}
