//! Error types shared across the taxi workspace

use thiserror::Error;

/// Result type alias for taxi operations
pub type Result<T> = std::result::Result<T, TaxiError>;

/// Errors that are not specific to a single feature
#[derive(Error, Debug)]
pub enum TaxiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
