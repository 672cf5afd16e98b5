use std::io;

use thiserror::Error;

/// Common result type for pipeline operations
pub type BoxResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Error types for Tocsmith operations
#[derive(Debug, Error)]
pub enum TocsmithError {
    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Layout template error
    #[error("Template error: {0}")]
    Template(String),
    /// Generic error message
    #[error("{0}")]
    Generic(String),
}

impl From<String> for TocsmithError {
    fn from(msg: String) -> Self {
        TocsmithError::Generic(msg)
    }
}

impl From<&str> for TocsmithError {
    fn from(msg: &str) -> Self {
        TocsmithError::Generic(msg.to_string())
    }
}
