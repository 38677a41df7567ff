//! Error types for Ambience.

use thiserror::Error;

/// Main error type for Ambience operations.
#[derive(Error, Debug)]
pub enum AmbienceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio device error: {0}")]
    AudioDevice(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Ambience operations.
pub type Result<T> = std::result::Result<T, AmbienceError>;
