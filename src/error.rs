//! Error types for contienda
//!
//! Training steps themselves are infallible: shape mismatches inside a step
//! are contract violations and surface as ndarray panics. Everything that
//! touches configuration, data loading or the filesystem returns [`Result`].

use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for contienda operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, loading or persisting a GAN.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Training data is unusable (e.g. no samples).
    #[error("Empty training data: {0}")]
    EmptyData(String),

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A checkpoint does not match the layer graph it is loaded into.
    #[error("Checkpoint mismatch: {0}")]
    StateMismatch(String),

    /// Sample file could not be parsed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: Error = ValidationError::InvalidBatchSize(0).into();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("batch size"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
