//! Error types for edit operations

use thiserror::Error;

/// Result type for edit operations
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur while parsing, validating or executing an operation
#[derive(Debug, Error)]
pub enum OpsError {
    /// Operation kind is not one of the supported edits
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Geometry parameters do not describe a usable region or size
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A parameter is present but malformed
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter key as supplied by the caller
        name: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// The operation cannot run on this pixel layout
    #[error("{operation} requires a color image, got {mode}")]
    UnsupportedColorMode {
        /// Operation that rejected the input
        operation: &'static str,
        /// Color mode of the rejected buffer
        mode: String,
    },

    /// Raster payload could not be decoded
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Raster payload could not be encoded
    #[error("image encode failed: {0}")]
    Encode(String),

    /// Executor failed while computing the new buffer
    #[error("operation failed: {0}")]
    ExecutionFailed(String),
}

impl OpsError {
    /// Create an InvalidParameter error with context
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
