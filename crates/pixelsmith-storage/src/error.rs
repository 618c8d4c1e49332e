//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// No stored upload exists for the identifier
    #[error("no stored upload for '{id}'")]
    NotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// Directory creation failed
    #[error("directory creation failed for {path}: {source}")]
    DirectoryCreationFailed {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File read/write failed
    #[error("IO error on {path}: {source}")]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Stored payload could not be decoded into a buffer
    #[error("failed to decode image at {path}: {message}")]
    Decode {
        /// File that held the payload
        path: PathBuf,
        /// Decoder diagnostic
        message: String,
    },

    /// Buffer could not be encoded for storage
    #[error("failed to encode image for '{id}': {message}")]
    Encode {
        /// Identifier whose buffer was being written
        id: String,
        /// Encoder diagnostic
        message: String,
    },
}
