//! Dispatcher-boundary errors

use thiserror::Error;

use pixelsmith_ops::OpsError;
use pixelsmith_sessions::SessionError;
use pixelsmith_storage::StorageError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Every failure an edit request can surface.
///
/// All errors are caught at this boundary and turned into structured responses;
/// nothing propagates as a panic. An `Io` failure after a successful commit means
/// "applied in memory, not guaranteed durable"; the commit is never rolled back.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Requested kind is not a supported edit
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Geometry parameters do not describe a usable region or size
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Nothing to undo or redo for this identifier
    #[error(transparent)]
    NoHistory(#[from] SessionError),

    /// Executor rejected or failed the operation
    #[error("operation failed: {0}")]
    Execution(String),

    /// Persistence failed; in-memory state may be ahead of storage
    #[error("storage failure: {0}")]
    Io(StorageError),

    /// No original upload exists for the identifier
    #[error("no source image for '{0}'")]
    NotFound(String),
}

impl From<OpsError> for EngineError {
    fn from(err: OpsError) -> Self {
        match err {
            OpsError::InvalidOperation(kind) => EngineError::InvalidOperation(kind),
            OpsError::InvalidGeometry(message) => EngineError::InvalidGeometry(message),
            other => EngineError::Execution(other.to_string()),
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => EngineError::NotFound(id),
            other => EngineError::Io(other),
        }
    }
}
