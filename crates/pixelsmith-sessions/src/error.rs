//! Error types for edit sessions

use pixelsmith_history::HistoryError;
use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur against the session registry.
///
/// An unknown identifier and an empty stack are the same outcome on purpose:
/// callers asked for history that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Nothing left to undo for this identifier
    #[error("no actions to undo")]
    NoMoreUndos,

    /// Nothing left to redo for this identifier
    #[error("no actions to redo")]
    NoMoreRedos,
}

impl From<HistoryError> for SessionError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NoMoreUndos => SessionError::NoMoreUndos,
            HistoryError::NoMoreRedos => SessionError::NoMoreRedos,
        }
    }
}
