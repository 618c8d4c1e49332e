//! Error types for the timeline

use thiserror::Error;

/// Result type for timeline operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while navigating a timeline
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// No more undos available
    #[error("no actions to undo")]
    NoMoreUndos,

    /// No more redos available
    #[error("no actions to redo")]
    NoMoreRedos,
}
