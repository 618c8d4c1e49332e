//! The outward response contract

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatcher::StoredEdit;
use crate::error::EngineError;

/// Wire shape returned to the request-handling layer.
///
/// Success serializes as `{"success": true, "filepath": "..."}` and failure as
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditResponse {
    /// The edit was applied and persisted
    Success {
        /// Always true
        success: bool,
        /// Location of the persisted buffer
        filepath: String,
    },
    /// The edit failed; nothing was persisted by this request
    Failure {
        /// Human-readable failure message
        error: String,
    },
}

impl EditResponse {
    /// Build a success response for a persisted location
    pub fn success(location: &Path) -> Self {
        EditResponse::Success {
            success: true,
            filepath: location.display().to_string(),
        }
    }

    /// Build a failure response
    pub fn failure(message: impl Into<String>) -> Self {
        EditResponse::Failure {
            error: message.into(),
        }
    }

    /// Whether this is the success shape
    pub fn is_success(&self) -> bool {
        matches!(self, EditResponse::Success { .. })
    }
}

impl From<Result<StoredEdit, EngineError>> for EditResponse {
    fn from(result: Result<StoredEdit, EngineError>) -> Self {
        match result {
            Ok(edit) => EditResponse::success(&edit.location),
            Err(err) => EditResponse::failure(err.to_string()),
        }
    }
}
