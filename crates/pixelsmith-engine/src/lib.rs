//! Edit dispatch for pixelsmith
//!
//! The engine is the single entry point for the backend's edit surface:
//! `apply_operation`, `undo` and `redo`. It resolves each request to an executor,
//! commits the result into the session registry, and persists the current buffer
//! through the sink, in that order. The commit/durability gap is tracked on
//! the session rather than rolled back.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod response;

pub use config::EngineConfig;
pub use dispatcher::{EditEngine, StoredEdit};
pub use error::{EngineError, EngineResult};
pub use response::EditResponse;

// The types callers hand to the engine
pub use pixelsmith_ops::{OperationParams, RasterExecutor};
pub use pixelsmith_sessions::SessionId;
