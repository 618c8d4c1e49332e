#![warn(missing_docs)]

//! Bounded undo/redo timeline for pixelsmith
//!
//! Provides the capped history stacks and the commit/undo/redo discipline used by
//! edit sessions. The container is generic; sessions store shared image buffers in it.

pub mod bounded;
pub mod error;
pub mod timeline;

// Re-export public API
pub use bounded::BoundedStack;
pub use error::{HistoryError, HistoryResult};
pub use timeline::Timeline;
