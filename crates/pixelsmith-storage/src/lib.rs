//! Persistence sink for pixelsmith
//!
//! Durable storage of edit results under the `processed_<id>` naming convention,
//! plus retrieval of the original upload for an identifier's first operation.
//! History never touches disk; only the current buffer is persisted.

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{FsStore, PersistenceSink};
