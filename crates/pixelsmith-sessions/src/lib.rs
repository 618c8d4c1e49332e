//! Edit sessions for pixelsmith
//!
//! Each image under edit gets a session: the current buffer plus bounded undo and
//! redo stacks. The registry owns every session, gives each identifier its own
//! critical section, and evicts sessions that have gone idle.

pub mod config;
pub mod error;
pub mod models;
pub mod registry;

pub use config::{RegistryConfig, DEFAULT_MAX_HISTORY};
pub use error::{SessionError, SessionResult};
pub use models::{Session, SessionId};
pub use registry::SessionRegistry;
