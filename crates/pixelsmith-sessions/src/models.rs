//! Session identity and state

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pixelsmith_history::Timeline;
use pixelsmith_ops::ImageBuffer;

use crate::error::SessionResult;

/// Opaque identifier for an image under edit.
///
/// Identifiers are generated tokens, never user-supplied filenames, so two
/// uploads can never collide on a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh unique identifier
    pub fn generate() -> Self {
        SessionId(uuid::Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// The per-identifier edit state: current buffer plus undo/redo history.
///
/// Buffers are shared immutably; the timeline holds `Arc`s, so history depth
/// costs pointers, not pixel copies.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    timeline: Timeline<Arc<ImageBuffer>>,
    dirty: bool,
    created_at: DateTime<Utc>,
    last_used: Instant,
}

impl Session {
    /// Create an empty session for an identifier
    pub fn new(id: SessionId, max_history: usize) -> Self {
        Session {
            id,
            timeline: Timeline::new(max_history),
            dirty: false,
            created_at: Utc::now(),
            last_used: Instant::now(),
        }
    }

    /// The identifier this session belongs to
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Record a new current buffer, pushing the old one into undo history
    pub fn commit(&mut self, buffer: Arc<ImageBuffer>) {
        self.timeline.commit(buffer);
        self.touch();
    }

    /// Step back one edit, returning the restored buffer
    pub fn undo(&mut self) -> SessionResult<Arc<ImageBuffer>> {
        let restored = self.timeline.undo()?;
        self.touch();
        Ok(restored)
    }

    /// Step forward one edit, returning the restored buffer
    pub fn redo(&mut self) -> SessionResult<Arc<ImageBuffer>> {
        let restored = self.timeline.redo()?;
        self.touch();
        Ok(restored)
    }

    /// The current buffer, if any commit has happened
    pub fn current(&self) -> Option<&Arc<ImageBuffer>> {
        self.timeline.current()
    }

    /// Number of edits that can be undone
    pub fn undo_depth(&self) -> usize {
        self.timeline.undo_depth()
    }

    /// Number of edits that can be redone
    pub fn redo_depth(&self) -> usize {
        self.timeline.redo_depth()
    }

    /// Whether the in-memory state is ahead of durable storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the commit/durability gap open or closed
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// How long since this session was last committed, undone or redone
    pub fn idle_for(&self) -> Duration {
        self.last_used.elapsed()
    }

    fn touch(&mut self) {
        self.last_used = Instant::now();
    }
}
