//! The session registry

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use pixelsmith_ops::ImageBuffer;

use crate::config::RegistryConfig;
use crate::error::{SessionError, SessionResult};
use crate::models::{Session, SessionId};

/// Owns every live edit session.
///
/// The identifier-to-session map is sharded, so distinct identifiers never
/// contend; all read-modify-write sequences for one identifier serialize on that
/// session's own mutex, whose FIFO acquisition is the only suspension point.
/// Sessions are created lazily on first commit and reaped by [`evict_idle`]
/// or [`shutdown`].
///
/// [`evict_idle`]: SessionRegistry::evict_idle
/// [`shutdown`]: SessionRegistry::shutdown
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
    config: RegistryConfig,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(config: RegistryConfig) -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
            config,
        }
    }

    /// The configuration this registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Record a new current buffer for an identifier.
    ///
    /// The session is created if this is the identifier's first commit; racing
    /// creators converge on a single session via the map's atomic entry.
    pub async fn commit(&self, id: &SessionId, buffer: Arc<ImageBuffer>) {
        let cell = self.session_cell(id);
        let mut session = cell.lock().await;
        session.commit(buffer);
        debug!(
            id = %id,
            undo_depth = session.undo_depth(),
            "committed new buffer"
        );
    }

    /// Step an identifier's session back one edit
    pub async fn undo(&self, id: &SessionId) -> SessionResult<Arc<ImageBuffer>> {
        let cell = match self.sessions.get(id) {
            Some(entry) => entry.value().clone(),
            None => return Err(SessionError::NoMoreUndos),
        };
        let mut session = cell.lock().await;
        session.undo()
    }

    /// Step an identifier's session forward one edit
    pub async fn redo(&self, id: &SessionId) -> SessionResult<Arc<ImageBuffer>> {
        let cell = match self.sessions.get(id) {
            Some(entry) => entry.value().clone(),
            None => return Err(SessionError::NoMoreRedos),
        };
        let mut session = cell.lock().await;
        session.redo()
    }

    /// Non-mutating read of an identifier's current buffer
    pub async fn current(&self, id: &SessionId) -> Option<Arc<ImageBuffer>> {
        let cell = self.sessions.get(id)?.value().clone();
        let session = cell.lock().await;
        session.current().cloned()
    }

    /// Flag or clear the commit/durability gap for an identifier
    pub async fn set_dirty(&self, id: &SessionId, dirty: bool) {
        if let Some(entry) = self.sessions.get(id) {
            let cell = entry.value().clone();
            drop(entry);
            let mut session = cell.lock().await;
            session.set_dirty(dirty);
        }
    }

    /// Whether an identifier's in-memory state is ahead of durable storage
    pub async fn is_dirty(&self, id: &SessionId) -> bool {
        match self.sessions.get(id) {
            Some(entry) => {
                let cell = entry.value().clone();
                drop(entry);
                let session = cell.lock().await;
                session.is_dirty()
            }
            None => false,
        }
    }

    /// Undo depth of an identifier's session, zero when absent
    pub async fn undo_depth(&self, id: &SessionId) -> usize {
        match self.sessions.get(id) {
            Some(entry) => {
                let cell = entry.value().clone();
                drop(entry);
                let session = cell.lock().await;
                session.undo_depth()
            }
            None => 0,
        }
    }

    /// Redo depth of an identifier's session, zero when absent
    pub async fn redo_depth(&self, id: &SessionId) -> usize {
        match self.sessions.get(id) {
            Some(entry) => {
                let cell = entry.value().clone();
                drop(entry);
                let session = cell.lock().await;
                session.redo_depth()
            }
            None => 0,
        }
    }

    /// Whether a session exists for the identifier
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle longer than the configured timeout, returning how
    /// many were evicted. Sessions currently inside a critical section are
    /// left alone.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_for(self.config.idle_timeout())
    }

    /// Drop sessions idle longer than `max_idle`
    pub fn evict_idle_for(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, cell| match cell.try_lock() {
            Ok(session) => session.idle_for() <= max_idle,
            Err(_) => true,
        });
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = self.sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    /// Drop every session. The registry is reusable afterwards; this is the
    /// explicit teardown for the owning service.
    pub fn shutdown(&self) {
        let dropped = self.sessions.len();
        self.sessions.clear();
        info!(dropped, "session registry shut down");
    }

    fn session_cell(&self, id: &SessionId) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(id = %id, "creating session");
                Arc::new(Mutex::new(Session::new(id.clone(), self.config.max_history)))
            })
            .value()
            .clone()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn buffer(tag: u8) -> Arc<ImageBuffer> {
        let img = RgbImage::from_pixel(2, 2, Rgb([tag, tag, tag]));
        Arc::new(ImageBuffer::new(DynamicImage::ImageRgb8(img)))
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(RegistryConfig::default())
    }

    #[tokio::test]
    async fn test_session_created_lazily_on_first_commit() {
        let registry = registry();
        let id = SessionId::from("a");
        assert!(!registry.contains(&id));
        assert!(registry.current(&id).await.is_none());

        registry.commit(&id, buffer(1)).await;
        assert!(registry.contains(&id));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_undo_without_session_is_no_history() {
        let registry = registry();
        let id = SessionId::from("missing");
        assert!(matches!(registry.undo(&id).await, Err(SessionError::NoMoreUndos)));
        assert!(matches!(registry.redo(&id).await, Err(SessionError::NoMoreRedos)));
    }

    #[tokio::test]
    async fn test_commit_undo_commit_walkthrough() {
        let registry = registry();
        let id = SessionId::from("a");
        let (img1, img2, img3, img4) = (buffer(1), buffer(2), buffer(3), buffer(4));

        registry.commit(&id, Arc::clone(&img1)).await;
        registry.commit(&id, Arc::clone(&img2)).await;
        registry.commit(&id, Arc::clone(&img3)).await;
        assert!(Arc::ptr_eq(&registry.current(&id).await.unwrap(), &img3));
        assert_eq!(registry.undo_depth(&id).await, 2);

        let restored = registry.undo(&id).await.unwrap();
        assert!(Arc::ptr_eq(&restored, &img2));
        assert_eq!(registry.undo_depth(&id).await, 1);
        assert_eq!(registry.redo_depth(&id).await, 1);

        registry.commit(&id, Arc::clone(&img4)).await;
        assert!(Arc::ptr_eq(&registry.current(&id).await.unwrap(), &img4));
        assert_eq!(registry.undo_depth(&id).await, 2);
        assert_eq!(registry.redo_depth(&id).await, 0);
    }

    #[tokio::test]
    async fn test_undo_then_redo_restores_exact_buffer() {
        let registry = registry();
        let id = SessionId::from("a");
        let (first, second) = (buffer(1), buffer(2));

        registry.commit(&id, Arc::clone(&first)).await;
        registry.commit(&id, Arc::clone(&second)).await;

        registry.undo(&id).await.unwrap();
        let replayed = registry.redo(&id).await.unwrap();
        assert!(Arc::ptr_eq(&replayed, &second));
    }

    #[tokio::test]
    async fn test_history_window_is_bounded() {
        let registry = SessionRegistry::new(RegistryConfig {
            max_history: 3,
            ..RegistryConfig::default()
        });
        let id = SessionId::from("a");

        for i in 0..6u8 {
            registry.commit(&id, buffer(i)).await;
        }
        assert_eq!(registry.undo_depth(&id).await, 3);

        for _ in 0..3 {
            registry.undo(&id).await.unwrap();
        }
        assert!(matches!(registry.undo(&id).await, Err(SessionError::NoMoreUndos)));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = registry();
        let (a, b) = (SessionId::from("a"), SessionId::from("b"));

        registry.commit(&a, buffer(1)).await;
        registry.commit(&a, buffer(2)).await;
        registry.commit(&b, buffer(3)).await;

        assert_eq!(registry.undo_depth(&a).await, 1);
        assert_eq!(registry.undo_depth(&b).await, 0);
        assert!(matches!(registry.undo(&b).await, Err(SessionError::NoMoreUndos)));
    }

    #[tokio::test]
    async fn test_failed_undo_leaves_state_unchanged() {
        let registry = registry();
        let id = SessionId::from("a");
        let only = buffer(1);
        registry.commit(&id, Arc::clone(&only)).await;

        assert!(matches!(registry.undo(&id).await, Err(SessionError::NoMoreUndos)));
        assert!(Arc::ptr_eq(&registry.current(&id).await.unwrap(), &only));
        assert_eq!(registry.redo_depth(&id).await, 0);
    }

    #[tokio::test]
    async fn test_evict_idle_reaps_only_stale_sessions() {
        let registry = registry();
        let id = SessionId::from("a");
        registry.commit(&id, buffer(1)).await;

        assert_eq!(registry.evict_idle_for(Duration::from_secs(3600)), 0);
        assert!(registry.contains(&id));

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(registry.evict_idle_for(Duration::ZERO), 1);
        assert!(!registry.contains(&id));
    }

    #[tokio::test]
    async fn test_shutdown_drops_everything() {
        let registry = registry();
        registry.commit(&SessionId::from("a"), buffer(1)).await;
        registry.commit(&SessionId::from("b"), buffer(2)).await;

        registry.shutdown();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_dirty_flag_tracks_persistence_gap() {
        let registry = registry();
        let id = SessionId::from("a");
        registry.commit(&id, buffer(1)).await;

        assert!(!registry.is_dirty(&id).await);
        registry.set_dirty(&id, true).await;
        assert!(registry.is_dirty(&id).await);
        registry.set_dirty(&id, false).await;
        assert!(!registry.is_dirty(&id).await);
    }
}
