//! The operation dispatcher

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use pixelsmith_ops::{ImageBuffer, Operation, OperationExecutor, OperationParams, RasterExecutor};
use pixelsmith_sessions::{SessionId, SessionRegistry};
use pixelsmith_storage::{FsStore, PersistenceSink, StorageResult};

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// A successfully applied and persisted edit
#[derive(Debug, Clone)]
pub struct StoredEdit {
    /// Session the edit belongs to
    pub id: SessionId,
    /// Where the current buffer was persisted
    pub location: PathBuf,
}

/// Routes edit requests through validation, execution, the session registry,
/// and the persistence sink.
///
/// Ordering inside a request is fixed: the in-memory commit happens before the
/// durability write, and a write failure never rolls the commit back; the
/// session is marked dirty instead. Executor work runs outside any session
/// lock; only the commit itself enters the identifier's critical section.
pub struct EditEngine {
    registry: SessionRegistry,
    executor: Arc<dyn OperationExecutor>,
    sink: Arc<dyn PersistenceSink>,
}

impl EditEngine {
    /// Wire an engine from its three collaborators
    pub fn new(
        config: EngineConfig,
        executor: Arc<dyn OperationExecutor>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Self {
        EditEngine {
            registry: SessionRegistry::new(config.registry),
            executor,
            sink,
        }
    }

    /// Convenience constructor: built-in raster executor plus a filesystem
    /// sink rooted at the configured storage directory
    pub fn with_local_store(config: EngineConfig) -> StorageResult<Self> {
        let sink = FsStore::new(config.storage_root.clone())?;
        Ok(Self::new(config, Arc::new(RasterExecutor::new()), Arc::new(sink)))
    }

    /// Apply one edit to an identifier.
    ///
    /// The base buffer is the session's current state or, on the identifier's
    /// first operation, the original upload. Validation and execution failures
    /// leave the session untouched.
    pub async fn apply_operation(
        &self,
        id: &SessionId,
        kind: &str,
        params: OperationParams,
    ) -> EngineResult<StoredEdit> {
        let operation = Operation::parse(kind, params)?;

        let base = match self.registry.current(id).await {
            Some(buffer) => buffer,
            None => Arc::new(self.sink.fetch_initial(id.as_str()).await?),
        };

        let resolved = operation.resolve(base.width(), base.height())?;
        let produced = Arc::new(self.executor.execute(&resolved, &base)?);

        self.registry.commit(id, Arc::clone(&produced)).await;
        info!(id = %id, op = %operation.kind, "applied operation");

        self.persist(id, &produced).await
    }

    /// Step an identifier back one edit and persist the restored buffer
    pub async fn undo(&self, id: &SessionId) -> EngineResult<StoredEdit> {
        let restored = self.registry.undo(id).await?;
        info!(id = %id, "undid operation");
        self.persist(id, &restored).await
    }

    /// Step an identifier forward one edit and persist the restored buffer
    pub async fn redo(&self, id: &SessionId) -> EngineResult<StoredEdit> {
        let restored = self.registry.redo(id).await?;
        info!(id = %id, "redid operation");
        self.persist(id, &restored).await
    }

    /// The session registry behind this engine
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Drop sessions idle longer than the configured timeout
    pub fn evict_idle(&self) -> usize {
        self.registry.evict_idle()
    }

    /// Explicit teardown: drop every session
    pub fn shutdown(&self) {
        self.registry.shutdown();
    }

    async fn persist(&self, id: &SessionId, buffer: &ImageBuffer) -> EngineResult<StoredEdit> {
        match self.sink.store(id.as_str(), buffer).await {
            Ok(location) => {
                self.registry.set_dirty(id, false).await;
                Ok(StoredEdit {
                    id: id.clone(),
                    location,
                })
            }
            Err(err) => {
                // The commit stands; this session is now ahead of durable storage
                self.registry.set_dirty(id, true).await;
                warn!(id = %id, error = %err, "persistence failed after commit");
                Err(err.into())
            }
        }
    }
}
