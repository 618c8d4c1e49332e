//! The persistence sink boundary and its filesystem implementation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use pixelsmith_ops::ImageBuffer;

use crate::error::{StorageError, StorageResult};

/// Durable read/write of image buffers, keyed by session identifier.
///
/// `store` overwrites whatever is at the identifier's derived location; there is
/// no file-level versioning. `fetch_initial` is only consulted for an
/// identifier's first operation.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Persist the current buffer for an identifier, returning its location
    async fn store(&self, id: &str, buffer: &ImageBuffer) -> StorageResult<PathBuf>;

    /// Load the original upload for an identifier
    async fn fetch_initial(&self, id: &str) -> StorageResult<ImageBuffer>;
}

/// Filesystem-backed sink.
///
/// One flat root directory: originals live at `upload_<id>.png`, processed
/// output at `processed_<id>.png`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| {
            StorageError::DirectoryCreationFailed {
                path: root.clone(),
                source,
            }
        })?;
        Ok(FsStore { root })
    }

    /// Location of the processed output for an identifier
    pub fn processed_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("processed_{}.png", id))
    }

    /// Location of the original upload for an identifier
    pub fn upload_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("upload_{}.png", id))
    }

    /// Store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Seed the original upload for an identifier.
    ///
    /// This is the upload layer's entry point; the engine itself only reads
    /// uploads via `fetch_initial`.
    pub async fn save_upload(&self, id: &str, buffer: &ImageBuffer) -> StorageResult<PathBuf> {
        let path = self.upload_path(id);
        write_buffer(id, buffer, &path).await?;
        Ok(path)
    }
}

#[async_trait]
impl PersistenceSink for FsStore {
    async fn store(&self, id: &str, buffer: &ImageBuffer) -> StorageResult<PathBuf> {
        let path = self.processed_path(id);
        write_buffer(id, buffer, &path).await?;
        debug!(id, path = %path.display(), "stored processed buffer");
        Ok(path)
    }

    async fn fetch_initial(&self, id: &str) -> StorageResult<ImageBuffer> {
        let path = self.upload_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound { id: id.to_string() });
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        ImageBuffer::from_bytes(&bytes).map_err(|e| StorageError::Decode {
            path,
            message: e.to_string(),
        })
    }
}

async fn write_buffer(id: &str, buffer: &ImageBuffer, path: &Path) -> StorageResult<()> {
    let bytes = buffer.encode_png().map_err(|e| StorageError::Encode {
        id: id.to_string(),
        message: e.to_string(),
    })?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
}
