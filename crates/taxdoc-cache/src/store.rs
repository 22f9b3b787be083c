use crate::error::{CacheError, StorageError};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taxdoc_core::Document;
use taxdoc_storage::RemoteStorage;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local smart cache over a remote document store.
///
/// An entry is a file at `cache_root/<filename>`; it is valid iff it exists
/// with non-zero size. The zero-size check guards against artifacts of a
/// crashed download ever being served as a hit. Entries are written to a
/// temporary file in the same directory and renamed into place, so a reader
/// never observes a partially written file at the canonical path.
#[derive(Clone)]
pub struct CacheStore {
    cache_root: PathBuf,
    remote: Arc<dyn RemoteStorage>,
}

impl CacheStore {
    /// Create a cache over `cache_root`, creating the directory if absent.
    ///
    /// A cache root that cannot be created is a fatal configuration error:
    /// no caching can happen without it.
    pub async fn new(
        cache_root: impl Into<PathBuf>,
        remote: Arc<dyn RemoteStorage>,
    ) -> Result<Self, CacheError> {
        let cache_root = cache_root.into();

        fs::create_dir_all(&cache_root).await.map_err(|e| {
            CacheError::Config(format!(
                "Failed to create cache directory {}: {}",
                cache_root.display(),
                e
            ))
        })?;

        Ok(CacheStore { cache_root, remote })
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Canonical local path for a document's cache entry.
    pub fn entry_path(&self, doc: &Document) -> PathBuf {
        self.cache_root.join(doc.filename())
    }

    async fn is_valid_entry(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(metadata) => metadata.is_file() && metadata.len() > 0,
            Err(_) => false,
        }
    }

    /// Resolve a document to a local file, fetching from the remote store
    /// only on a miss.
    ///
    /// On a miss the payload is streamed into a temporary file under the
    /// cache root and atomically renamed into place. Errors never remove a
    /// pre-existing valid entry.
    pub async fn resolve(&self, doc: &Document) -> Result<PathBuf, CacheError> {
        let path = self.entry_path(doc);

        if Self::is_valid_entry(&path).await {
            tracing::debug!(
                filename = %doc.filename(),
                path = %path.display(),
                "Cache hit"
            );
            return Ok(path);
        }

        let start = std::time::Instant::now();
        tracing::info!(
            document_id = %doc.id,
            filename = %doc.filename(),
            parent = %doc.parent_path(),
            "Cache miss, fetching from remote store"
        );

        let mut stream = self.remote.fetch(doc.parent_path(), doc.filename()).await?;

        let tmp = NamedTempFile::new_in(&self.cache_root).map_err(|e| StorageError::TempCreate {
            dir: self.cache_root.clone(),
            source: e,
        })?;
        let (file, temp_path) = tmp.into_parts();
        let mut file = fs::File::from_std(file);

        let mut size: u64 = 0;
        while let Some(chunk) = stream.next().await {
            // A failed chunk drops the temp file; the canonical path is untouched.
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(|e| StorageError::Write {
                path: temp_path.to_path_buf(),
                source: e,
            })?;
            size += chunk.len() as u64;
        }

        file.sync_all().await.map_err(|e| StorageError::Write {
            path: temp_path.to_path_buf(),
            source: e,
        })?;
        drop(file);

        temp_path.persist(&path).map_err(|e| StorageError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        tracing::info!(
            filename = %doc.filename(),
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document cached"
        );

        Ok(path)
    }
}
