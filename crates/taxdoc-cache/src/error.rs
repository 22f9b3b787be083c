use std::path::PathBuf;
use taxdoc_storage::RetrievalError;
use thiserror::Error;

/// Local disk failures while writing a cache entry.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create temporary file in {}: {source}", dir.display())]
    TempCreate {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache entry {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move cache entry into place at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced to a caller through the terminal download notification.
///
/// `Retrieval` and `Storage` are user-visible and never fatal to the process.
/// `Config` is raised once at startup when the cache directory cannot be
/// created at all.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}
