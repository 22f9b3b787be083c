//! Remote storage abstraction trait
//!
//! This module defines the RemoteStorage trait that all remote document
//! backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Remote fetch errors
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Remote file not found: {0}")]
    NotFound(String),

    #[error("Authentication to remote store failed: {0}")]
    Auth(String),

    #[error("Remote backend error: {0}")]
    Backend(String),

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for remote storage operations
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Stream of payload chunks produced by a fetch.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, RetrievalError>> + Send>>;

/// Remote document store abstraction
///
/// The cache layer works against this trait so the transport (mounted share,
/// SMB client, HTTP gateway) stays swappable. Implementations decide their
/// own timeout behavior; callers impose none.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Fetch the raw bytes of `filename` under the logical directory
    /// `parent_path` (empty string for the share root).
    ///
    /// Fails with [`RetrievalError::NotFound`] when the document does not
    /// exist, [`RetrievalError::Auth`] when the store rejects the configured
    /// credentials, and [`RetrievalError::Backend`] for transport failures.
    async fn fetch(&self, parent_path: &str, filename: &str) -> RetrievalResult<ByteStream>;
}
