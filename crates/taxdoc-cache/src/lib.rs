//! Taxdoc Cache Library
//!
//! Smart cache and asynchronous retrieval layer sitting between a slow,
//! authenticated remote document store and a UI that must never block.
//!
//! Three pieces cooperate:
//!
//! - [`CacheStore`] maps a document to a local file, fetching through the
//!   remote store only on a miss and writing entries atomically.
//! - [`DownloadCoordinator`] guarantees at most one in-flight fetch per
//!   document and hands the caller a completion handle per accepted request.
//! - [`CacheJanitor`] reclaims stale entries in the background without
//!   interrupting use.
//!
//! The cache directory is flat: one file per document, named by its remote
//! basename. Presence plus non-zero size is the entire persisted contract;
//! there is no index file.

pub mod coordinator;
pub mod error;
pub mod janitor;
pub mod store;

// Re-export commonly used types
pub use coordinator::{DownloadCoordinator, DownloadHandle, RequestOutcome};
pub use error::{CacheError, StorageError};
pub use janitor::{CacheJanitor, JanitorSweepError, SweepSummary};
pub use store::CacheStore;
