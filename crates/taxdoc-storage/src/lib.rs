//! Taxdoc Storage Library
//!
//! This crate provides the remote document store abstraction consumed by the
//! cache layer. It defines the `RemoteStorage` trait and a backend for shares
//! reachable through an OS-level mount point.
//!
//! # Fetch contract
//!
//! A document is addressed by its logical parent directory plus filename, as
//! split from the document's relative path. `fetch` returns a byte stream;
//! the caller owns buffering and persistence. No directory listing or other
//! contract is assumed of a backend.

pub mod factory;
pub mod mount;
pub mod traits;

// Re-export commonly used types
pub use factory::create_remote_storage;
pub use mount::MountedShareStorage;
pub use traits::{ByteStream, RemoteStorage, RetrievalError, RetrievalResult};
