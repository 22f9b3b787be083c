//! Taxdoc Core Library
//!
//! This crate provides the domain models, configuration, and telemetry setup
//! shared across the taxdoc components. The cache and storage layers build on
//! the types defined here.

pub mod config;
pub mod constants;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::{Config, JanitorPolicy};
pub use models::{AttachmentItem, Document, DocumentType, DownloadState};
