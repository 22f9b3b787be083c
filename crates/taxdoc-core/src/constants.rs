//! Shared constants.

/// Directory name for the local document cache, created under the OS
/// temporary directory when `CACHE_ROOT` is not configured.
pub const DEFAULT_CACHE_DIR_NAME: &str = "taxdoc-cache";

/// Default retention window for the TTL sweep, in days.
pub const DEFAULT_RETENTION_DAYS: u64 = 7;
