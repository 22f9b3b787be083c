//! Configuration module
//!
//! Environment-driven configuration for the cache and storage layers.
//! Values are read once at startup via [`Config::from_env`]; validation
//! failures are fatal configuration errors, surfaced before any caching
//! starts.

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CACHE_DIR_NAME, DEFAULT_RETENTION_DAYS};

/// Reclamation policy applied to the local cache by the janitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JanitorPolicy {
    /// Delete only entries older than the retention window, on a background
    /// schedule. The default: a warm working set survives across sessions.
    TtlSweep,
    /// Delete every cache entry once at startup.
    FullWipe,
}

impl JanitorPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "ttl" | "ttl-sweep" => Some(JanitorPolicy::TtlSweep),
            "wipe" | "full-wipe" => Some(JanitorPolicy::FullWipe),
            _ => None,
        }
    }
}

/// Application configuration for the document cache subsystem.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding cached document copies. Created if absent.
    pub cache_root: PathBuf,
    pub janitor_policy: JanitorPolicy,
    /// Retention window in days for the TTL sweep.
    pub retention_days: u64,
    /// Mount point of the remote document share, when the mounted-share
    /// backend is in use.
    pub share_mount_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let cache_root = env::var("CACHE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_root());

        let janitor_policy = match env::var("CACHE_JANITOR_POLICY") {
            Ok(raw) => JanitorPolicy::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "CACHE_JANITOR_POLICY must be 'ttl' or 'wipe', got '{}'",
                    raw
                )
            })?,
            Err(_) => JanitorPolicy::TtlSweep,
        };

        let retention_days = env::var("CACHE_RETENTION_DAYS")
            .unwrap_or_else(|_| DEFAULT_RETENTION_DAYS.to_string())
            .parse::<u64>()
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        let share_mount_path = env::var("SHARE_MOUNT_PATH").ok().map(PathBuf::from);

        let config = Config {
            cache_root,
            janitor_policy,
            retention_days,
            share_mount_path,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cache_root.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CACHE_ROOT must not be empty"));
        }

        if self.janitor_policy == JanitorPolicy::TtlSweep && self.retention_days == 0 {
            return Err(anyhow::anyhow!(
                "CACHE_RETENTION_DAYS must be at least 1 when the TTL sweep policy is active"
            ));
        }

        Ok(())
    }
}

/// Default cache directory: a fixed subdirectory of the OS temporary area,
/// shared by every coordinator in the process.
pub fn default_cache_root() -> PathBuf {
    env::temp_dir().join(DEFAULT_CACHE_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parsing_accepts_known_spellings() {
        assert_eq!(JanitorPolicy::parse("ttl"), Some(JanitorPolicy::TtlSweep));
        assert_eq!(
            JanitorPolicy::parse("TTL-Sweep"),
            Some(JanitorPolicy::TtlSweep)
        );
        assert_eq!(JanitorPolicy::parse("wipe"), Some(JanitorPolicy::FullWipe));
        assert_eq!(
            JanitorPolicy::parse("full-wipe"),
            Some(JanitorPolicy::FullWipe)
        );
        assert_eq!(JanitorPolicy::parse("sometimes"), None);
    }

    #[test]
    fn default_cache_root_lives_under_temp_dir() {
        let root = default_cache_root();
        assert!(root.starts_with(env::temp_dir()));
        assert!(root.ends_with(DEFAULT_CACHE_DIR_NAME));
    }

    #[test]
    fn zero_retention_rejected_for_ttl_policy() {
        let config = Config {
            cache_root: default_cache_root(),
            janitor_policy: JanitorPolicy::TtlSweep,
            retention_days: 0,
            share_mount_path: None,
        };
        assert!(config.validate().is_err());

        let config = Config {
            janitor_policy: JanitorPolicy::FullWipe,
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
