use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use taxdoc_core::{Config, JanitorPolicy};
use thiserror::Error;
use tokio::fs;
use tokio::time::{interval, MissedTickBehavior};

/// Interval between TTL sweeps after the startup sweep.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Failure to delete a single cache entry during a sweep.
///
/// Recovered where it occurs: logged, counted, and the sweep moves on to the
/// remaining entries. Never surfaced to callers.
#[derive(Debug, Error)]
#[error("Failed to delete cache entry {}: {source}", path.display())]
pub struct JanitorSweepError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Counters for one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub examined: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// True when an entry's age exceeds the retention window.
///
/// Entries with a modified time in the future (clock skew, copied files) are
/// kept.
fn is_expired(modified: SystemTime, now: SystemTime, retention: Duration) -> bool {
    now.duration_since(modified)
        .map(|age| age > retention)
        .unwrap_or(false)
}

/// Background reclamation of stale cache entries.
///
/// Runs entirely off the startup path: [`start`](CacheJanitor::start) spawns
/// the work and returns immediately. No failure inside a sweep ever escapes
/// the janitor task.
pub struct CacheJanitor {
    cache_root: PathBuf,
    policy: JanitorPolicy,
    retention: Duration,
}

impl CacheJanitor {
    pub fn new(cache_root: impl Into<PathBuf>, policy: JanitorPolicy, retention: Duration) -> Self {
        CacheJanitor {
            cache_root: cache_root.into(),
            policy,
            retention,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cache_root.clone(),
            config.janitor_policy,
            Duration::from_secs(config.retention_days * 24 * 60 * 60),
        )
    }

    /// Start the background reclamation task.
    ///
    /// Under `TtlSweep` the first sweep runs immediately, then hourly. Under
    /// `FullWipe` the cache is emptied once. Returns a JoinHandle for
    /// graceful shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            match self.policy {
                JanitorPolicy::FullWipe => {
                    let summary = self.wipe().await;
                    tracing::info!(
                        deleted = summary.deleted,
                        failed = summary.failed,
                        "Cache wipe completed"
                    );
                }
                JanitorPolicy::TtlSweep => {
                    let mut sweep_interval = interval(SWEEP_INTERVAL);
                    sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

                    loop {
                        sweep_interval.tick().await;
                        let summary = self.sweep().await;
                        tracing::info!(
                            examined = summary.examined,
                            deleted = summary.deleted,
                            failed = summary.failed,
                            "Cache sweep completed"
                        );
                    }
                }
            }
        })
    }

    /// Run the configured policy once.
    pub async fn run_once(&self) -> SweepSummary {
        match self.policy {
            JanitorPolicy::FullWipe => self.wipe().await,
            JanitorPolicy::TtlSweep => self.sweep().await,
        }
    }

    /// Delete entries older than the retention window.
    pub async fn sweep(&self) -> SweepSummary {
        self.sweep_at(SystemTime::now()).await
    }

    /// Sweep with an explicit notion of "now"; expiry is judged against it.
    async fn sweep_at(&self, now: SystemTime) -> SweepSummary {
        let cutoff = now.checked_sub(self.retention).unwrap_or(SystemTime::UNIX_EPOCH);
        tracing::debug!(
            cache_root = %self.cache_root.display(),
            cutoff = %chrono::DateTime::<chrono::Utc>::from(cutoff).to_rfc3339(),
            "Starting cache sweep"
        );

        let mut summary = SweepSummary::default();

        let mut entries = match fs::read_dir(&self.cache_root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    cache_root = %self.cache_root.display(),
                    "Cache sweep could not read cache directory"
                );
                return summary;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Cache sweep stopped while listing entries");
                    break;
                }
            };

            let path = entry.path();
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Skipping unreadable cache entry");
                    summary.failed += 1;
                    continue;
                }
            };

            // The cache is a flat directory of regular files; anything else
            // is not ours to delete.
            if !metadata.is_file() {
                continue;
            }
            summary.examined += 1;

            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Skipping entry without modified time");
                    summary.failed += 1;
                    continue;
                }
            };

            if !is_expired(modified, now, self.retention) {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Deleted expired cache entry");
                    summary.deleted += 1;
                }
                Err(e) => {
                    // The entry may be open in a viewer right now; leave it
                    // for the next sweep.
                    let err = JanitorSweepError { path, source: e };
                    tracing::warn!(error = %err, "Continuing sweep after delete failure");
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Delete everything under the cache root.
    pub async fn wipe(&self) -> SweepSummary {
        let mut summary = SweepSummary::default();

        let mut entries = match fs::read_dir(&self.cache_root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    cache_root = %self.cache_root.display(),
                    "Cache wipe could not read cache directory"
                );
                return summary;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Cache wipe stopped while listing entries");
                    break;
                }
            };

            let path = entry.path();
            summary.examined += 1;

            let removal = match entry.metadata().await {
                Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(&path).await,
                _ => fs::remove_file(&path).await,
            };

            match removal {
                Ok(()) => summary.deleted += 1,
                Err(e) => {
                    let err = JanitorSweepError { path, source: e };
                    tracing::warn!(error = %err, "Continuing wipe after delete failure");
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[test]
    fn retention_window_splits_entries_by_age() {
        let now = SystemTime::now();
        let retention = 7 * DAY;

        assert!(!is_expired(now - DAY, now, retention));
        assert!(is_expired(now - 8 * DAY, now, retention));
        assert!(is_expired(now - 10 * DAY, now, retention));
    }

    #[test]
    fn future_modified_time_is_not_expired() {
        let now = SystemTime::now();
        assert!(!is_expired(now + DAY, now, 7 * DAY));
    }

    #[tokio::test]
    async fn sweep_deletes_only_entries_past_retention() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("old.pdf"), b"stale").unwrap();
        std::fs::write(dir.path().join("older.pdf"), b"staler").unwrap();
        std::fs::create_dir(dir.path().join("not-ours")).unwrap();

        let janitor = CacheJanitor::new(dir.path(), JanitorPolicy::TtlSweep, 7 * DAY);

        // Judged from eight days in the future, the fresh files are expired.
        let summary = janitor.sweep_at(SystemTime::now() + 8 * DAY).await;
        assert_eq!(summary.examined, 2);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.failed, 0);
        assert!(!dir.path().join("old.pdf").exists());
        assert!(dir.path().join("not-ours").exists());
    }

    #[tokio::test]
    async fn sweep_keeps_entries_within_retention() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("recent.pdf"), b"warm").unwrap();

        let janitor = CacheJanitor::new(dir.path(), JanitorPolicy::TtlSweep, 7 * DAY);
        let summary = janitor.sweep().await;

        assert_eq!(summary.examined, 1);
        assert_eq!(summary.deleted, 0);
        assert!(dir.path().join("recent.pdf").exists());
    }

    #[tokio::test]
    async fn sweep_of_missing_cache_root_is_harmless() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("never-created");

        let janitor = CacheJanitor::new(gone, JanitorPolicy::TtlSweep, 7 * DAY);
        let summary = janitor.sweep().await;

        assert_eq!(summary, SweepSummary::default());
    }

    #[tokio::test]
    async fn wipe_empties_the_cache_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"a").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/c.pdf"), b"c").unwrap();

        let janitor = CacheJanitor::new(dir.path(), JanitorPolicy::FullWipe, 7 * DAY);
        let summary = janitor.run_once().await;

        assert_eq!(summary.deleted, 3);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
