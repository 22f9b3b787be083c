use std::fmt;

/// Per-document download state, owned by the download coordinator and read by
/// the presentation layer.
///
/// Transitions are strictly ordered: `Idle -> Downloading -> Ready | Failed`.
/// `Failed` is not sticky; a later request restarts the cycle. `Ready` is not
/// reset automatically, repeated opens are satisfied by the cache hit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    Downloading,
    Ready,
    Failed,
}

impl DownloadState {
    /// True while a fetch worker for this document is running.
    pub fn is_in_flight(self) -> bool {
        self == DownloadState::Downloading
    }

    /// True once a terminal notification has been delivered.
    pub fn is_terminal(self) -> bool {
        matches!(self, DownloadState::Ready | DownloadState::Failed)
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DownloadState::Idle => "idle",
            DownloadState::Downloading => "downloading",
            DownloadState::Ready => "ready",
            DownloadState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(DownloadState::default(), DownloadState::Idle);
    }

    #[test]
    fn terminal_and_in_flight_classification() {
        assert!(!DownloadState::Idle.is_terminal());
        assert!(!DownloadState::Downloading.is_terminal());
        assert!(DownloadState::Ready.is_terminal());
        assert!(DownloadState::Failed.is_terminal());

        assert!(DownloadState::Downloading.is_in_flight());
        assert!(!DownloadState::Ready.is_in_flight());
    }
}
