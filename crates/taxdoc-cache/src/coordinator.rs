use crate::error::CacheError;
use crate::store::CacheStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use taxdoc_core::{Document, DownloadState};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Outcome of a download request, decided synchronously on the caller's
/// thread.
pub enum RequestOutcome {
    /// The request was accepted; await the handle for the terminal result.
    Accepted(DownloadHandle),
    /// A fetch for this document is already running. No new work was started
    /// and no notification will follow; the original request's outcome covers
    /// this one.
    AlreadyInFlight,
}

impl RequestOutcome {
    pub fn is_deduplicated(&self) -> bool {
        matches!(self, RequestOutcome::AlreadyInFlight)
    }

    pub fn into_handle(self) -> Option<DownloadHandle> {
        match self {
            RequestOutcome::Accepted(handle) => Some(handle),
            RequestOutcome::AlreadyInFlight => None,
        }
    }
}

/// Completion handle for one accepted download request.
///
/// The fetch worker completes the handle exactly once, from its own task; the
/// consumer decides which execution context it resumes on.
pub struct DownloadHandle {
    document_id: Uuid,
    rx: oneshot::Receiver<Result<PathBuf, CacheError>>,
}

impl DownloadHandle {
    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    /// Wait for the terminal result: the local path on success, the error
    /// that moved the document to `Failed` otherwise.
    pub async fn wait(self) -> Result<PathBuf, CacheError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Internal(
                "download worker dropped without reporting a result".to_string(),
            )),
        }
    }
}

/// Orchestrates document downloads with a single-flight guarantee per
/// document id.
///
/// The `Idle -> Downloading` transition happens synchronously inside
/// [`request`](DownloadCoordinator::request), before any asynchronous work is
/// spawned. Two rapid requests (a double click) therefore cannot both observe
/// `Idle`: the second sees `Downloading` and is deduplicated. Single-flight
/// is what prevents duplicate remote fetches and duplicate writers for one
/// cache path.
///
/// States are keyed by document id rather than filename, so two documents
/// that happen to share a basename never share a state machine.
#[derive(Clone)]
pub struct DownloadCoordinator {
    store: Arc<CacheStore>,
    states: Arc<Mutex<HashMap<Uuid, DownloadState>>>,
}

impl DownloadCoordinator {
    pub fn new(store: Arc<CacheStore>) -> Self {
        DownloadCoordinator {
            store,
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Request the local copy of a document.
    ///
    /// Accepted from `Idle`, `Failed` (retry), and `Ready` (repeated opens
    /// complete through the store's hit check without remote I/O). A request
    /// while `Downloading` returns [`RequestOutcome::AlreadyInFlight`]
    /// without touching the remote store.
    pub fn request(&self, doc: &Document) -> RequestOutcome {
        {
            let mut states = self.states.lock().unwrap();
            let state = states.entry(doc.id).or_default();
            if state.is_in_flight() {
                tracing::debug!(document_id = %doc.id, "Download already in flight, deduplicating");
                return RequestOutcome::AlreadyInFlight;
            }
            *state = DownloadState::Downloading;
        }

        tracing::debug!(
            document_id = %doc.id,
            filename = %doc.filename(),
            "Download request accepted"
        );

        let (tx, rx) = oneshot::channel();
        let store = Arc::clone(&self.store);
        let states = Arc::clone(&self.states);
        let doc = doc.clone();
        let document_id = doc.id;

        tokio::spawn(async move {
            let result = store.resolve(&doc).await;

            let (next_state, payload) = match result {
                Ok(path) => (DownloadState::Ready, Ok(path)),
                Err(e) => {
                    tracing::warn!(
                        document_id = %doc.id,
                        filename = %doc.filename(),
                        error = %e,
                        "Download failed"
                    );
                    (DownloadState::Failed, Err(e))
                }
            };

            // Record the terminal state before completing the handle so an
            // observer woken by the notification reads the final state.
            {
                let mut states = states.lock().unwrap();
                states.insert(doc.id, next_state);
            }

            // The caller may have dropped its handle; the state above is
            // still the source of truth.
            let _ = tx.send(payload);
        });

        RequestOutcome::Accepted(DownloadHandle {
            document_id,
            rx,
        })
    }

    /// Current state of a document's download, `Idle` for unknown documents.
    /// Read-only view for the presentation layer.
    pub fn state(&self, document_id: Uuid) -> DownloadState {
        self.states
            .lock()
            .unwrap()
            .get(&document_id)
            .copied()
            .unwrap_or_default()
    }
}
