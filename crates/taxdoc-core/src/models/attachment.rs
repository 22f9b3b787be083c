use std::path::{Path, PathBuf};

use super::document::{Document, DocumentType};
use super::download::DownloadState;

/// A single entry in a form's attachment list.
///
/// Items are either local files picked by the user but not yet uploaded, or
/// documents that already live on the remote store. Only remote items carry a
/// download state; there is nothing to fetch for a pending upload.
///
/// The form view owns its attachment items for the lifetime of the form; they
/// are dropped when the form closes or the user removes the entry.
#[derive(Debug, Clone)]
pub enum AttachmentItem {
    PendingLocal {
        path: PathBuf,
        document_type: DocumentType,
    },
    Remote {
        document: Document,
        state: DownloadState,
    },
}

impl AttachmentItem {
    /// Wrap a local file chosen by the user, with its assigned type.
    pub fn pending_local(path: impl Into<PathBuf>, document_type: DocumentType) -> Self {
        AttachmentItem::PendingLocal {
            path: path.into(),
            document_type,
        }
    }

    /// Wrap an existing remote document; the download state starts `Idle`.
    pub fn remote(document: Document) -> Self {
        AttachmentItem::Remote {
            document,
            state: DownloadState::Idle,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        match self {
            AttachmentItem::PendingLocal { document_type, .. } => *document_type,
            AttachmentItem::Remote { document, .. } => document.document_type,
        }
    }

    /// Name shown in the attachment list: the filename without its directory.
    pub fn display_name(&self) -> &str {
        match self {
            AttachmentItem::PendingLocal { path, .. } => path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(""),
            AttachmentItem::Remote { document, .. } => document.filename(),
        }
    }

    pub fn is_pending_upload(&self) -> bool {
        matches!(self, AttachmentItem::PendingLocal { .. })
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            AttachmentItem::PendingLocal { path, .. } => Some(path),
            AttachmentItem::Remote { .. } => None,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            AttachmentItem::PendingLocal { .. } => None,
            AttachmentItem::Remote { document, .. } => Some(document),
        }
    }

    /// Download state for remote items; `None` for pending uploads.
    pub fn download_state(&self) -> Option<DownloadState> {
        match self {
            AttachmentItem::PendingLocal { .. } => None,
            AttachmentItem::Remote { state, .. } => Some(*state),
        }
    }

    /// Mirror the coordinator's state onto this item so the list view can
    /// render it. Ignored for pending uploads.
    pub fn set_download_state(&mut self, new_state: DownloadState) {
        if let AttachmentItem::Remote { state, .. } = self {
            *state = new_state;
        }
    }
}
