pub mod attachment;
pub mod document;
pub mod download;

pub use attachment::AttachmentItem;
pub use document::{Document, DocumentType};
pub use download::DownloadState;
