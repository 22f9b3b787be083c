use crate::traits::{ByteStream, RemoteStorage, RetrievalError, RetrievalResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::fs;

/// Remote share reachable through an OS-level mount point.
///
/// The share (e.g. an SMB export mounted by the operating system) appears as
/// a local directory tree; fetching a document is a validated read under that
/// root. Network failures surface as IO errors from the mount and map to
/// [`RetrievalError::Backend`].
#[derive(Clone)]
pub struct MountedShareStorage {
    root: PathBuf,
}

impl MountedShareStorage {
    /// Create a backend over an existing mount point.
    ///
    /// # Arguments
    /// * `root` - Directory where the remote share is mounted
    ///   (e.g. "/mnt/taxdata")
    pub async fn new(root: impl Into<PathBuf>) -> RetrievalResult<Self> {
        let root = root.into();

        let metadata = fs::metadata(&root).await.map_err(|e| {
            RetrievalError::Config(format!(
                "Share mount point {} is not accessible: {}",
                root.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(RetrievalError::Config(format!(
                "Share mount point {} is not a directory",
                root.display()
            )));
        }

        Ok(MountedShareStorage { root })
    }

    /// Resolve a logical (parent, filename) pair to a path under the mount
    /// root, rejecting components that could escape it.
    fn entry_path(&self, parent_path: &str, filename: &str) -> RetrievalResult<PathBuf> {
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return Err(RetrievalError::InvalidPath(format!(
                "Filename '{}' contains invalid characters",
                filename
            )));
        }

        if parent_path.starts_with('/') || parent_path.split('/').any(|part| part == "..") {
            return Err(RetrievalError::InvalidPath(format!(
                "Parent path '{}' resolves outside the share",
                parent_path
            )));
        }

        let mut path = self.root.clone();
        if !parent_path.is_empty() {
            path.push(parent_path);
        }
        path.push(filename);
        Ok(path)
    }
}

#[async_trait]
impl RemoteStorage for MountedShareStorage {
    async fn fetch(&self, parent_path: &str, filename: &str) -> RetrievalResult<ByteStream> {
        let path = self.entry_path(parent_path, filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(RetrievalError::NotFound(format!(
                "{}/{}",
                parent_path, filename
            )));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            RetrievalError::Backend(format!("Failed to open {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            parent = %parent_path,
            filename = %filename,
            "Serving document from mounted share"
        );

        let reader = tokio_util::io::ReaderStream::new(file);
        let stream = reader.map(|result| {
            result.map_err(|e| RetrievalError::Backend(format!("Failed to read chunk: {}", e)))
        });

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk.unwrap());
        }
        data
    }

    #[tokio::test]
    async fn fetch_streams_file_contents() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("2024")).unwrap();
        std::fs::write(dir.path().join("2024/invoice.pdf"), b"pdf bytes").unwrap();

        let storage = MountedShareStorage::new(dir.path()).await.unwrap();
        let stream = storage.fetch("2024", "invoice.pdf").await.unwrap();

        assert_eq!(collect(stream).await, b"pdf bytes");
    }

    #[tokio::test]
    async fn fetch_from_share_root_with_empty_parent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("statement.pdf"), b"root doc").unwrap();

        let storage = MountedShareStorage::new(dir.path()).await.unwrap();
        let stream = storage.fetch("", "statement.pdf").await.unwrap();

        assert_eq!(collect(stream).await, b"root doc");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = MountedShareStorage::new(dir.path()).await.unwrap();

        let result = storage.fetch("2024", "absent.pdf").await;
        assert!(matches!(result, Err(RetrievalError::NotFound(_))));
    }

    #[tokio::test]
    async fn path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = MountedShareStorage::new(dir.path()).await.unwrap();

        let result = storage.fetch("../outside", "secret.txt").await;
        assert!(matches!(result, Err(RetrievalError::InvalidPath(_))));

        let result = storage.fetch("/etc", "passwd").await;
        assert!(matches!(result, Err(RetrievalError::InvalidPath(_))));

        let result = storage.fetch("2024", "../escape.pdf").await;
        assert!(matches!(result, Err(RetrievalError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn missing_mount_point_is_config_error() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("never-mounted");

        let result = MountedShareStorage::new(gone).await;
        assert!(matches!(result, Err(RetrievalError::Config(_))));
    }
}
