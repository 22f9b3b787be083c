use crate::{MountedShareStorage, RemoteStorage, RetrievalError, RetrievalResult};
use std::sync::Arc;
use taxdoc_core::Config;

/// Create the remote storage backend described by the configuration.
pub async fn create_remote_storage(config: &Config) -> RetrievalResult<Arc<dyn RemoteStorage>> {
    let mount = config.share_mount_path.clone().ok_or_else(|| {
        RetrievalError::Config("SHARE_MOUNT_PATH not configured".to_string())
    })?;

    let storage = MountedShareStorage::new(mount).await?;
    Ok(Arc::new(storage))
}
