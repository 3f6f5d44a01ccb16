use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{decode_store, encode_store, VolunteerStore};
use crate::errors::ServiceError;
use crate::volunteer::Store;

/// JSON file-backed volunteer store.
///
/// Every `save` rewrites the whole file in place; there is no temp file or
/// rename, so a crash mid-write can leave a truncated document, which the
/// next `load` treats as empty.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Point the store at `path`, creating parent directories. The file itself
    /// is only written on the first `save`.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        ensure_parent(&file_path).await?;
        Ok(Arc::new(Self { file_path }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

async fn ensure_parent(path: &Path) -> Result<(), ServiceError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .await
            .map_err(|e| ServiceError::storage(format!("cannot create {}: {e}", parent.display()))),
        _ => Ok(()),
    }
}

#[async_trait]
impl VolunteerStore for JsonFileStore {
    async fn load(&self) -> Result<Store, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => decode_store(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "volunteer store file missing; using empty store");
                Ok(Store::default())
            }
            Err(e) => Err(ServiceError::storage(format!("read {}: {e}", self.file_path.display()))),
        }
    }

    async fn save(&self, store: &Store) -> Result<(), ServiceError> {
        let data = encode_store(store)?;
        ensure_parent(&self.file_path).await?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::storage(format!("write {}: {e}", self.file_path.display())))
    }
}
