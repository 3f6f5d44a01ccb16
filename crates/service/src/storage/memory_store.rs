use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{decode_store, encode_store, VolunteerStore};
use crate::errors::ServiceError;
use crate::volunteer::Store;

/// In-memory volunteer store.
///
/// Keeps the encoded document rather than the struct so loads go through
/// the same decode path as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<Vec<u8>>>,
    writes: RwLock<u64>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed the store with raw document bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self { document: RwLock::new(Some(bytes.into())), writes: RwLock::new(0) })
    }

    /// Number of completed `save` calls.
    pub async fn write_count(&self) -> u64 {
        *self.writes.read().await
    }
}

#[async_trait]
impl VolunteerStore for MemoryStore {
    async fn load(&self) -> Result<Store, ServiceError> {
        let doc = self.document.read().await;
        Ok(doc.as_deref().map(decode_store).transpose()?.unwrap_or_default())
    }

    async fn save(&self, store: &Store) -> Result<(), ServiceError> {
        let data = encode_store(store)?;
        *self.document.write().await = Some(data);
        *self.writes.write().await += 1;
        Ok(())
    }
}
