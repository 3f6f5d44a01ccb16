//! Storage abstractions for the volunteer document.
//!
//! Handlers never touch the file directly; they go through
//! [`VolunteerStore`], so the flat JSON file can later be swapped for an
//! embedded key-value store without changing the service contract.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::errors::ServiceError;
use crate::volunteer::Store;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Whole-document persistence for the volunteer [`Store`].
#[async_trait]
pub trait VolunteerStore: Send + Sync {
    /// Read the full document. Absent or unparseable content yields an empty store;
    /// a parseable document with a malformed record is an error.
    async fn load(&self) -> Result<Store, ServiceError>;
    /// Overwrite the full document.
    async fn save(&self, store: &Store) -> Result<(), ServiceError>;
}

/// Decode a persisted document.
///
/// Bytes that are not a JSON object yield an empty store. An object whose
/// records do not fit the volunteer schema is a storage error, so the next
/// write cannot clobber the records that are still good.
pub(crate) fn decode_store(bytes: &[u8]) -> Result<Store, ServiceError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Store::default());
    }
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "volunteer store content is not valid JSON; starting from an empty store");
            return Ok(Store::default());
        }
    };
    if !value.is_object() {
        warn!("volunteer store content is not a JSON object; starting from an empty store");
        return Ok(Store::default());
    }
    serde_json::from_value(value)
        .map_err(|e| ServiceError::storage(format!("volunteer document has an invalid record: {e}")))
}

/// Pretty-printed with two-space indentation.
pub(crate) fn encode_store(store: &Store) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec_pretty(store).map_err(ServiceError::storage)
}
