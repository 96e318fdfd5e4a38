//! Durable key-value storage
//!
//! Everything Roster persists between runs goes through [`KeyValueStore`]:
//! the Dataplex scope, the merged data-product list (with locally owned
//! contracts) and the TTL-guarded cache entries. Values are whole JSON
//! documents; every write replaces the previous document and the last
//! writer wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{RosterError, RosterResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Well-known store keys
pub mod keys {
    /// Dataplex project/location scope
    pub const DATAPLEX_CONFIG: &str = "dataplexConfig";

    /// Durable mirror of the last merged data-product list
    pub const DATA_PRODUCTS: &str = "dataProducts";

    /// TTL cache entry for the data-product list
    pub const DATA_PRODUCTS_CACHE: &str = "dataProductsCache";

    /// Prefix of per-component profile cache entries
    pub const PROFILE_CACHE_PREFIX: &str = "profileDataCache";

    /// Prefix of per-component lineage cache entries
    pub const LINEAGE_CACHE_PREFIX: &str = "lineageDataCache";

    /// Cache key for a component's profile report
    pub fn profile_cache_key(component_id: &str) -> String {
        format!("{PROFILE_CACHE_PREFIX}_{component_id}")
    }

    /// Cache key for a component's lineage report
    pub fn lineage_cache_key(component_id: &str) -> String {
        format!("{LINEAGE_CACHE_PREFIX}_{component_id}")
    }
}

/// Abstract key-value store
///
/// Implementations must treat `set` as a full replace and `remove` of a
/// missing key as success.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw document stored under `key`
    async fn get(&self, key: &str) -> RosterResult<Option<String>>;

    /// Replace the document stored under `key`
    async fn set(&self, key: &str, value: &str) -> RosterResult<()>;

    /// Remove `key` if present
    async fn remove(&self, key: &str) -> RosterResult<()>;

    /// List every stored key
    async fn keys(&self) -> RosterResult<Vec<String>>;

    /// Remove every key starting with `prefix`, returning how many were removed
    async fn delete_by_prefix(&self, prefix: &str) -> RosterResult<usize> {
        let mut removed = 0;
        for key in self.keys().await? {
            if key.starts_with(prefix) {
                self.remove(&key).await?;
                removed += 1;
            }
        }
        debug!("Removed {} key(s) with prefix {}", removed, prefix);
        Ok(removed)
    }
}

/// Load and decode a typed document
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> RosterResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| RosterError::parse(format!("stored {key}"), e)),
        None => Ok(None),
    }
}

/// Encode and store a typed document
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> RosterResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
