//! Time-boxed response cache
//!
//! Wraps a [`KeyValueStore`] with `{timestamp, data}` envelopes and a single
//! one-hour TTL. The cache is best-effort: reads that fail for any reason
//! are misses and writes that fail are logged and dropped, so nothing that
//! depends on correctness ever reads through it.
//!
//! # Cache families
//!
//! | Family | Key | Invalidation prefix |
//! |--------|-----|---------------------|
//! | Product list | `dataProductsCache` | `dataProductsCache` |
//! | Profile | `profileDataCache_<component>` | `profileDataCache` |
//! | Lineage | `lineageDataCache_<component>` | `lineageDataCache` |

mod clock;

pub use clock::{Clock, SystemClock};

#[cfg(test)]
pub(crate) use clock::testing::ManualClock;

use crate::store::{keys, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifetime of every cache entry (one hour)
pub const CACHE_TTL_MS: i64 = 60 * 60 * 1000;

/// Prefixes of every cache family, in invalidation order
pub const CACHE_FAMILIES: [&str; 3] = [
    keys::DATA_PRODUCTS_CACHE,
    keys::PROFILE_CACHE_PREFIX,
    keys::LINEAGE_CACHE_PREFIX,
];

/// Stored cache envelope
///
/// `timestamp` is fixed when the entry is written and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Write time in milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Cached payload
    pub data: serde_json::Value,
}

impl CacheEntry {
    /// Age of the entry at `now`
    pub fn age_ms(&self, now: i64) -> i64 {
        now - self.timestamp
    }

    /// An entry is stale once its age reaches the TTL
    pub fn is_stale(&self, now: i64) -> bool {
        self.age_ms(now) >= CACHE_TTL_MS
    }
}

/// Summary of one stored cache entry
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryInfo {
    pub key: String,
    pub age_ms: i64,
    pub fresh: bool,
}

/// TTL cache over a shared key-value store
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    /// Create a cache using the system clock
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock
    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Fresh payload stored under `key`, if any
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.read_entry(key).await?;
        let now = self.clock.now_millis();

        if entry.is_stale(now) {
            debug!("Cache entry {} is stale ({} ms old)", key, entry.age_ms(now));
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(data) => {
                debug!("Cache hit for {}", key);
                Some(data)
            }
            Err(e) => {
                warn!("Ignoring cache entry {} with unexpected shape: {}", key, e);
                None
            }
        }
    }

    /// Store `data` under `key` with the current time
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T) {
        let entry = match serde_json::to_value(data) {
            Ok(data) => CacheEntry {
                timestamp: self.clock.now_millis(),
                data,
            },
            Err(e) => {
                warn!("Failed to encode cache entry {}: {}", key, e);
                return;
            }
        };

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw).await {
            warn!("Failed to write cache entry {}: {}", key, e);
        }
    }

    /// Drop every entry whose key starts with `prefix`
    pub async fn clear_by_prefix(&self, prefix: &str) -> usize {
        match self.store.delete_by_prefix(prefix).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!("Failed to clear cache entries with prefix {}: {}", prefix, e);
                0
            }
        }
    }

    /// Describe every readable entry in the known cache families
    pub async fn entries(&self) -> Vec<CacheEntryInfo> {
        let keys = match self.store.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to list cache entries: {}", e);
                return vec![];
            }
        };

        let now = self.clock.now_millis();
        let mut infos = vec![];
        for key in keys {
            if !CACHE_FAMILIES.iter().any(|family| key.starts_with(family)) {
                continue;
            }
            if let Some(entry) = self.read_entry(&key).await {
                infos.push(CacheEntryInfo {
                    age_ms: entry.age_ms(now),
                    fresh: !entry.is_stale(now),
                    key,
                });
            }
        }
        infos
    }

    async fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }
}
