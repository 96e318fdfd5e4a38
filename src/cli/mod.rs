//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

use crate::api::HttpCatalogApi;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::coordinator::RefreshCoordinator;
use crate::error::RosterResult;
use crate::store::{FileStore, KeyValueStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Everything a catalog command needs, wired once per invocation
pub struct CommandContext {
    pub config: Config,
    pub store_dir: PathBuf,
    pub cache: CacheStore,
    pub coordinator: RefreshCoordinator,
}

impl CommandContext {
    /// Open the file store at `store_dir` and point the client at the backend
    pub fn open(config: Config, store_dir: PathBuf) -> Self {
        debug!("Using store at {}", store_dir.display());

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(store_dir.clone()));
        let cache = CacheStore::new(store.clone());
        let api = Arc::new(HttpCatalogApi::new(&config.api));
        let coordinator = RefreshCoordinator::new(store, cache.clone(), api);

        Self {
            config,
            store_dir,
            cache,
            coordinator,
        }
    }

    /// Product list as the listing pages see it: from cache when fresh
    ///
    /// Requires a configured scope.
    pub async fn load_products(&self) -> RosterResult<Vec<crate::catalog::DataProduct>> {
        let scope = self.coordinator.scope().await?;
        self.coordinator.load_products(&scope, false).await
    }
}
