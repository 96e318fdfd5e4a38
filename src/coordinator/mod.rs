//! Fetch-or-reuse decisions for every catalog resource
//!
//! The coordinator decides, per resource, whether a fresh cache entry can
//! be served or the backend must be asked, and reconciles fetched data with
//! state only this client owns (contracts).
//!
//! # Resources
//!
//! | Resource | Cache key | Durable copy |
//! |----------|-----------|--------------|
//! | Product list | `dataProductsCache` | `dataProducts` |
//! | Component profile | `profileDataCache_<id>` | - |
//! | Component lineage | `lineageDataCache_<id>` | - |
//!
//! A failed product fetch clears the in-memory view but never touches the
//! durable copy. Profile and lineage for a component are resolved in
//! parallel; each family is cached on its own as soon as it succeeds.

mod state;

pub use state::{CatalogView, ComponentDetail, ComponentState, ProductDetail};

use crate::api::CatalogApi;
use crate::cache::{CacheStore, CACHE_FAMILIES};
use crate::catalog::{
    merge_contracts, remove_contract, upsert_contract, Component, Contract, DataProduct,
    DataplexScope,
};
use crate::error::{RosterError, RosterResult};
use crate::store::{keys, load_json, save_json, KeyValueStore};
use futures_util::future::join_all;
use serde::Serialize;
use state::Resolved;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Coordinates cache, durable store and backend for the catalog
pub struct RefreshCoordinator {
    store: Arc<dyn KeyValueStore>,
    cache: CacheStore,
    api: Arc<dyn CatalogApi>,
    view: Mutex<CatalogView>,
}

impl RefreshCoordinator {
    /// Create a coordinator; `cache` should share `store`
    pub fn new(store: Arc<dyn KeyValueStore>, cache: CacheStore, api: Arc<dyn CatalogApi>) -> Self {
        Self {
            store,
            cache,
            api,
            view: Mutex::new(CatalogView::default()),
        }
    }

    /// Snapshot of the in-memory view
    pub fn view(&self) -> CatalogView {
        self.lock_view().clone()
    }

    /// Products currently in view
    pub fn products(&self) -> Vec<DataProduct> {
        self.lock_view().products.clone()
    }

    /// Populate the view from the durable product list
    pub async fn load_initial(&self) -> RosterResult<Vec<DataProduct>> {
        let products = self.stored_products().await?;
        self.set_view(products.clone(), None);
        Ok(products)
    }

    /// Persisted Dataplex scope
    pub async fn scope(&self) -> RosterResult<DataplexScope> {
        load_json::<DataplexScope>(self.store.as_ref(), keys::DATAPLEX_CONFIG)
            .await?
            .filter(DataplexScope::is_complete)
            .ok_or(RosterError::ConfigurationMissing)
    }

    /// Persist the Dataplex scope
    pub async fn save_scope(&self, scope: &DataplexScope) -> RosterResult<()> {
        if !scope.is_complete() {
            return Err(RosterError::ConfigurationMissing);
        }
        save_json(self.store.as_ref(), keys::DATAPLEX_CONFIG, scope).await?;
        info!("Saved scope {}/{}", scope.project_id, scope.location);
        Ok(())
    }

    /// Load the product list, from cache unless `force_refresh`
    ///
    /// On failure the view is emptied and carries the error message; the
    /// durable product list is left as it was.
    pub async fn load_products(
        &self,
        scope: &DataplexScope,
        force_refresh: bool,
    ) -> RosterResult<Vec<DataProduct>> {
        let result = self.resolve_products(scope, force_refresh).await;

        match &result {
            Ok(products) => self.set_view(products.clone(), None),
            Err(e) => {
                warn!("Error fetching data products: {}", e);
                self.set_view(vec![], Some(e.to_string()));
            }
        }
        result
    }

    /// Drop every cache family, then refetch the product list
    pub async fn refresh(&self, scope: Option<&DataplexScope>) -> RosterResult<Vec<DataProduct>> {
        let scope = scope
            .filter(|s| s.is_complete())
            .ok_or(RosterError::ConfigurationMissing)?;

        for family in CACHE_FAMILIES {
            let removed = self.cache.clear_by_prefix(family).await;
            debug!("Cleared {} {} entr(ies)", removed, family);
        }

        self.load_products(scope, true).await
    }

    /// Resolve profile and lineage for one component
    pub async fn load_component(
        &self,
        scope: &DataplexScope,
        component: &Component,
    ) -> ComponentState {
        if !component.is_bigquery_table() {
            debug!("Skipping non-table component {}", component.id);
            return ComponentState::Skipped;
        }

        let profile_key = keys::profile_cache_key(&component.id);
        let lineage_key = keys::lineage_cache_key(&component.id);

        let (profile, lineage) = tokio::join!(
            self.cached_or_fetch(&profile_key, self.api.fetch_profile(&component.id, scope)),
            self.cached_or_fetch(&lineage_key, self.api.fetch_lineage(&component.id, scope)),
        );

        match (profile, lineage) {
            (Ok(profile), Ok(lineage)) => ComponentState::Loaded {
                profile: profile.into_inner(),
                lineage: lineage.into_inner(),
            },
            (Err(error), lineage) => {
                warn!("Error fetching data for {}: {}", component.id, error);
                ComponentState::Failed {
                    error,
                    profile: None,
                    lineage: lineage.ok().and_then(Resolved::into_cached),
                }
            }
            (Ok(profile), Err(error)) => {
                warn!("Error fetching data for {}: {}", component.id, error);
                ComponentState::Failed {
                    error,
                    profile: profile.into_cached(),
                    lineage: None,
                }
            }
        }
    }

    /// Resolve every component of a product in view, in parallel
    pub async fn load_product_detail(
        &self,
        scope: &DataplexScope,
        product_id: &str,
    ) -> RosterResult<ProductDetail> {
        let product = self
            .lock_view()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| RosterError::ProductNotFound(product_id.to_string()))?;

        let states = join_all(
            product
                .components
                .iter()
                .map(|component| self.load_component(scope, component)),
        )
        .await;

        let components = product
            .components
            .iter()
            .cloned()
            .zip(states)
            .map(|(component, state)| ComponentDetail { component, state })
            .collect();

        Ok(ProductDetail {
            product,
            components,
        })
    }

    /// Insert or replace a contract and persist the product list
    pub async fn save_contract(&self, product_id: &str, contract: Contract) -> RosterResult<()> {
        let mut products = self.products();
        let contract_id = contract.id.clone();
        upsert_contract(&mut products, product_id, contract)?;

        self.persist_products(products).await?;
        info!("Saved contract {} for {}", contract_id, product_id);
        Ok(())
    }

    /// Delete a contract and persist the product list
    pub async fn delete_contract(&self, product_id: &str, contract_id: &str) -> RosterResult<Contract> {
        let mut products = self.products();
        let removed = remove_contract(&mut products, product_id, contract_id)?;

        self.persist_products(products).await?;
        info!("Deleted contract {} from {}", contract_id, product_id);
        Ok(removed)
    }

    async fn resolve_products(
        &self,
        scope: &DataplexScope,
        force_refresh: bool,
    ) -> RosterResult<Vec<DataProduct>> {
        if !force_refresh {
            if let Some(cached) = self
                .cache
                .get::<Vec<DataProduct>>(keys::DATA_PRODUCTS_CACHE)
                .await
            {
                info!("Using cached data products");
                // Contract edits land in the durable list only
                let stored = self.stored_products().await?;
                return Ok(merge_contracts(cached, &stored));
            }
        }

        let fetched = self.api.list_data_products(scope).await?;
        let stored = self.stored_products().await?;
        let merged = merge_contracts(fetched, &stored);

        save_json(self.store.as_ref(), keys::DATA_PRODUCTS, &merged).await?;
        self.cache.set(keys::DATA_PRODUCTS_CACHE, &merged).await;

        info!("Fetched {} data product(s)", merged.len());
        Ok(merged)
    }

    async fn cached_or_fetch<T, F>(&self, key: &str, fetch: F) -> RosterResult<Resolved<T>>
    where
        T: serde::de::DeserializeOwned + Serialize,
        F: Future<Output = RosterResult<T>>,
    {
        if let Some(hit) = self.cache.get::<T>(key).await {
            return Ok(Resolved::Cached(hit));
        }

        let fresh = fetch.await?;
        self.cache.set(key, &fresh).await;
        Ok(Resolved::Fetched(fresh))
    }

    async fn stored_products(&self) -> RosterResult<Vec<DataProduct>> {
        Ok(load_json(self.store.as_ref(), keys::DATA_PRODUCTS)
            .await?
            .unwrap_or_default())
    }

    async fn persist_products(&self, products: Vec<DataProduct>) -> RosterResult<()> {
        save_json(self.store.as_ref(), keys::DATA_PRODUCTS, &products).await?;
        self.lock_view().products = products;
        Ok(())
    }

    fn set_view(&self, products: Vec<DataProduct>, error: Option<String>) {
        let mut view = self.lock_view();
        view.products = products;
        view.error = error;
    }

    fn lock_view(&self) -> MutexGuard<'_, CatalogView> {
        // The view holds no invariants a panicking writer could break
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests;
