use super::*;
use crate::cache::{ManualClock, CACHE_TTL_MS};
use crate::catalog::{LineageReport, ProfileReport};
use crate::store::MemoryStore;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Backend double that counts calls and can be told to fail
#[derive(Default)]
struct FakeApi {
    products: Mutex<Vec<DataProduct>>,
    list_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    lineage_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_profile: AtomicBool,
    fail_lineage: AtomicBool,
}

impl FakeApi {
    fn with_products(products: Vec<DataProduct>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn unavailable() -> RosterError {
    RosterError::Network {
        status: 503,
        detail: "backend unavailable".to_string(),
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_data_products(&self, _scope: &DataplexScope) -> RosterResult<Vec<DataProduct>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_profile(
        &self,
        component_id: &str,
        _scope: &DataplexScope,
    ) -> RosterResult<ProfileReport> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_profile.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(serde_json::from_value(json!({
            "data_profile": [{"rowCount": 10, "fields": [{"name": component_id}]}],
            "data_quality": [],
            "schema": null
        }))
        .unwrap())
    }

    async fn fetch_lineage(
        &self,
        component_id: &str,
        _scope: &DataplexScope,
    ) -> RosterResult<LineageReport> {
        self.lineage_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lineage.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(LineageReport {
            sources: vec![format!("p.d.upstream_of_{component_id}")],
            processes: vec![],
        })
    }
}

struct Harness {
    coordinator: RefreshCoordinator,
    store: Arc<MemoryStore>,
    cache: CacheStore,
    clock: Arc<ManualClock>,
    api: Arc<FakeApi>,
}

fn harness(api: FakeApi) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::at(1_700_000_000_000));
    let cache = CacheStore::with_clock(store.clone(), clock.clone());
    let api = Arc::new(api);
    let coordinator = RefreshCoordinator::new(store.clone(), cache.clone(), api.clone());
    Harness {
        coordinator,
        store,
        cache,
        clock,
        api,
    }
}

fn scope() -> DataplexScope {
    DataplexScope {
        project_id: "acme-data".into(),
        location: "europe-west1".into(),
    }
}

fn product(id: &str) -> DataProduct {
    serde_json::from_value(json!({"id": id, "name": id})).unwrap()
}

fn product_with_tables(id: &str, tables: &[&str]) -> DataProduct {
    let components: Vec<_> = tables
        .iter()
        .map(|t| {
            json!({
                "id": t,
                "name": t,
                "type": "bigquery-table",
                "source": {"system": "BIGQUERY", "resource": format!("//bigquery/tables/{t}")}
            })
        })
        .collect();
    serde_json::from_value(json!({"id": id, "name": id, "components": components})).unwrap()
}

fn contract(id: &str) -> Contract {
    Contract::from_yaml(&format!("id: {id}\ninfo:\n  title: {id}\n")).unwrap()
}

fn table(id: &str) -> Component {
    product_with_tables("p", &[id]).components.remove(0)
}

async fn stored_products(store: &MemoryStore) -> Option<Vec<DataProduct>> {
    load_json(store, keys::DATA_PRODUCTS).await.unwrap()
}

#[tokio::test]
async fn fetch_merges_previous_contracts() {
    let h = harness(FakeApi::with_products(vec![product("A"), product("C")]));

    let mut a = product("A");
    a.contracts = vec![contract("c1")];
    let mut b = product("B");
    b.contracts = vec![contract("c2")];
    save_json(h.store.as_ref(), keys::DATA_PRODUCTS, &vec![a, b])
        .await
        .unwrap();

    let products = h.coordinator.load_products(&scope(), true).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "A");
    assert_eq!(products[0].contracts[0].id, "c1");
    assert_eq!(products[1].id, "C");
    assert!(products[1].contracts.is_empty());

    let stored = stored_products(&h.store).await.unwrap();
    assert_eq!(stored, products);
    let cached: Vec<DataProduct> = h.cache.get(keys::DATA_PRODUCTS_CACHE).await.unwrap();
    assert_eq!(cached, products);
}

#[tokio::test]
async fn fresh_cache_avoids_network() {
    let h = harness(FakeApi::with_products(vec![product("A")]));

    h.coordinator.load_products(&scope(), false).await.unwrap();
    h.coordinator.load_products(&scope(), false).await.unwrap();

    assert_eq!(FakeApi::calls(&h.api.list_calls), 1);
}

#[tokio::test]
async fn stale_cache_refetches() {
    let h = harness(FakeApi::with_products(vec![product("A")]));

    h.coordinator.load_products(&scope(), false).await.unwrap();
    h.clock.set(1_700_000_000_000 + CACHE_TTL_MS);
    h.coordinator.load_products(&scope(), false).await.unwrap();

    assert_eq!(FakeApi::calls(&h.api.list_calls), 2);
}

#[tokio::test]
async fn cached_list_picks_up_later_contract_edits() {
    let h = harness(FakeApi::with_products(vec![product("A")]));
    h.coordinator.load_products(&scope(), false).await.unwrap();

    h.coordinator.save_contract("A", contract("c1")).await.unwrap();

    let products = h.coordinator.load_products(&scope(), false).await.unwrap();
    assert_eq!(FakeApi::calls(&h.api.list_calls), 1);
    assert_eq!(products[0].contracts.len(), 1);
}

#[tokio::test]
async fn failure_clears_view_but_keeps_storage() {
    let h = harness(FakeApi::with_products(vec![product("A")]));
    h.coordinator.load_products(&scope(), true).await.unwrap();
    let before = h.store.get(keys::DATA_PRODUCTS).await.unwrap();

    h.api.fail_list.store(true, Ordering::SeqCst);
    let err = h.coordinator.load_products(&scope(), true).await.unwrap_err();

    assert!(matches!(err, RosterError::Network { status: 503, .. }));
    let view = h.coordinator.view();
    assert!(view.products.is_empty());
    assert!(view.error.unwrap().contains("backend unavailable"));
    assert_eq!(h.store.get(keys::DATA_PRODUCTS).await.unwrap(), before);
}

#[tokio::test]
async fn refresh_clears_every_family_even_on_failure() {
    let h = harness(FakeApi::with_products(vec![product("A")]));
    h.cache.set(keys::DATA_PRODUCTS_CACHE, &vec![product("A")]).await;
    h.cache.set(&keys::profile_cache_key("t1"), &json!({})).await;
    h.cache.set(&keys::lineage_cache_key("t1"), &json!({})).await;
    save_json(h.store.as_ref(), keys::DATA_PRODUCTS, &vec![product("A")])
        .await
        .unwrap();

    h.api.fail_list.store(true, Ordering::SeqCst);
    assert!(h.coordinator.refresh(Some(&scope())).await.is_err());

    assert!(h.cache.entries().await.is_empty());
    assert!(stored_products(&h.store).await.is_some());
}

#[tokio::test]
async fn refresh_without_scope_is_configuration_missing() {
    let h = harness(FakeApi::default());
    h.cache.set(&keys::profile_cache_key("t1"), &json!({})).await;

    let err = h.coordinator.refresh(None).await.unwrap_err();
    assert!(matches!(err, RosterError::ConfigurationMissing));
    assert_eq!(FakeApi::calls(&h.api.list_calls), 0);
    assert_eq!(h.cache.entries().await.len(), 1);
}

#[tokio::test]
async fn scope_round_trips_through_store() {
    let h = harness(FakeApi::default());
    assert!(matches!(
        h.coordinator.scope().await,
        Err(RosterError::ConfigurationMissing)
    ));

    h.coordinator.save_scope(&scope()).await.unwrap();
    assert_eq!(h.coordinator.scope().await.unwrap(), scope());

    let raw = h.store.get(keys::DATAPLEX_CONFIG).await.unwrap().unwrap();
    assert!(raw.contains("\"project_id\""));
}

#[tokio::test]
async fn non_table_component_is_skipped() {
    let h = harness(FakeApi::default());
    let mut dataset = table("d1");
    dataset.kind = "bigquery-dataset".into();

    let state = h.coordinator.load_component(&scope(), &dataset).await;

    assert!(matches!(state, ComponentState::Skipped));
    assert_eq!(FakeApi::calls(&h.api.profile_calls), 0);
    assert_eq!(FakeApi::calls(&h.api.lineage_calls), 0);
}

#[tokio::test]
async fn only_missing_family_is_fetched() {
    let h = harness(FakeApi::default());
    let cached_profile = json!({"data_profile": [], "data_quality": [], "schema": null});
    h.cache.set(&keys::profile_cache_key("t1"), &cached_profile).await;

    let state = h.coordinator.load_component(&scope(), &table("t1")).await;

    assert!(matches!(state, ComponentState::Loaded { .. }));
    assert_eq!(FakeApi::calls(&h.api.profile_calls), 0);
    assert_eq!(FakeApi::calls(&h.api.lineage_calls), 1);
    assert!(state.profile().unwrap().data_profile.is_empty());

    let profile: serde_json::Value = h.cache.get(&keys::profile_cache_key("t1")).await.unwrap();
    assert_eq!(profile, cached_profile);
    let lineage: LineageReport = h.cache.get(&keys::lineage_cache_key("t1")).await.unwrap();
    assert_eq!(lineage.sources, vec!["p.d.upstream_of_t1"]);
}

#[tokio::test]
async fn both_families_cached_means_no_requests() {
    let h = harness(FakeApi::default());
    h.coordinator.load_component(&scope(), &table("t1")).await;
    h.coordinator.load_component(&scope(), &table("t1")).await;

    assert_eq!(FakeApi::calls(&h.api.profile_calls), 1);
    assert_eq!(FakeApi::calls(&h.api.lineage_calls), 1);
}

#[tokio::test]
async fn partial_failure_persists_the_successful_family() {
    let h = harness(FakeApi::default());
    h.api.fail_lineage.store(true, Ordering::SeqCst);

    let state = h.coordinator.load_component(&scope(), &table("t1")).await;

    assert!(matches!(state, ComponentState::Failed { .. }));
    assert!(state.profile().is_none());
    assert!(state.lineage().is_none());
    assert!(h
        .cache
        .get::<ProfileReport>(&keys::profile_cache_key("t1"))
        .await
        .is_some());

    h.api.fail_lineage.store(false, Ordering::SeqCst);
    let state = h.coordinator.load_component(&scope(), &table("t1")).await;
    assert!(matches!(state, ComponentState::Loaded { .. }));
    assert_eq!(FakeApi::calls(&h.api.profile_calls), 1);
    assert_eq!(FakeApi::calls(&h.api.lineage_calls), 2);
}

#[tokio::test]
async fn failure_keeps_cached_sibling_in_state() {
    let h = harness(FakeApi::default());
    h.cache
        .set(
            &keys::lineage_cache_key("t1"),
            &LineageReport {
                sources: vec!["p.d.src".into()],
                processes: vec![],
            },
        )
        .await;
    h.api.fail_profile.store(true, Ordering::SeqCst);

    let state = h.coordinator.load_component(&scope(), &table("t1")).await;

    assert!(state.error().is_some());
    assert_eq!(state.lineage().unwrap().sources, vec!["p.d.src"]);
}

#[tokio::test]
async fn product_detail_resolves_components_in_order() {
    let h = harness(FakeApi::with_products(vec![product_with_tables(
        "sales",
        &["orders", "customers"],
    )]));
    h.coordinator.load_products(&scope(), false).await.unwrap();

    let detail = h
        .coordinator
        .load_product_detail(&scope(), "sales")
        .await
        .unwrap();

    let ids: Vec<_> = detail
        .components
        .iter()
        .map(|c| c.component.id.as_str())
        .collect();
    assert_eq!(ids, vec!["orders", "customers"]);
    assert_eq!(detail.lineage().len(), 2);
    assert_eq!(FakeApi::calls(&h.api.profile_calls), 2);

    let err = h
        .coordinator
        .load_product_detail(&scope(), "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::ProductNotFound(_)));
}

#[tokio::test]
async fn contract_edits_persist_durably() {
    let h = harness(FakeApi::default());
    save_json(h.store.as_ref(), keys::DATA_PRODUCTS, &vec![product("A")])
        .await
        .unwrap();
    h.coordinator.load_initial().await.unwrap();

    h.coordinator.save_contract("A", contract("c1")).await.unwrap();
    h.coordinator.save_contract("A", contract("c2")).await.unwrap();
    let stored = stored_products(&h.store).await.unwrap();
    assert_eq!(stored[0].contracts.len(), 2);

    let removed = h.coordinator.delete_contract("A", "c1").await.unwrap();
    assert_eq!(removed.id, "c1");
    let stored = stored_products(&h.store).await.unwrap();
    assert_eq!(stored[0].contracts.len(), 1);
    assert_eq!(h.coordinator.products()[0].contracts[0].id, "c2");

    let err = h
        .coordinator
        .save_contract("Z", contract("c3"))
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::ProductNotFound(_)));
}
