//! Integration tests for Roster

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Isolated config file and store directory per test
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn store_dir(&self) -> PathBuf {
            self.dir.path().join("store")
        }

        fn roster(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("roster");
            cmd.env("ROSTER_CONFIG", self.config_path())
                .env("ROSTER_STORE", self.store_dir())
                .env("CI", "1");
            cmd
        }

        /// Write a raw document under `key`
        fn seed(&self, key: &str, value: &Value) {
            std::fs::create_dir_all(self.store_dir()).unwrap();
            std::fs::write(
                self.store_dir().join(format!("{key}.json")),
                serde_json::to_string(value).unwrap(),
            )
            .unwrap();
        }

        /// Write a cache entry stamped now
        fn seed_cached(&self, key: &str, data: &Value) {
            let now = chrono::Utc::now().timestamp_millis();
            self.seed(key, &json!({"timestamp": now, "data": data}));
        }

        fn has_key(&self, key: &str) -> bool {
            self.store_dir().join(format!("{key}.json")).exists()
        }

        fn configured(self) -> Self {
            self.seed(
                "dataplexConfig",
                &json!({"project_id": "acme-data", "location": "europe-west1"}),
            );
            self
        }
    }

    fn products() -> Value {
        json!([
            {
                "id": "sales",
                "name": "Sales",
                "team": "Revenue",
                "kind": "consumer-aligned",
                "components": [{
                    "id": "orders",
                    "name": "Orders",
                    "type": "bigquery-table",
                    "source": {
                        "system": "BIGQUERY",
                        "resource": "//bigquery.googleapis.com/projects/acme-data/datasets/sales/tables/orders"
                    }
                }]
            },
            {
                "id": "web",
                "name": "Web Events",
                "team": "Growth",
                "kind": "source-aligned",
                "components": [{
                    "id": "events",
                    "name": "Events",
                    "type": "bigquery-table",
                    "source": {
                        "system": "BIGQUERY",
                        "resource": "//bigquery.googleapis.com/projects/acme-data/datasets/web/tables/events"
                    }
                }]
            }
        ])
    }

    fn with_contract(mut products: Value) -> Value {
        products[0]["contracts"] = json!([{
            "id": "sales_contract_1",
            "info": {"title": "Sales Contract", "version": "1.0.0", "status": "active"}
        }]);
        products
    }

    #[test]
    fn help_displays() {
        Sandbox::new()
            .roster()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dataplex data product catalog"));
    }

    #[test]
    fn version_displays() {
        Sandbox::new()
            .roster()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("roster"));
    }

    #[test]
    fn config_path() {
        let sandbox = Sandbox::new();
        sandbox
            .roster()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_set_then_show() {
        let sandbox = Sandbox::new();
        sandbox
            .roster()
            .args(["config", "set", "api.base_url", "https://catalog.internal"])
            .assert()
            .success();

        sandbox
            .roster()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("https://catalog.internal"));
    }

    #[test]
    fn config_set_unknown_key() {
        Sandbox::new()
            .roster()
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn products_without_configuration() {
        Sandbox::new()
            .roster()
            .arg("products")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not configured"))
            .stderr(predicate::str::contains("roster configure"));
    }

    #[test]
    fn refresh_without_configuration() {
        Sandbox::new()
            .roster()
            .arg("refresh")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not configured"));
    }

    #[test]
    fn configure_needs_values_when_not_interactive() {
        Sandbox::new()
            .roster()
            .args(["configure", "--project-id", "acme-data"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not configured"));
    }

    #[test]
    fn products_served_from_fresh_cache() {
        let sandbox = Sandbox::new().configured();
        sandbox.seed_cached("dataProductsCache", &products());
        sandbox.seed("dataProducts", &with_contract(products()));

        sandbox
            .roster()
            .args(["products", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"Web Events\""))
            .stdout(predicate::str::contains("sales_contract_1"));

        sandbox
            .roster()
            .arg("products")
            .assert()
            .success()
            .stdout(predicate::str::contains("COMPONENTS CONTRACTS"))
            .stdout(predicate::str::contains("2 data product(s)"));

        sandbox
            .roster()
            .args(["products", "--search", "growth", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("web\n"));
    }

    #[test]
    fn unreachable_backend_reports_error() {
        let sandbox = Sandbox::new().configured();
        sandbox
            .roster()
            .args(["config", "set", "api.base_url", "http://127.0.0.1:9"])
            .assert()
            .success();
        sandbox.seed("dataProducts", &products());

        sandbox
            .roster()
            .arg("products")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not reach backend"));

        // Durable list survives a failed fetch
        assert!(sandbox.has_key("dataProducts"));
    }

    #[test]
    fn contract_template_unknown_product() {
        Sandbox::new()
            .roster()
            .args(["contract", "template", "missing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Data product not found"));
    }

    #[test]
    fn contract_lifecycle() {
        let sandbox = Sandbox::new();
        sandbox.seed("dataProducts", &products());

        sandbox
            .roster()
            .args(["contract", "template", "sales"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dataContractSpecification: 1.1.0"))
            .stdout(predicate::str::contains("id: sales_contract_"));

        let document = sandbox.dir.path().join("contract.yaml");
        std::fs::write(
            &document,
            "id: sales_contract_7\ninfo:\n  title: Sales Contract\n  status: draft\n",
        )
        .unwrap();

        sandbox
            .roster()
            .args(["contract", "save", "sales", "--file"])
            .arg(&document)
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved contract sales_contract_7"));

        sandbox
            .roster()
            .args(["contract", "show", "sales", "sales_contract_7"])
            .assert()
            .success()
            .stdout(predicate::str::contains("title: Sales Contract"));

        sandbox
            .roster()
            .args(["contract", "delete", "sales", "sales_contract_7", "--yes"])
            .assert()
            .success();

        sandbox
            .roster()
            .args(["contract", "show", "sales", "sales_contract_7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn contract_save_from_stdin_rejects_missing_id() {
        let sandbox = Sandbox::new();
        sandbox.seed("dataProducts", &products());

        sandbox
            .roster()
            .args(["contract", "save", "sales", "--file", "-"])
            .write_stdin("info:\n  title: No id\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid contract document"));
    }

    #[test]
    fn access_requires_contract_acceptance() {
        let sandbox = Sandbox::new().configured();
        sandbox.seed_cached("dataProductsCache", &products());
        sandbox.seed("dataProducts", &with_contract(products()));

        sandbox
            .roster()
            .args(["access", "sales", "--purpose", "quarterly reporting"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("accept its terms"));

        sandbox
            .roster()
            .args([
                "access",
                "sales",
                "--purpose",
                "quarterly reporting",
                "--accept-contract",
                "--duration",
                "6months",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Request Initiation"))
            .stdout(predicate::str::contains("6 Months"));
    }

    #[test]
    fn lineage_from_cached_reports() {
        let sandbox = Sandbox::new().configured();
        sandbox.seed_cached("dataProductsCache", &products());
        sandbox.seed_cached(
            "profileDataCache_orders",
            &json!({"data_profile": [], "data_quality": [], "schema": null}),
        );
        sandbox.seed_cached(
            "lineageDataCache_orders",
            &json!({
                "sources": ["acme-data.web.events"],
                "processes": [{"id": "p1", "sql": "SELECT * FROM acme-data.web.events"}]
            }),
        );

        sandbox
            .roster()
            .args(["lineage", "sales", "orders", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("SQL Transform"))
            .stdout(predicate::str::contains("\"product_id\": \"web\""));
    }

    #[test]
    fn lineage_unknown_component_stops_spinner() {
        let sandbox = Sandbox::new().configured();
        sandbox.seed_cached("dataProductsCache", &products());

        sandbox
            .roster()
            .args(["lineage", "sales", "refunds"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("[FAIL] Failed to find component"))
            .stderr(predicate::str::contains(
                "Component refunds not found in data product sales",
            ));
    }

    #[test]
    fn show_from_cached_reports() {
        let sandbox = Sandbox::new().configured();
        sandbox.seed_cached("dataProductsCache", &products());
        sandbox.seed_cached(
            "profileDataCache_orders",
            &json!({
                "data_profile": [{"rowCount": 1024, "fields": [{"name": "order_id", "type": "STRING"}]}],
                "data_quality": [],
                "schema": null
            }),
        );
        sandbox.seed_cached(
            "lineageDataCache_orders",
            &json!({"sources": [], "processes": []}),
        );

        sandbox
            .roster()
            .args(["show", "sales"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Data Profile (1,024 rows)"))
            .stdout(predicate::str::contains("order_id"));
    }

    #[test]
    fn cache_status_empty() {
        Sandbox::new()
            .roster()
            .args(["cache", "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached responses"));
    }

    #[test]
    fn cache_clear_by_family() {
        let sandbox = Sandbox::new();
        sandbox.seed_cached("profileDataCache_orders", &json!({}));
        sandbox.seed_cached("lineageDataCache_orders", &json!({}));
        sandbox.seed("dataProducts", &products());

        sandbox
            .roster()
            .args(["cache", "status", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("profileDataCache_orders"))
            .stdout(predicate::str::contains("dataProducts\n").not());

        sandbox
            .roster()
            .args(["cache", "clear", "--family", "profile"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared 1"));

        assert!(!sandbox.has_key("profileDataCache_orders"));
        assert!(sandbox.has_key("lineageDataCache_orders"));
        assert!(sandbox.has_key("dataProducts"));
    }
}
