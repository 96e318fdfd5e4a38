//! HTTP implementation of the backend client

use super::CatalogApi;
use crate::catalog::{DataProduct, DataplexScope, LineageReport, ProfileReport};
use crate::config::schema::ApiConfig;
use crate::error::{RosterError, RosterResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Profile reports for wide tables exceed ureq's 10 MB default
const MAX_RESPONSE_BYTES: u64 = 256 * 1024 * 1024;

/// Body of the product listing endpoint
#[derive(Debug, Deserialize)]
struct DataProductsResponse {
    #[serde(default)]
    data_products: Vec<DataProduct>,
}

/// Error body the backend attaches to non-success responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Backend client over blocking HTTP, run on the blocking thread pool
#[derive(Clone)]
pub struct HttpCatalogApi {
    agent: Agent,
    base_url: String,
}

impl HttpCatalogApi {
    /// Create a client from API settings
    pub fn new(config: &ApiConfig) -> Self {
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T>(
        &self,
        path: String,
        scope: &DataplexScope,
        what: &'static str,
    ) -> RosterResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, path);
        let scope = scope.clone();

        tokio::task::spawn_blocking(move || fetch_json(&agent, &url, &scope, what))
            .await
            .map_err(|e| RosterError::Internal(format!("request task failed: {e}")))?
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_data_products(&self, scope: &DataplexScope) -> RosterResult<Vec<DataProduct>> {
        let response: DataProductsResponse = self
            .get_json("/api/data-products".to_string(), scope, "data products")
            .await?;
        Ok(response.data_products)
    }

    async fn fetch_profile(
        &self,
        component_id: &str,
        scope: &DataplexScope,
    ) -> RosterResult<ProfileReport> {
        let path = format!(
            "/api/data-products/{}/profile",
            encode_path_segment(component_id)
        );
        self.get_json(path, scope, "profile data").await
    }

    async fn fetch_lineage(
        &self,
        component_id: &str,
        scope: &DataplexScope,
    ) -> RosterResult<LineageReport> {
        let path = format!(
            "/api/data-products/{}/lineage",
            encode_path_segment(component_id)
        );
        self.get_json(path, scope, "lineage data").await
    }
}

fn fetch_json<T: DeserializeOwned>(
    agent: &Agent,
    url: &str,
    scope: &DataplexScope,
    what: &str,
) -> RosterResult<T> {
    debug!("GET {} ({}/{})", url, scope.project_id, scope.location);

    let mut response = agent
        .get(url)
        .query("project_id", &scope.project_id)
        .query("location", &scope.location)
        .call()
        .map_err(|e| RosterError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_RESPONSE_BYTES)
        .read_to_string()
        .map_err(|e| RosterError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(RosterError::Network {
            status: status.as_u16(),
            detail: error_detail(&body).unwrap_or_else(|| format!("Failed to fetch {what}")),
        });
    }

    serde_json::from_str(&body).map_err(|e| RosterError::parse(format!("{what} response"), e))
}

/// The backend's `detail` message, if the body carries one
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty())
}

/// Percent-encode a single URL path segment
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
