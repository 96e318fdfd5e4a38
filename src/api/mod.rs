//! Metadata backend client
//!
//! The backend owns profiling, quality evaluation and lineage extraction;
//! Roster only reads from it. [`CatalogApi`] is the seam the refresh
//! coordinator talks to, so tests can swap in a fake backend.

mod http;

pub use http::HttpCatalogApi;

use crate::catalog::{DataProduct, DataplexScope, LineageReport, ProfileReport};
use crate::error::RosterResult;
use async_trait::async_trait;

/// Read-only view of the metadata backend
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/data-products`
    async fn list_data_products(&self, scope: &DataplexScope) -> RosterResult<Vec<DataProduct>>;

    /// `GET /api/data-products/{component}/profile`
    async fn fetch_profile(
        &self,
        component_id: &str,
        scope: &DataplexScope,
    ) -> RosterResult<ProfileReport>;

    /// `GET /api/data-products/{component}/lineage`
    async fn fetch_lineage(
        &self,
        component_id: &str,
        scope: &DataplexScope,
    ) -> RosterResult<LineageReport>;
}
