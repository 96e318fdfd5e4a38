//! Data products and their components

use super::contract::Contract;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named grouping of data assets with ownership metadata
///
/// Every field except `contracts` comes from the backend. Contracts are
/// authored locally and carried across refetches by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProduct {
    pub id: String,

    pub name: String,

    #[serde(default = "default_team")]
    pub team: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub contracts: Vec<Contract>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DataProduct {
    /// Look up a component by id
    pub fn component(&self, component_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == component_id)
    }

    /// Look up a contract by id
    pub fn contract(&self, contract_id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == contract_id)
    }

    /// True if any component's resource ends in `table`
    pub fn owns_table(&self, table: &str) -> bool {
        self.components.iter().any(|c| c.source.table_name() == table)
    }
}

fn default_team() -> String {
    "Unassigned".to_string()
}

fn default_kind() -> String {
    "source-aligned".to_string()
}

/// One physical data asset (e.g. a table) inside a data product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    pub name: String,

    #[serde(rename = "type", default = "default_component_type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub source: ComponentSource,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Component {
    /// Profiles and lineage only exist for BigQuery tables
    pub fn is_bigquery_table(&self) -> bool {
        self.source.system.eq_ignore_ascii_case("BIGQUERY")
            && self.kind.to_lowercase().contains("table")
    }
}

fn default_component_type() -> String {
    "Unknown".to_string()
}

/// Where a component physically lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSource {
    #[serde(default = "default_component_type")]
    pub system: String,

    #[serde(default)]
    pub resource: String,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ComponentSource {
    /// Last path segment of the resource name
    pub fn table_name(&self) -> &str {
        self.resource.rsplit('/').next().unwrap_or_default()
    }
}

impl Default for ComponentSource {
    fn default() -> Self {
        Self {
            system: default_component_type(),
            resource: String::new(),
            labels: BTreeMap::new(),
        }
    }
}

/// Scope every backend request is made in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataplexScope {
    pub project_id: String,
    pub location: String,
}

impl DataplexScope {
    /// Both fields must be non-blank to be usable
    pub fn is_complete(&self) -> bool {
        !self.project_id.trim().is_empty() && !self.location.trim().is_empty()
    }
}

/// Kind of data product, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Application,
    ConsumerAligned,
    DataConsumer,
    SourceAligned,
    Other,
}

impl ProductKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "application" => Self::Application,
            "consumer-aligned" => Self::ConsumerAligned,
            "dataconsumer" => Self::DataConsumer,
            "source-aligned" => Self::SourceAligned,
            _ => Self::Other,
        }
    }
}
