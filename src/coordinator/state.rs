//! Outcomes the coordinator hands back to callers

use crate::catalog::{Component, DataProduct, LineageReport, ProfileReport};
use crate::error::RosterError;

/// In-memory product list plus the last load error
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    pub products: Vec<DataProduct>,
    pub error: Option<String>,
}

/// Per-component resolution result
#[derive(Debug)]
pub enum ComponentState {
    /// Not a BigQuery table; nothing to fetch
    Skipped,

    /// Both families available
    Loaded {
        profile: ProfileReport,
        lineage: LineageReport,
    },

    /// At least one family failed; cache hits are still carried
    Failed {
        error: RosterError,
        profile: Option<ProfileReport>,
        lineage: Option<LineageReport>,
    },
}

impl ComponentState {
    pub fn profile(&self) -> Option<&ProfileReport> {
        match self {
            Self::Loaded { profile, .. } => Some(profile),
            Self::Failed { profile, .. } => profile.as_ref(),
            Self::Skipped => None,
        }
    }

    pub fn lineage(&self) -> Option<&LineageReport> {
        match self {
            Self::Loaded { lineage, .. } => Some(lineage),
            Self::Failed { lineage, .. } => lineage.as_ref(),
            Self::Skipped => None,
        }
    }

    pub fn error(&self) -> Option<&RosterError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Short status label for listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Loaded { .. } => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// A component together with its resolution result
#[derive(Debug)]
pub struct ComponentDetail {
    pub component: Component,
    pub state: ComponentState,
}

/// A product with every component resolved
#[derive(Debug)]
pub struct ProductDetail {
    pub product: DataProduct,
    pub components: Vec<ComponentDetail>,
}

impl ProductDetail {
    /// Lineage reports keyed by component, for graph layout
    pub fn lineage(&self) -> Vec<(&Component, &LineageReport)> {
        self.components
            .iter()
            .filter_map(|c| c.state.lineage().map(|l| (&c.component, l)))
            .collect()
    }
}

/// Where a family's data came from
pub(super) enum Resolved<T> {
    Cached(T),
    Fetched(T),
}

impl<T> Resolved<T> {
    pub(super) fn into_inner(self) -> T {
        match self {
            Self::Cached(v) | Self::Fetched(v) => v,
        }
    }

    /// Only cache hits survive a sibling failure
    pub(super) fn into_cached(self) -> Option<T> {
        match self {
            Self::Cached(v) => Some(v),
            Self::Fetched(_) => None,
        }
    }
}
