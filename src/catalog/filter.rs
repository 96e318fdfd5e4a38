//! Narrowing product lists for display

use super::model::DataProduct;
use std::collections::BTreeSet;

/// Product list filter; empty criteria match everything
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact kind match
    pub kind: Option<String>,

    /// Exact team match
    pub team: Option<String>,

    /// Case-insensitive substring of name or team
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &DataProduct) -> bool {
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            if product.kind != kind {
                return false;
            }
        }
        if let Some(team) = self.team.as_deref().filter(|t| !t.is_empty()) {
            if product.team != team {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.team.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, products: &'a [DataProduct]) -> Vec<&'a DataProduct> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct kinds, sorted
pub fn kinds(products: &[DataProduct]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.kind.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct teams, sorted
pub fn teams(products: &[DataProduct]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
