//! Catalog data model
//!
//! Typed records for everything the backend returns, plus the client-side
//! operations on them: carrying contracts across refetches, editing
//! contracts, and filtering product lists.

pub mod contract;
pub mod filter;
pub mod merge;
pub mod model;
pub mod report;

pub use contract::{contract_template, Contract};
pub use filter::ProductFilter;
pub use merge::{merge_contracts, remove_contract, upsert_contract};
pub use model::{Component, ComponentSource, DataProduct, DataplexScope, ProductKind};
pub use report::{LineageProcess, LineageReport, ProfileReport};
