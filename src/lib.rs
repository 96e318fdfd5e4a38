//! Roster - Dataplex data product catalog
//!
//! Browses data products and their components, caches backend responses
//! for an hour, and keeps locally authored data contracts across refetches.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod governance;
pub mod lineage;
pub mod store;
pub mod ui;

pub use error::{RosterError, RosterResult};
