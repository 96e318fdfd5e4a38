//! CLI command implementations

pub mod access;
pub mod cache;
pub mod config;
pub mod configure;
pub mod contract;
pub mod contracts;
pub mod governance;
pub mod lineage;
pub mod products;
pub mod refresh;
pub mod show;

pub use access::execute as access;
pub use cache::execute as cache;
pub use config::execute as config;
pub use configure::execute as configure;
pub use contract::execute as contract;
pub use contracts::execute as contracts;
pub use governance::execute as governance;
pub use lineage::execute as lineage;
pub use products::execute as products;
pub use refresh::execute as refresh;
pub use show::execute as show;
