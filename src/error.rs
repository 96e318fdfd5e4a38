//! Error types for Roster
//!
//! All modules use `RosterResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Roster operations
pub type RosterResult<T> = Result<T, RosterError>;

/// All errors that can occur in Roster
#[derive(Error, Debug)]
pub enum RosterError {
    // Configuration errors
    #[error("Dataplex project and location are not configured")]
    ConfigurationMissing,

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Backend errors
    #[error("Backend request failed ({status}): {detail}")]
    Network { status: u16, detail: String },

    #[error("Could not reach backend: {0}")]
    Transport(String),

    #[error("Malformed {context}: {reason}")]
    Parse { context: String, reason: String },

    // Catalog errors
    #[error("Data product not found: {0}")]
    ProductNotFound(String),

    #[error("Component {component} not found in data product {product}")]
    ComponentNotFound { product: String, component: String },

    #[error("Contract {contract} not found in data product {product}")]
    ContractNotFound { product: String, contract: String },

    #[error("Invalid contract document: {0}")]
    ContractInvalid(String),

    #[error("Invalid access request: {0}")]
    AccessRequestInvalid(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl RosterError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a named payload
    pub fn parse(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if the user can retry the failed operation as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Transport(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationMissing => {
                Some("Run: roster configure --project-id <id> --location <region>")
            }
            Self::Network { .. } | Self::Transport(_) => {
                Some("Check the backend is running (roster config show), then retry")
            }
            Self::ProductNotFound(_) => Some("Run: roster products"),
            Self::ContractInvalid(_) => Some("Start from: roster contract template <product>"),
            _ => None,
        }
    }
}
