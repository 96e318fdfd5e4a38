//! CLI argument definitions using clap derive

use crate::governance::AccessDuration;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Roster - Dataplex data product catalog
///
/// Browse data products, their profiles, quality and lineage, and keep
/// data contracts alongside them.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(
    author,
    version,
    about = "Roster - Dataplex data product catalog",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding cached and saved catalog state
    #[arg(long, global = true, env = "ROSTER_STORE")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set the Dataplex project and location to browse
    Configure(ConfigureArgs),

    /// List data products
    Products(ProductsArgs),

    /// Show a data product with profile, quality and schema per component
    Show(ShowArgs),

    /// Show upstream lineage for one component
    Lineage(LineageArgs),

    /// Drop every cached response and refetch the product list
    Refresh,

    /// List data products and their contracts
    Contracts(ContractsArgs),

    /// Create, inspect or remove a data contract
    Contract(ContractArgs),

    /// List data products with their access status
    Governance(GovernanceArgs),

    /// Request access to a data product
    Access(AccessArgs),

    /// Inspect or clear cached responses
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ConfigureArgs {
    /// Google Cloud project id
    #[arg(long)]
    pub project_id: Option<String>,

    /// Dataplex location (e.g. europe-west1)
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ProductsArgs {
    /// Only products of this kind
    #[arg(long)]
    pub kind: Option<String>,

    /// Only products owned by this team
    #[arg(long)]
    pub team: Option<String>,

    /// Case-insensitive match on name or team
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Data product id
    pub product: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct LineageArgs {
    /// Data product id
    pub product: String,

    /// Component id
    pub component: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ContractsArgs {
    /// Case-insensitive match on name or team
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ContractArgs {
    #[command(subcommand)]
    pub action: ContractAction,
}

#[derive(Subcommand, Debug)]
pub enum ContractAction {
    /// Print a new contract document for a product
    Template {
        /// Data product id
        product: String,
    },

    /// Validate and store a contract document
    Save {
        /// Data product id
        product: String,

        /// YAML document to read ("-" for stdin)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print a stored contract document
    Show {
        /// Data product id
        product: String,

        /// Contract id
        contract: String,
    },

    /// Remove a stored contract
    Delete {
        /// Data product id
        product: String,

        /// Contract id
        contract: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct GovernanceArgs {
    /// Case-insensitive match on name or team
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AccessArgs {
    /// Data product id
    pub product: String,

    /// Why access is needed
    #[arg(short, long)]
    pub purpose: String,

    /// How long access should last
    #[arg(short, long, default_value = "3months")]
    pub duration: AccessDuration,

    /// Accept the product's data contract
    #[arg(long)]
    pub accept_contract: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached responses with their age
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove cached responses
    Clear {
        /// Which cache family to clear
        #[arg(long, default_value = "all")]
        family: CacheFamily,
    },
}

/// Cache families addressable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheFamily {
    Products,
    Profile,
    Lineage,
    All,
}
