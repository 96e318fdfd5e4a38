//! Roster - Dataplex data product catalog
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use roster::cli::{commands, Cli, CommandContext, Commands};
use roster::config::{Config, ConfigManager};
use roster::error::RosterResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RosterResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    roster::ui::init_theme();

    // Config command works on the file itself, not the catalog
    if let Commands::Config(args) = cli.command {
        return commands::config(args, &config_manager, &config).await;
    }

    let store_dir = ConfigManager::store_dir(&config, cli.store.as_deref());
    let ctx = CommandContext::open(config, store_dir);

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Configure(args) => commands::configure(args, &ctx).await,
        Commands::Products(args) => commands::products(args, &ctx).await,
        Commands::Show(args) => commands::show(args, &ctx).await,
        Commands::Lineage(args) => commands::lineage(args, &ctx).await,
        Commands::Refresh => commands::refresh(&ctx).await,
        Commands::Contracts(args) => commands::contracts(args, &ctx).await,
        Commands::Contract(args) => commands::contract(args, &ctx).await,
        Commands::Governance(args) => commands::governance(args, &ctx).await,
        Commands::Access(args) => commands::access(args, &ctx).await,
        Commands::Cache(args) => commands::cache(args, &ctx).await,
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("roster=warn"),
        1 => EnvFilter::new("roster=info"),
        _ => EnvFilter::new("roster=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
