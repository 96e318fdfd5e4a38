//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{RosterError, RosterResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 4] = [
    "general.log_format",
    "api.base_url",
    "api.timeout_secs",
    "store.dir",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> RosterResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut config = config.clone();
            set_value(&mut config, &key, &value)?;
            manager.save(&config).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> RosterResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> RosterResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );
    Ok(())
}

/// Apply a dot-separated key to the configuration
fn set_value(config: &mut Config, key: &str, value: &str) -> RosterResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(RosterError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )))
            }
        },
        ["api", "base_url"] => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(RosterError::User(format!(
                    "Invalid base URL: {}. Expected http:// or https://",
                    value
                )));
            }
            config.api.base_url = value.to_string();
        }
        ["api", "timeout_secs"] => config.api.timeout_secs = parse_timeout(value)?,
        ["store", "dir"] => {
            config.store.dir = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        _ => {
            return Err(RosterError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

/// `0` or `none` clears the timeout
fn parse_timeout(value: &str) -> RosterResult<Option<u64>> {
    match value {
        "none" | "0" => Ok(None),
        _ => value
            .parse()
            .map(Some)
            .map_err(|_| RosterError::User(format!("Invalid number: {}", value))),
    }
}
