//! Configuration management for Roster

pub mod schema;

pub use schema::Config;

use crate::error::{RosterError, RosterResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roster")
            .join("config.toml")
    }

    /// Get the state directory path
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roster")
    }

    /// Get the default durable store directory
    pub fn default_store_dir() -> PathBuf {
        Self::state_dir().join("store")
    }

    /// Resolve the store directory: explicit override, then config, then default
    pub fn store_dir(config: &Config, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| config.store.dir.clone())
            .unwrap_or_else(Self::default_store_dir)
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> RosterResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> RosterResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RosterError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| RosterError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> RosterResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RosterError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> RosterResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RosterError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.api.base_url = "http://catalog.internal:8080".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.api.base_url, "http://catalog.internal:8080");
    }

    #[tokio::test]
    async fn invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url =").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        match err {
            RosterError::ConfigInvalid { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn store_dir_precedence() {
        let mut config = Config::default();
        assert_eq!(
            ConfigManager::store_dir(&config, None),
            ConfigManager::default_store_dir()
        );

        config.store.dir = Some(PathBuf::from("/from/config"));
        assert_eq!(
            ConfigManager::store_dir(&config, None),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            ConfigManager::store_dir(&config, Some(Path::new("/from/flag"))),
            PathBuf::from("/from/flag")
        );
    }
}
