//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// # Returns
    /// The loaded config (all None if the file doesn't exist)
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save configuration to storage.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Initialize configuration file with defaults.
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load configuration, treating unreadable or malformed files as empty.
    ///
    /// # Returns
    /// The loaded config and the error that was swallowed, if any, so the
    /// caller can still warn about it.
    async fn load_or_empty(&self) -> (AppConfig, Option<ConfigError>) {
        match self.load().await {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::empty(), Some(e)),
        }
    }
}
