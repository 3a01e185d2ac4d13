//! TOML config file under the user's config directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Directory under the user config dir holding `config.toml`
pub const APP_DIR_NAME: &str = "serial-chime";

const FILE_NAME: &str = "config.toml";

/// Config file at `$XDG_CONFIG_HOME/serial-chime/config.toml`, or at an
/// explicit path given with `--config`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self::with_path(default_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path` when given, the XDG location otherwise
    pub fn at(path: Option<PathBuf>) -> Self {
        path.map(Self::with_path).unwrap_or_default()
    }

    /// Sibling file the new content is written to before it replaces the config
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `$XDG_CONFIG_HOME` (or the platform equivalent), then `~/.config`, then
/// the working directory
fn default_path() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_default();
    base.join(APP_DIR_NAME).join(FILE_NAME)
}

fn parse(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => parse(&content, &self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    /// Replaces the file in one rename, so readers never see a partial write
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(write_error)?;
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        let staging = self.staging_path();
        fs::write(&staging, content).await.map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()));
        }
        self.save(&AppConfig::defaults()).await
    }
}
