//! Configuration management for AgrowMart

pub mod schema;

pub use schema::Config;

use crate::error::{AgrowError, AgrowResult};
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
            .join("agrowmart")
            .join("config.toml")
    }

    /// Durable per-user state: refresh credential, remembered login, audit log
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agrowmart")
    }

    /// Session-scoped state: access credential and display name.
    ///
    /// Lives in the per-user runtime directory, which the OS clears when the
    /// user's login session ends.
    pub fn session_dir() -> PathBuf {
        dirs::runtime_dir()
            .unwrap_or_else(Self::fallback_runtime_dir)
            .join("agrowmart")
    }

    /// Per-user directory under the temp dir, keyed by the home dir owner
    #[cfg(unix)]
    fn fallback_runtime_dir() -> PathBuf {
        use std::os::unix::fs::MetadataExt;

        let owner = dirs::home_dir()
            .and_then(|home| std::fs::metadata(home).ok())
            .map(|meta| meta.uid().to_string())
            .unwrap_or_else(|| "user".to_string());
        std::env::temp_dir().join(format!("agrowmart-{}", owner))
    }

    #[cfg(not(unix))]
    fn fallback_runtime_dir() -> PathBuf {
        std::env::temp_dir().join("agrowmart-session")
    }

    /// Get the durable credentials directory path
    pub fn credentials_dir() -> PathBuf {
        Self::state_dir().join("credentials")
    }

    /// Get the audit log path
    pub fn audit_log_path() -> PathBuf {
        Self::state_dir().join("audit.log")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> AgrowResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> AgrowResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AgrowError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| AgrowError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> AgrowResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            AgrowError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> AgrowResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AgrowError::ConfigDirCreate {
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
