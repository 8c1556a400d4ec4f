use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Path of the configuration file.
    ///
    /// `~/.config/fieldbook/config.toml` on Unix, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory when no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("fieldbook").join("config.toml")
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields `Config::default()`; an unreadable or
    /// malformed file is an error. Validation runs separately so CLI
    /// overrides can be applied first.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "api.base_url must not be empty".to_string(),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url '{}' must be http(s)", self.api.base_url),
            });
        }

        if self.ui.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.page_size must be at least 1".to_string(),
            });
        }

        if self.ui.tick_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.tick_ms must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
