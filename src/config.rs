//! Cart configuration: where the backing store lives on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Directory holding the storage file.
    pub data_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gocart");
        Self { data_dir }
    }
}

impl CartConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/gocart/config.toml` on Unix/macOS, or equivalent on
    /// other platforms via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("gocart").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `CartConfig::default()`.
    /// - If the file exists, parses it as TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The JSON file backing `FileStorage`.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}
