//! Global user configuration
//!
//! Stored in `~/.config/ng/config.toml` (platform equivalent), or in the
//! directory named by `NG_CONFIG_DIR` when set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overrides the global config directory
pub const CONFIG_DIR_ENV: &str = "NG_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Highlight names in help output
    pub color: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone)]
pub struct Config {
    pub global: GlobalConfig,
    pub global_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        let global_dir = Self::global_config_dir();
        let global = match &global_dir {
            Some(dir) => Self::load_global(dir)?,
            None => GlobalConfig::default(),
        };

        Ok(Self { global, global_dir })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }

        ProjectDirs::from("dev", "ng", "ng-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration from a directory
    pub fn load_global(config_dir: &Path) -> Result<GlobalConfig> {
        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }
}
