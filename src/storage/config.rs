//! Configuration handling
//!
//! Configuration is stored in `config.toml` inside the platform config
//! directory (e.g. `~/.config/todo-cli/config.toml` on Linux). Every field is
//! optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Theme-related settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Ambient preference used when no theme has been chosen explicitly
    pub system: Option<Theme>,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Where task data lives (defaults to the platform data directory)
    pub data_dir: Option<PathBuf>,

    /// Ask before clearing completed tasks
    pub confirm_clear: bool,

    /// Seconds a validation notice stays visible in the TUI
    pub notice_seconds: u64,

    /// Theme settings
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            data_dir: None,
            confirm_clear: true,
            notice_seconds: 3,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file, using defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.notice_seconds == 0 {
            return Err(ConfigError::Invalid(
                "notice_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "todo", "todo-cli")
    }

    /// Returns the config file location
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the platform data directory
    pub fn default_data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Resolves the data directory: explicit override, then config, then platform default
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(Self::default_data_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory. Use --data-dir."))
    }

    /// How long a validation notice stays visible
    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}
