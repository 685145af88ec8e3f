//! Configuration management for the TaskHound CLI
//!
//! Handles loading and saving configuration from ~/.taskhound/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the TaskHound CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Backup directory reported when none is given on the command line
    #[serde(default)]
    pub backup_dir: Option<String>,

    /// Assume high-value target data was loaded
    #[serde(default)]
    pub hv_data: bool,
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidBool {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".taskhound")
            .join("config.toml")
    }

    /// Load configuration from the default path, or return defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)?;
        Ok(())
    }

    /// Get a configuration value by key path (e.g., "display.color")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["display", "color"] => Some(self.display.color.to_string()),
            ["report", "backup_dir"] => self.report.backup_dir.clone(),
            ["report", "hv_data"] => Some(self.report.hv_data.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key path. Does not persist; call [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["display", "color"] => self.display.color = parse_bool(key, value)?,
            ["report", "backup_dir"] => {
                self.report.backup_dir = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            ["report", "hv_data"] => self.report.hv_data = parse_bool(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        Ok(())
    }
}
