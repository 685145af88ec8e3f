//! Error types for record loading and configuration

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading task records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to read records from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record{}: {source}", .line.map(|l| format!(" on line {}", l)).unwrap_or_default())]
    Parse {
        /// 1-based line number for JSON Lines input
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: expected true or false, got {value:?}")]
    InvalidBool { key: String, value: String },

    #[error("Failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
