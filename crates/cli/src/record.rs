//! Task records
//!
//! Classified task rows produced by the upstream scanner, and the loaders that
//! read them back from JSON / JSON Lines files.

use std::{io::Read, path::Path};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RecordError;

/// Host label used when a record carries no host.
pub const UNKNOWN_HOST: &str = "Unknown";

/// Type tag marking a privileged task.
pub const PRIVILEGED_TAG: &str = "PRIV";

/// Privilege classification of a task record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Privileged,
    Normal,
}

/// One classified task row. Only `host` and `type` are read; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "string_ish")]
    pub host: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "string_ish")]
    pub kind: Option<String>,
}

impl TaskRecord {
    pub fn new(host: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            kind: Some(kind.into()),
        }
    }

    /// The originating host, or `"Unknown"` when absent
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(UNKNOWN_HOST)
    }

    pub fn is_privileged(&self) -> bool {
        self.kind.as_deref() == Some(PRIVILEGED_TAG)
    }

    pub fn kind(&self) -> TaskKind {
        if self.is_privileged() {
            TaskKind::Privileged
        } else {
            TaskKind::Normal
        }
    }
}

/// Accepts strings, numbers and booleans; `null` maps to `None`.
fn string_ish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, number or boolean, found {}",
            other
        ))),
    }
}

/// Parse records from either a JSON array or JSON Lines text.
///
/// The format is picked from the first non-whitespace character: `[` means a
/// single array, anything else is one object per non-blank line.
pub fn parse_records(text: &str) -> Result<Vec<TaskRecord>, RecordError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|source| RecordError::Parse { line: None, source });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| RecordError::Parse {
                line: Some(idx + 1),
                source,
            })
        })
        .collect()
}

/// Load records from a file, or from stdin when `path` is `-`
pub fn load_records(path: &Path) -> Result<Vec<TaskRecord>, RecordError> {
    let io_err = |source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    let records = parse_records(&text)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded task records");
    Ok(records)
}
