//! Configuration types for input sets.
//!
//! This module provides:
//! - `InputConfig`: Paths, mode, error policy and stdin fallback
//! - `Mode`: Concatenate inputs or process them one by one
//! - `ConfigError`: Failures while loading a configuration file

mod spec;

use std::path::Path;

use thiserror::Error;

pub use spec::{InputConfig, Mode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "json")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "yaml")]
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl InputConfig {
    /// Load a configuration file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        Self::from_str_with_format(&text, &ext)
    }

    /// Parse a configuration from text in the named format
    /// (`json`, `yaml` or `yml`).
    pub fn from_str_with_format(text: &str, format: &str) -> Result<Self, ConfigError> {
        match format {
            #[cfg(feature = "json")]
            "json" => Ok(serde_json::from_str(text)?),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(serde_yaml::from_str(text)?),
            other => {
                let _ = text;
                Err(ConfigError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
