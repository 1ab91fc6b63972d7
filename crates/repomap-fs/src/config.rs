//! Format-agnostic configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result, io};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Load configuration if the file exists.
    ///
    /// A missing file yields `Ok(None)`; a present but malformed one is an error.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No config file present");
            return Ok(None);
        }
        self.load(path).map(Some)
    }
}
