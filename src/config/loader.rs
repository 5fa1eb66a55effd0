//! Configuration Loader
//!
//! Loads client configuration from JSON files and merges it onto defaults.

use crate::api::Params;
use crate::config::client::{ClientConfig, Resource};
use crate::error::{FunderError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// On-disk configuration; every key is optional so files can be layered
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,

    #[serde(default)]
    paths: HashMap<Resource, String>,

    #[serde(default)]
    adhoc_fields: Params,

    #[serde(default)]
    adhoc_headers: HashMap<String, String>,
}

/// Configuration loader with support for layered sources
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Create a loader holding the default configuration (no base URL)
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Create a loader from a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self::new();
        loader.load_from_file(path)?;
        Ok(loader)
    }

    /// Load and merge a config file
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FunderError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            FunderError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded funder configuration");
        self.merge(file);
        Ok(())
    }

    /// Load and merge configuration from a JSON string
    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = serde_json::from_str(content)
            .map_err(|e| FunderError::Config(format!("Failed to parse configuration: {}", e)))?;

        self.merge(file);
        Ok(())
    }

    /// Merge a file into the current configuration (later sources override earlier)
    fn merge(&mut self, file: ConfigFile) {
        if let Some(base_url) = file.base_url {
            self.config.base_url = Some(base_url);
        }

        for (resource, path) in file.paths {
            self.config.set_resource_path(resource, path);
        }

        for (name, value) in file.adhoc_fields.iter() {
            self.config.add_adhoc_field(name, value.clone());
        }

        for (name, value) in file.adhoc_headers {
            self.config.add_adhoc_header(name, value);
        }
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
