//! Resolved configuration with provenance
//!
//! The resolution captures the global configuration plus information about
//! which layers contributed to it and the logging settings extracted from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uprev_options::{ManagerCatalog, OptionRegistry};

use super::filter::filter_config;
use super::manager::get_manager_config;

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Defaults,
    File,
    Env,
    Cli,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for everything but the file layer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Logging destinations taken from the resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSettings {
    pub log_level: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,

    pub log_file_level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            log_file_level: "debug".to_string(),
        }
    }
}

impl LogSettings {
    /// Read the logging fields of `config`, falling back to defaults.
    pub fn from_config(config: &Value) -> Self {
        let field = |key: &str| {
            config
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();
        Self {
            log_level: field("logLevel").unwrap_or(defaults.log_level),
            log_file: field("logFile"),
            log_file_level: field("logFileLevel").unwrap_or(defaults.log_file_level),
        }
    }
}

/// Outcome of a resolution pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// When this config was computed
    pub resolved_at: DateTime<Utc>,

    /// The global configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,

    /// Logging settings for the caller to apply
    pub logging: LogSettings,
}

impl Resolution {
    /// Configuration for one package manager.
    pub fn manager_config(
        &self,
        manager: &str,
        catalog: &dyn ManagerCatalog,
        registry: &OptionRegistry,
    ) -> Value {
        get_manager_config(&self.config, manager, catalog, registry)
    }

    /// View of the configuration from `stage` onwards.
    pub fn stage_view(&self, stage: &str, registry: &OptionRegistry) -> Value {
        filter_config(&self.config, stage, registry)
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
