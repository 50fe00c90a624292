//! Global configuration resolution
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file
//! 3. Environment variables
//! 4. Command-line arguments
//!
//! With `forceCli` set, command-line values are re-applied through the
//! `force` block so they win over everything else.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use uprev_hosts::CredentialStore;
use uprev_options::OptionRegistry;

use super::effective::{ConfigOrigin, ConfigSource, LogSettings, Resolution};
use super::error::ConfigError;
use super::merge::{is_truthy, merge_child_config, FORCE_KEY};
use super::presets::{NoPresets, PresetResolver};
use super::{cli, defaults, env, file};
use crate::auth::resolve_credentials;

/// Fields consumed by the caller's logging setup and dropped from the config.
pub const OUTPUT_ONLY_KEYS: &[&str] = &["logFile", "logFileLevel"];

/// Keys whose values are masked in diagnostic output
const SECRET_KEYS: &[&str] = &["password", "token", "secret"];

/// Resolves the global configuration from all layers.
pub struct ConfigResolver<'a> {
    registry: &'a OptionRegistry,
    store: &'a dyn CredentialStore,
    presets: &'a dyn PresetResolver,
    app_mode: bool,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(registry: &'a OptionRegistry, store: &'a dyn CredentialStore) -> Self {
        Self {
            registry,
            store,
            presets: &NoPresets,
            app_mode: false,
        }
    }

    /// Use `presets` to expand preset references in every layer.
    pub fn with_presets(mut self, presets: &'a dyn PresetResolver) -> Self {
        self.presets = presets;
        self
    }

    /// Embedded/multi-tenant operation: no process default credential.
    pub fn app_mode(mut self, app_mode: bool) -> Self {
        self.app_mode = app_mode;
        self
    }

    /// Resolve configuration for `env` and `argv` (including the program name).
    pub fn resolve(
        &self,
        env: &HashMap<String, String>,
        argv: &[String],
    ) -> Result<Resolution, ConfigError> {
        debug!("Parsing configs");

        let default_config = self.presets.resolve_presets(defaults::get_config(self.registry))?;
        let file_layer = file::get_config(env)?;
        let file_config = self.presets.resolve_presets(file_layer.config)?;
        let cli_config = self.presets.resolve_presets(cli::get_config(argv, self.registry)?)?;
        let env_config = self.presets.resolve_presets(env::get_config(env, self.registry)?)?;

        let merge = |parent: &Value, child: &Value| merge_child_config(parent, Some(child), self.registry);

        let combined = merge(&merge(&file_config, &env_config), &cli_config);
        let mut config = merge(&default_config, &combined);

        if config.get("prFooter") != default_config.get("prFooter") {
            if let Value::Object(map) = &mut config {
                map.insert("customPrFooter".to_string(), Value::Bool(true));
            }
        }

        if config.get("forceCli").is_some_and(is_truthy) {
            let mut force = Map::new();
            force.insert(FORCE_KEY.to_string(), cli_config.clone());
            config = merge(&config, &Value::Object(force));
        }

        trace!(config = %redacted(&default_config), "Default config");
        debug!(config = %redacted(&file_config), "File config");
        debug!(config = %redacted(&cli_config), "CLI config");
        debug!(config = %redacted(&env_config), "Env config");
        debug!(config = %redacted(&combined), "Combined config");
        trace!(config = %redacted(&config), "Full config");

        let logging = LogSettings::from_config(&config);

        let mut global = match config {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "resolved configuration is not an object: {}",
                    other
                )))
            }
        };
        resolve_credentials(&mut global, self.store, self.app_mode)?;
        let global_view = Value::Object(global.clone());
        trace!(config = %redacted(&global_view), "Global config");

        for key in OUTPUT_ONLY_KEYS {
            global.remove(*key);
        }

        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Defaults,
            path: None,
            digest: None,
        }];
        if let Some(path) = file_layer.path {
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: file_layer.digest,
            });
        }
        if has_entries(&env_config) {
            sources.push(ConfigSource {
                origin: ConfigOrigin::Env,
                path: None,
                digest: None,
            });
        }
        if has_entries(&cli_config) {
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        Ok(Resolution {
            resolved_at: Utc::now(),
            config: Value::Object(global),
            sources,
            logging,
        })
    }
}

fn has_entries(config: &Value) -> bool {
    config.as_object().is_some_and(|map| !map.is_empty())
}

/// Copy of `value` with secret-like scalar values replaced by `[REDACTED]`.
pub fn redacted(value: &Value) -> Value {
    let mut value = value.clone();
    redact_recursive(&mut value);
    value
}

fn redact_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                let key_lower = key.to_lowercase();
                let is_secret = SECRET_KEYS.iter().any(|s| key_lower.contains(s));

                if is_secret && !val.is_object() && !val.is_array() && !val.is_null() {
                    *val = Value::String("[REDACTED]".to_string());
                } else {
                    redact_recursive(val);
                }
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(redact_recursive),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uprev_hosts::HostRules;
    use uprev_options::{BuiltinManagers, OptionDescriptor, OptionType};

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env.entry(file::CONFIG_FILE_ENV.to_string())
            .or_insert_with(|| "/nonexistent/uprev.toml".to_string());
        env
    }

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("uprev")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_cli_beats_env_beats_defaults() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let store = HostRules::new();
        let resolution = ConfigResolver::new(&registry, &store)
            .resolve(
                &env(&[("UPREV_TOKEN", "T"), ("UPREV_RANGE_STRATEGY", "pin"), ("UPREV_AUTOMERGE", "true")]),
                &argv(&["--range-strategy", "bump"]),
            )
            .unwrap();

        assert_eq!(resolution.get_str("rangeStrategy"), Some("bump"));
        assert_eq!(resolution.get_bool("automerge"), Some(true));
        assert_eq!(resolution.get_str("platform"), Some("github"));
    }

    #[test]
    fn test_custom_pr_footer_flag() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let store = HostRules::new();
        let resolver = ConfigResolver::new(&registry, &store);

        let plain = resolver.resolve(&env(&[("UPREV_TOKEN", "T")]), &argv(&[])).unwrap();
        assert!(plain.get("customPrFooter").is_none());

        let custom = resolver
            .resolve(&env(&[("UPREV_TOKEN", "T")]), &argv(&["--pr-footer", "Ours"]))
            .unwrap();
        assert_eq!(custom.get_bool("customPrFooter"), Some(true));
    }

    #[test]
    fn test_output_only_fields_removed() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let store = HostRules::new();
        let resolution = ConfigResolver::new(&registry, &store)
            .resolve(
                &env(&[("UPREV_TOKEN", "T"), ("UPREV_LOG_FILE", "/tmp/uprev.log")]),
                &argv(&["--log-level", "debug"]),
            )
            .unwrap();

        assert!(resolution.get("logFile").is_none());
        assert!(resolution.get("logFileLevel").is_none());
        assert!(resolution.get("token").is_none());
        assert_eq!(resolution.logging.log_file.as_deref(), Some("/tmp/uprev.log"));
        assert_eq!(resolution.logging.log_level, "debug");
        assert_eq!(resolution.get_str("logLevel"), Some("debug"));
    }

    #[test]
    fn test_sources_tracked() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let store = HostRules::new();
        let resolution = ConfigResolver::new(&registry, &store)
            .resolve(&env(&[("UPREV_TOKEN", "T")]), &argv(&[]))
            .unwrap();

        let origins: Vec<_> = resolution.sources.iter().map(|s| s.origin.clone()).collect();
        assert_eq!(origins, vec![ConfigOrigin::Defaults, ConfigOrigin::Env]);
    }

    #[test]
    fn test_presets_applied_to_layers() {
        struct AddLabel;
        impl PresetResolver for AddLabel {
            fn resolve_presets(&self, mut config: Value) -> Result<Value, ConfigError> {
                if let Value::Object(map) = &mut config {
                    if map.remove("extends").is_some() {
                        map.insert("labels".to_string(), json!(["preset"]));
                    }
                }
                Ok(config)
            }
        }

        let builtin = OptionRegistry::builtin(&BuiltinManagers);
        let mut options = builtin.options().to_vec();
        options.push(OptionDescriptor::new("extends", OptionType::Array));
        let registry = OptionRegistry::new(options).unwrap();
        let store = HostRules::new();
        let resolution = ConfigResolver::new(&registry, &store)
            .with_presets(&AddLabel)
            .resolve(&env(&[("UPREV_TOKEN", "T"), ("UPREV_EXTENDS", "base")]), &argv(&[]))
            .unwrap();
        assert_eq!(resolution.config["labels"], json!(["preset"]));
    }

    #[test]
    fn test_redacted() {
        let value = json!({
            "token": "abc",
            "hostRules": [{"password": "p", "username": "u"}],
            "clientSecret": null,
            "labels": ["token"]
        });
        assert_eq!(
            redacted(&value),
            json!({
                "token": "[REDACTED]",
                "hostRules": [{"password": "[REDACTED]", "username": "u"}],
                "clientSecret": null,
                "labels": ["token"]
            })
        );
    }
}
