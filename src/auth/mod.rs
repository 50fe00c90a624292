//! Platform Authentication
//!
//! Turns the authentication fields of a resolved configuration into host
//! rules, registers them with the credential store, and marks the platform
//! credential as the process default.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use tracing::{debug, info};
use uprev_hosts::{platform_info, CredentialStore, HostQuery, HostRule};

use crate::config::ConfigError;

/// Keys consumed by credential resolution and removed from the config.
pub const TRANSIENT_KEYS: &[&str] = &["hostRules", "token", "username", "password"];

/// Resolve and register credentials for the configured platform.
///
/// On success `config` no longer holds any of [`TRANSIENT_KEYS`] and the
/// returned rule is the credential matched for the platform. Unless
/// `app_mode` is set, that rule is also registered as the default.
pub fn resolve_credentials(
    config: &mut Map<String, Value>,
    store: &dyn CredentialStore,
    app_mode: bool,
) -> Result<HostRule, ConfigError> {
    let platform = string_field(config, "platform").unwrap_or_default();
    let info = platform_info(&platform)
        .ok_or_else(|| ConfigError::UnsupportedPlatform(platform.clone()))?;

    let endpoint = string_field(config, "endpoint").or_else(|| info.endpoint.map(String::from));
    let username = string_field(config, "username");
    let password = string_field(config, "password");
    let mut token = string_field(config, "token");

    if let (Some(username), Some(password)) = (&username, &password) {
        info!("Using username and password to generate token");
        token = Some(STANDARD.encode(format!("{}:{}", username, password)));
    }
    let token = token.ok_or_else(|| ConfigError::MissingCredentials {
        platform: platform.clone(),
        endpoint: endpoint.clone(),
    })?;

    let mut host_rules = take_host_rules(config)?;
    host_rules.push(HostRule {
        platform: Some(platform.clone()),
        endpoint: endpoint.clone(),
        username,
        password,
        token: Some(token.clone()),
        ..Default::default()
    });
    for rule in host_rules {
        store.update(rule)?;
    }
    for key in TRANSIENT_KEYS {
        config.remove(*key);
    }

    let query = HostQuery {
        platform: platform.clone(),
        endpoint: endpoint.clone(),
        ..Default::default()
    };
    let fallback = HostRule {
        platform: Some(platform),
        endpoint,
        token: Some(token),
        ..Default::default()
    };
    let credentials = store.find(&query, Some(&fallback)).unwrap_or(fallback);

    if app_mode {
        debug!("App mode: skipping default credential registration");
    } else {
        store.update(HostRule {
            default: true,
            ..credentials.clone()
        })?;
    }
    Ok(credentials)
}

/// Non-empty string value of `key`.
fn string_field(config: &Map<String, Value>, key: &str) -> Option<String> {
    config
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn take_host_rules(config: &mut Map<String, Value>) -> Result<Vec<HostRule>, ConfigError> {
    match config.remove("hostRules") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rules)) => rules
            .into_iter()
            .map(|rule| {
                serde_json::from_value(rule).map_err(|e| ConfigError::InvalidHostRule(e.to_string()))
            })
            .collect(),
        Some(other) => Err(ConfigError::InvalidHostRule(format!(
            "expected an array, got {}",
            other
        ))),
    }
}
