//! Environment variable layer
//!
//! Each option with `env = true` is read from `UPREV_<SCREAMING_SNAKE_NAME>`.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use uprev_options::OptionRegistry;

use super::coerce::coerce;
use super::error::ConfigError;

/// Prefix shared by every option variable.
pub const ENV_PREFIX: &str = "UPREV_";

/// Token for github.com, registered as an extra host rule.
pub const GITHUB_COM_TOKEN_ENV: &str = "GITHUB_COM_TOKEN";

/// Read the environment layer. Empty variables are ignored.
pub fn get_config(
    env: &HashMap<String, String>,
    registry: &OptionRegistry,
) -> Result<Value, ConfigError> {
    let mut config = Map::new();

    for option in registry.options().iter().filter(|o| o.env) {
        let raw = match env.get(&option.env_name(ENV_PREFIX)) {
            Some(raw) if !raw.is_empty() => raw,
            _ => continue,
        };
        config.insert(option.name.clone(), coerce(option, raw)?);
    }

    if let Some(token) = env.get(GITHUB_COM_TOKEN_ENV).filter(|t| !t.is_empty()) {
        let rule = json!({
            "platform": "github",
            "endpoint": "https://api.github.com/",
            "token": token,
        });
        match config.get_mut("hostRules") {
            Some(Value::Array(rules)) => rules.push(rule),
            _ => {
                config.insert("hostRules".to_string(), Value::Array(vec![rule]));
            }
        }
    }

    Ok(Value::Object(config))
}
