//! Config file layer
//!
//! Reads the file named by `UPREV_CONFIG_FILE` (default `uprev.toml`).
//! `.json` files are parsed as JSON, everything else as TOML. A missing file
//! is an empty layer.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_FILE_ENV: &str = "UPREV_CONFIG_FILE";

/// File used when `UPREV_CONFIG_FILE` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "uprev.toml";

/// A parsed config file and where it came from.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub config: Value,
    /// Path that was read (None when no file exists)
    pub path: Option<PathBuf>,
    /// SHA-256 digest of the raw file bytes
    pub digest: Option<String>,
}

/// Read the config file layer for `env`.
pub fn get_config(env: &HashMap<String, String>) -> Result<FileConfig, ConfigError> {
    let path = env
        .get(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match load_config_file(&path) {
        Ok((config, digest)) => Ok(FileConfig {
            config,
            path: Some(path),
            digest: Some(digest),
        }),
        Err(LoadError::NotFound) => {
            debug!(path = %path.display(), "No config file found");
            Ok(FileConfig {
                config: Value::Object(Map::new()),
                path: None,
                digest: None,
            })
        }
        Err(LoadError::Config(e)) => Err(e),
    }
}

enum LoadError {
    NotFound,
    Config(ConfigError),
}

/// Load and parse a config file, returning the value and digest
fn load_config_file(path: &Path) -> Result<(Value, String), LoadError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Config(ConfigError::IoError(format!("{}: {}", path.display(), e))),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes).map_err(|e| {
        LoadError::Config(ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value = if is_json {
        serde_json::from_str::<Value>(&contents)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    } else {
        toml::from_str::<toml::Value>(&contents)
            .map(toml_to_json)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }
    .map_err(LoadError::Config)?;

    if !value.is_object() {
        return Err(LoadError::Config(ConfigError::ParseError(format!(
            "{}: top level must be an object",
            path.display()
        ))));
    }

    Ok((value, digest))
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn env_for(path: &Path) -> HashMap<String, String> {
        HashMap::from([(CONFIG_FILE_ENV.to_string(), path.display().to_string())])
    }

    #[test]
    fn test_load_toml_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "platform = \"gitlab\"").unwrap();
        writeln!(temp, "labels = [\"deps\"]").unwrap();
        writeln!(temp, "[npm]").unwrap();
        writeln!(temp, "automerge = true").unwrap();

        let file = get_config(&env_for(temp.path())).unwrap();
        assert_eq!(
            file.config,
            json!({"platform": "gitlab", "labels": ["deps"], "npm": {"automerge": true}})
        );
        assert_eq!(file.path.as_deref(), Some(temp.path()));
        assert_eq!(file.digest.unwrap().len(), 64);
    }

    #[test]
    fn test_load_json_file() {
        let mut temp = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, r#"{{"prFooter": "custom", "hostRules": []}}"#).unwrap();

        let file = get_config(&env_for(temp.path())).unwrap();
        assert_eq!(file.config["prFooter"], "custom");
        assert_eq!(file.config["hostRules"], json!([]));
    }

    #[test]
    fn test_missing_file_is_empty_layer() {
        let dir = tempfile::tempdir().unwrap();
        let file = get_config(&env_for(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(file.config, json!({}));
        assert!(file.path.is_none());
        assert!(file.digest.is_none());
    }

    #[test]
    fn test_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "platform = ").unwrap();

        let err = get_config(&env_for(temp.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_json_top_level_must_be_object() {
        let mut temp = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, "[1, 2]").unwrap();

        let err = get_config(&env_for(temp.path())).unwrap_err();
        assert!(err.to_string().contains("top level"));
    }

    #[test]
    fn test_toml_to_json_scalars() {
        let value: toml::Value = toml::from_str("a = 1.5\nb = 2\nc = false").unwrap();
        assert_eq!(toml_to_json(value), json!({"a": 1.5, "b": 2, "c": false}));
    }
}
