//! String-to-value coercion for environment and command-line input.

use serde_json::Value;
use uprev_options::{OptionDescriptor, OptionType};

use super::error::ConfigError;

/// Convert a raw string into a value of `option`'s declared type.
///
/// Arrays accept JSON (when the input starts with `[`) or a comma-separated
/// list; an empty string is an empty list.
pub fn coerce(option: &OptionDescriptor, raw: &str) -> Result<Value, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        option: option.name.clone(),
        value: raw.to_string(),
        reason,
    };

    match option.option_type {
        OptionType::String => Ok(Value::String(raw.to_string())),
        OptionType::Boolean => match raw.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid("expected true or false".to_string())),
        },
        OptionType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| invalid(e.to_string())),
        OptionType::Array => {
            let trimmed = raw.trim();
            if trimmed.starts_with('[') {
                serde_json::from_str::<Value>(trimmed)
                    .map_err(|e| invalid(e.to_string()))
                    .and_then(|value| {
                        if value.is_array() {
                            Ok(value)
                        } else {
                            Err(invalid("expected a JSON array".to_string()))
                        }
                    })
            } else if trimmed.is_empty() {
                Ok(Value::Array(Vec::new()))
            } else {
                Ok(Value::Array(
                    trimmed
                        .split(',')
                        .map(|item| Value::String(item.trim().to_string()))
                        .collect(),
                ))
            }
        }
        OptionType::Object => {
            let value: Value =
                serde_json::from_str(raw.trim()).map_err(|e| invalid(e.to_string()))?;
            if value.is_object() {
                Ok(value)
            } else {
                Err(invalid("expected a JSON object".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(option_type: OptionType) -> OptionDescriptor {
        OptionDescriptor::new("sample", option_type)
    }

    #[test]
    fn test_string_verbatim() {
        let value = coerce(&option(OptionType::String), " spaced ").unwrap();
        assert_eq!(value, json!(" spaced "));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(coerce(&option(OptionType::Boolean), "true").unwrap(), json!(true));
        assert_eq!(coerce(&option(OptionType::Boolean), "false").unwrap(), json!(false));
        let err = coerce(&option(OptionType::Boolean), "yes").unwrap_err();
        assert!(err.to_string().contains("sample"));
    }

    #[test]
    fn test_integer() {
        assert_eq!(coerce(&option(OptionType::Integer), "42").unwrap(), json!(42));
        assert!(coerce(&option(OptionType::Integer), "4.2").is_err());
    }

    #[test]
    fn test_array_list() {
        assert_eq!(
            coerce(&option(OptionType::Array), "a, b ,c").unwrap(),
            json!(["a", "b", "c"])
        );
        assert_eq!(coerce(&option(OptionType::Array), "").unwrap(), json!([]));
    }

    #[test]
    fn test_array_json() {
        assert_eq!(
            coerce(&option(OptionType::Array), r#"[{"platform": "github"}]"#).unwrap(),
            json!([{"platform": "github"}])
        );
        assert!(coerce(&option(OptionType::Array), "[not json").is_err());
    }

    #[test]
    fn test_object_json() {
        assert_eq!(
            coerce(&option(OptionType::Object), r#"{"enabled": true}"#).unwrap(),
            json!({"enabled": true})
        );
        assert!(coerce(&option(OptionType::Object), "[1]").is_err());
    }
}
