//! Preset resolution hook.

use serde_json::Value;

use super::error::ConfigError;

/// Expands preset references in a raw configuration layer.
///
/// Implementations return a configuration of the same shape with every
/// preset reference replaced by its contents.
pub trait PresetResolver {
    fn resolve_presets(&self, config: Value) -> Result<Value, ConfigError>;
}

/// Resolver that leaves configuration untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPresets;

impl PresetResolver for NoPresets {
    fn resolve_presets(&self, config: Value) -> Result<Value, ConfigError> {
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_presets_is_identity() {
        let config = json!({"extends": ["config:base"], "labels": ["deps"]});
        assert_eq!(NoPresets.resolve_presets(config.clone()).unwrap(), config);
    }
}
