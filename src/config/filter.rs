//! Stage-scoped configuration views.

use serde_json::Value;
use tracing::trace;
use uprev_options::{OptionRegistry, Stage};

/// Copy of `config` without options whose stage precedes `target_stage`.
///
/// Options with no declared stage are always kept. A target that does not
/// name a stage filters nothing.
pub fn filter_config(config: &Value, target_stage: &str, registry: &OptionRegistry) -> Value {
    trace!(config = %config, "filter_config('{}')", target_stage);
    match target_stage.parse::<Stage>() {
        Ok(stage) => filter_for_stage(config, stage, registry),
        Err(_) => config.clone(),
    }
}

/// Typed form of [`filter_config`].
pub fn filter_for_stage(config: &Value, target: Stage, registry: &OptionRegistry) -> Value {
    let mut output = config.clone();
    if let Value::Object(map) = &mut output {
        for option in registry.options() {
            if option.stage.is_some_and(|stage| stage < target) {
                map.remove(&option.name);
            }
        }
    }
    output
}
