//! Configuration merge logic
//!
//! Combines a parent and a child configuration object:
//! - Top-level keys: child overlays parent
//! - Mergeable arrays (both sides truthy): parent entries, then child entries
//! - Mergeable arrays with an empty child array: parent kept
//! - Mergeable objects (both sides truthy): recursive merge
//! - `force` block: its keys overwrite the merged result at the same level

use serde_json::{Map, Value};
use tracing::trace;
use uprev_options::{MergeKind, OptionRegistry};

/// Reserved key whose entries win over every other layer.
pub const FORCE_KEY: &str = "force";

/// Merge `child` into `parent`, returning a new configuration object.
///
/// Neither input is modified. A child that is absent, `null`, empty, or not an
/// object contributes nothing and the result is a copy of `parent`.
pub fn merge_child_config(parent: &Value, child: Option<&Value>, registry: &OptionRegistry) -> Value {
    trace!(parent = %parent, child = ?child, "merge_child_config");

    let child_config = match child {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return parent.clone(),
    };
    let empty = Map::new();
    let parent_config = parent.as_object().unwrap_or(&empty);

    let mut config = parent_config.clone();
    for (key, value) in child_config {
        config.insert(key.clone(), value.clone());
    }

    for option in registry.options().iter().filter(|o| o.mergeable) {
        let (parent_value, child_value) = match (
            parent_config.get(&option.name),
            child_config.get(&option.name),
        ) {
            (Some(p), Some(c)) if is_truthy(p) && is_truthy(c) => (p, c),
            // An empty child array leaves a non-empty parent array untouched.
            (Some(p @ Value::Array(_)), Some(Value::Array(c)))
                if c.is_empty()
                    && is_truthy(p)
                    && option.option_type.merge_kind() == MergeKind::Array =>
            {
                config.insert(option.name.clone(), p.clone());
                continue;
            }
            _ => continue,
        };
        trace!(option = %option.name, "mergeable option");

        let merged = match (option.option_type.merge_kind(), parent_value, child_value) {
            (MergeKind::Array, Value::Array(p), Value::Array(c)) => {
                Value::Array(p.iter().chain(c).cloned().collect())
            }
            (MergeKind::Object, Value::Object(_), Value::Object(_)) => {
                merge_child_config(parent_value, Some(child_value), registry)
            }
            _ => continue,
        };
        trace!(result = %merged, "Merged config.{}", option.name);
        config.insert(option.name.clone(), merged);
    }

    apply_force(&mut config);
    Value::Object(config)
}

fn apply_force(config: &mut Map<String, Value>) {
    if let Some(Value::Object(force)) = config.get(FORCE_KEY).cloned() {
        for (key, value) in force {
            config.insert(key, value);
        }
    }
}

/// Truthiness used for merge and flag checks.
///
/// `null`, `false`, zero, the empty string and the empty array are falsy.
/// Objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}
