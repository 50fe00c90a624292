//! Built-in defaults (lowest precedence layer)
//!
//! Every registered option with a non-null default contributes its value.

use serde_json::Value;
use uprev_options::{default_values, OptionRegistry};

/// Default configuration object for `registry`.
pub fn get_config(registry: &OptionRegistry) -> Value {
    default_values(registry)
}
