//! Option descriptor types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stage::Stage;

/// Declared data type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Array,
    Object,
    String,
    Boolean,
    Integer,
}

/// How two values of a mergeable option are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// Parent entries followed by child entries.
    Array,
    /// Recursive configuration merge.
    Object,
    /// Child replaces parent.
    Scalar,
}

impl OptionType {
    pub fn merge_kind(&self) -> MergeKind {
        match self {
            OptionType::Array => MergeKind::Array,
            OptionType::Object => MergeKind::Object,
            OptionType::String | OptionType::Boolean | OptionType::Integer => MergeKind::Scalar,
        }
    }
}

/// A recognized configuration option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Option name as it appears in configuration objects (camelCase).
    pub name: String,

    /// Whether values from two layers are combined instead of replaced.
    #[serde(default)]
    pub mergeable: bool,

    /// Declared data type.
    #[serde(rename = "type")]
    pub option_type: OptionType,

    /// Earliest stage the option is meaningful at (None = never filtered).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    /// Built-in default value.
    #[serde(default)]
    pub default: Value,

    /// Settable from the command line.
    #[serde(default = "default_true")]
    pub cli: bool,

    /// Settable from the environment.
    #[serde(default = "default_true")]
    pub env: bool,
}

fn default_true() -> bool {
    true
}

impl OptionDescriptor {
    pub fn new(name: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            name: name.into(),
            mergeable: false,
            option_type,
            stage: None,
            default: Value::Null,
            cli: true,
            env: true,
        }
    }

    pub fn mergeable(mut self) -> Self {
        self.mergeable = true;
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn no_cli(mut self) -> Self {
        self.cli = false;
        self
    }

    pub fn no_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Long command-line flag name (`prFooter` -> `pr-footer`).
    pub fn cli_name(&self) -> String {
        split_camel(&self.name, '-').to_lowercase()
    }

    /// Environment variable name with the given prefix (`prFooter` -> `UPREV_PR_FOOTER`).
    pub fn env_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, split_camel(&self.name, '_').to_uppercase())
    }
}

fn split_camel(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push(separator);
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c);
    }
    out
}
