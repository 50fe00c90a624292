//! Option registry and the built-in option definitions.

use std::collections::HashSet;

use serde_json::{json, Value};

use crate::managers::ManagerCatalog;
use crate::option::{OptionDescriptor, OptionType};
use crate::stage::Stage;

/// Errors raised while assembling a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate option name: '{0}'")]
    DuplicateName(String),
}

/// Ordered set of option descriptors with unique names.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: Vec<OptionDescriptor>,
}

impl OptionRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(options: Vec<OptionDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.name.as_str()) {
                return Err(RegistryError::DuplicateName(option.name.clone()));
            }
        }
        Ok(Self { options })
    }

    /// Built-in options plus one mergeable block per language and manager.
    pub fn builtin(catalog: &dyn ManagerCatalog) -> Self {
        let mut options = builtin_options();
        let reserved: HashSet<String> = options.iter().map(|o| o.name.clone()).collect();
        for name in catalog.language_list().into_iter().chain(catalog.manager_list()) {
            if reserved.contains(&name) {
                continue;
            }
            options.push(
                OptionDescriptor::new(name, OptionType::Object)
                    .mergeable()
                    .stage(Stage::Package)
                    .no_cli()
                    .no_env(),
            );
        }
        Self { options }
    }

    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

fn builtin_options() -> Vec<OptionDescriptor> {
    vec![
        // Logging
        OptionDescriptor::new("logLevel", OptionType::String)
            .stage(Stage::Global)
            .default_value(json!("info")),
        OptionDescriptor::new("logFile", OptionType::String).stage(Stage::Global),
        OptionDescriptor::new("logFileLevel", OptionType::String)
            .stage(Stage::Global)
            .default_value(json!("debug")),
        // Platform and authentication
        OptionDescriptor::new("platform", OptionType::String)
            .stage(Stage::Global)
            .default_value(json!("github")),
        OptionDescriptor::new("endpoint", OptionType::String).stage(Stage::Global),
        OptionDescriptor::new("token", OptionType::String).stage(Stage::Global),
        OptionDescriptor::new("username", OptionType::String).stage(Stage::Global),
        OptionDescriptor::new("password", OptionType::String).stage(Stage::Global),
        OptionDescriptor::new("hostRules", OptionType::Array)
            .stage(Stage::Global)
            .default_value(json!([])),
        // Layering
        OptionDescriptor::new("forceCli", OptionType::Boolean)
            .stage(Stage::Global)
            .default_value(json!(false)),
        OptionDescriptor::new("force", OptionType::Object).mergeable().no_cli().no_env(),
        OptionDescriptor::new("repositories", OptionType::Array)
            .stage(Stage::Global)
            .default_value(json!([]))
            .no_cli(),
        // Repository
        OptionDescriptor::new("onboarding", OptionType::Boolean)
            .stage(Stage::Repository)
            .default_value(json!(true)),
        OptionDescriptor::new("requireConfig", OptionType::Boolean)
            .stage(Stage::Repository)
            .default_value(json!(false)),
        OptionDescriptor::new("baseBranches", OptionType::Array)
            .stage(Stage::Repository)
            .default_value(json!([])),
        OptionDescriptor::new("enabledManagers", OptionType::Array)
            .stage(Stage::Repository)
            .default_value(json!([])),
        // Package
        OptionDescriptor::new("ignoreDeps", OptionType::Array)
            .mergeable()
            .stage(Stage::Package)
            .default_value(json!([])),
        OptionDescriptor::new("labels", OptionType::Array)
            .mergeable()
            .stage(Stage::Package)
            .default_value(json!([])),
        OptionDescriptor::new("packageRules", OptionType::Array)
            .mergeable()
            .stage(Stage::Package)
            .default_value(json!([]))
            .no_cli(),
        OptionDescriptor::new("major", OptionType::Object)
            .mergeable()
            .stage(Stage::Package)
            .default_value(json!({})),
        OptionDescriptor::new("minor", OptionType::Object)
            .mergeable()
            .stage(Stage::Package)
            .default_value(json!({})),
        OptionDescriptor::new("rangeStrategy", OptionType::String)
            .stage(Stage::Package)
            .default_value(json!("replace")),
        // Branch
        OptionDescriptor::new("schedule", OptionType::Array)
            .stage(Stage::Branch)
            .default_value(json!([])),
        OptionDescriptor::new("automerge", OptionType::Boolean)
            .stage(Stage::Branch)
            .default_value(json!(false)),
        OptionDescriptor::new("commitMessage", OptionType::String)
            .stage(Stage::Branch)
            .default_value(json!("Update {{depName}} to {{newVersion}}")),
        OptionDescriptor::new("lockFileMaintenance", OptionType::Object)
            .mergeable()
            .stage(Stage::Branch)
            .default_value(json!({
                "enabled": false,
                "schedule": ["before 5am on monday"]
            })),
        // Pull request
        OptionDescriptor::new("prTitle", OptionType::String).stage(Stage::Pr),
        OptionDescriptor::new("prFooter", OptionType::String)
            .stage(Stage::Pr)
            .default_value(json!("This PR has been generated by uprev.")),
        OptionDescriptor::new("prConcurrentLimit", OptionType::Integer)
            .stage(Stage::Pr)
            .default_value(json!(0)),
    ]
}

/// Default value of every option, keyed by name.
pub fn default_values(registry: &OptionRegistry) -> Value {
    let map = registry
        .options()
        .iter()
        .filter(|o| !o.default.is_null())
        .map(|o| (o.name.clone(), o.default.clone()))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::BuiltinManagers;

    #[test]
    fn test_builtin_names_unique() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let rebuilt = OptionRegistry::new(registry.options().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = OptionRegistry::new(vec![
            OptionDescriptor::new("labels", OptionType::Array),
            OptionDescriptor::new("labels", OptionType::Array),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateName(name)) if name == "labels"));
    }

    #[test]
    fn test_manager_and_language_blocks_registered() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let npm = registry.get("npm").unwrap();
        assert!(npm.mergeable);
        assert_eq!(npm.option_type, OptionType::Object);
        assert_eq!(npm.stage, Some(Stage::Package));
        assert!(!npm.cli);

        let js = registry.get("js").unwrap();
        assert!(js.mergeable);
    }

    #[test]
    fn test_force_has_no_stage() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let force = registry.get("force").unwrap();
        assert!(force.mergeable);
        assert!(force.stage.is_none());
    }

    #[test]
    fn test_default_values_skip_null() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let defaults = default_values(&registry);
        assert_eq!(defaults["platform"], "github");
        assert_eq!(defaults["hostRules"], json!([]));
        assert!(defaults.get("token").is_none());
        assert!(defaults.get("npm").is_none());
    }
}
