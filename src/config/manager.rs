//! Manager-scoped configuration.

use serde_json::Value;
use uprev_options::{ManagerCatalog, OptionRegistry};

use super::merge::merge_child_config;

/// Derive the configuration seen by `manager`.
///
/// The language block (if the manager has a language) and then the manager
/// block are merged over `config`. Every language- and manager-named block is
/// then removed so sibling overrides never leak into the result.
pub fn get_manager_config(
    config: &Value,
    manager: &str,
    catalog: &dyn ManagerCatalog,
    registry: &OptionRegistry,
) -> Value {
    let language = catalog.language(manager);

    let mut manager_config = match language {
        Some(language) => merge_child_config(config, config.get(language), registry),
        None => config.clone(),
    };
    manager_config = merge_child_config(&manager_config, config.get(manager), registry);

    if let Value::Object(map) = &mut manager_config {
        for name in catalog.language_list().iter().chain(&catalog.manager_list()) {
            map.remove(name);
        }
        match language {
            Some(language) => {
                map.insert("language".to_string(), Value::String(language.to_string()));
            }
            None => {
                map.remove("language");
            }
        }
        map.insert("manager".to_string(), Value::String(manager.to_string()));
    }
    manager_config
}
