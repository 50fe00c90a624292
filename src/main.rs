//! uprev CLI
//!
//! Entry point for the `uprev` command-line tool. Resolves configuration and
//! prints the global configuration plus one derived configuration per
//! enabled manager as JSON.

use std::collections::HashMap;
use std::process;

use serde_json::{json, Map, Value};
use tracing::info;
use uprev::config::ConfigError;
use uprev::logging::init_logging;
use uprev::{BuiltinManagers, ConfigResolver, HostRules, OptionRegistry};

/// Set to `true` when uprev runs embedded in a multi-tenant host.
const APP_MODE_ENV: &str = "UPREV_APP_MODE";

fn main() {
    let env: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    let argv: Vec<String> = std::env::args().collect();

    let catalog = BuiltinManagers;
    let registry = OptionRegistry::builtin(&catalog);
    let store = HostRules::new();
    let app_mode = env.get(APP_MODE_ENV).is_some_and(|v| v == "true");

    let resolution = match ConfigResolver::new(&registry, &store)
        .app_mode(app_mode)
        .resolve(&env, &argv)
    {
        Ok(resolution) => resolution,
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&resolution.logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }
    info!(sources = resolution.sources.len(), "Configuration resolved");

    let managers: Map<String, Value> = resolution
        .get("enabledManagers")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(|manager| {
            let config = resolution.manager_config(manager, &catalog, &registry);
            (manager.to_string(), config)
        })
        .collect();

    let output = json!({
        "config": resolution.config,
        "sources": resolution.sources,
        "managers": managers,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
