//! Command-line layer
//!
//! The argument parser is generated from the option registry: every option
//! with `cli = true` becomes `--kebab-case-name <value>`. Boolean options
//! also accept a bare `--flag`. Positional arguments are repositories.

use clap::{Arg, ArgAction, Command};
use serde_json::{Map, Value};
use uprev_options::{OptionRegistry, OptionType};

use super::coerce::coerce;
use super::error::ConfigError;

const REPOSITORIES: &str = "repositories";

/// Build the `uprev` argument parser for `registry`.
pub fn command(registry: &OptionRegistry) -> Command {
    let mut command = Command::new("uprev")
        .about("Automated dependency updates")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(REPOSITORIES)
                .value_name("REPOSITORY")
                .help("Repositories to process")
                .num_args(0..)
                .action(ArgAction::Append),
        );

    for option in registry.options().iter().filter(|o| o.cli) {
        let mut arg = Arg::new(option.name.clone())
            .long(option.cli_name())
            .value_name(value_name(option.option_type))
            .action(ArgAction::Set);
        if option.option_type == OptionType::Boolean {
            arg = arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true");
        }
        command = command.arg(arg);
    }
    command
}

fn value_name(option_type: OptionType) -> &'static str {
    match option_type {
        OptionType::Array => "LIST",
        OptionType::Object => "JSON",
        OptionType::String => "STRING",
        OptionType::Boolean => "BOOL",
        OptionType::Integer => "NUMBER",
    }
}

/// Parse `argv` (including the program name) into the CLI layer.
pub fn get_config(argv: &[String], registry: &OptionRegistry) -> Result<Value, ConfigError> {
    let matches = command(registry).try_get_matches_from(argv)?;
    let mut config = Map::new();

    for option in registry.options().iter().filter(|o| o.cli) {
        if let Some(raw) = matches.get_one::<String>(&option.name) {
            config.insert(option.name.clone(), coerce(option, raw)?);
        }
    }

    if let Some(repositories) = matches.get_many::<String>(REPOSITORIES) {
        let repositories = repositories.cloned().map(Value::String).collect();
        config.insert(REPOSITORIES.to_string(), Value::Array(repositories));
    }

    Ok(Value::Object(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uprev_options::BuiltinManagers;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("uprev")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_command_is_valid() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        command(&registry).debug_assert();
    }

    #[test]
    fn test_parses_typed_options() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let config = get_config(
            &argv(&[
                "--platform",
                "gitlab",
                "--labels=a,b",
                "--pr-concurrent-limit",
                "3",
                "--lock-file-maintenance",
                r#"{"enabled": true}"#,
            ]),
            &registry,
        )
        .unwrap();

        assert_eq!(
            config,
            json!({
                "platform": "gitlab",
                "labels": ["a", "b"],
                "prConcurrentLimit": 3,
                "lockFileMaintenance": {"enabled": true}
            })
        );
    }

    #[test]
    fn test_bare_boolean_flag() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let config =
            get_config(&argv(&["--force-cli", "--automerge=false", "org/repo"]), &registry)
                .unwrap();

        assert_eq!(config["forceCli"], true);
        assert_eq!(config["automerge"], false);
        assert_eq!(config["repositories"], json!(["org/repo"]));
    }

    #[test]
    fn test_repositories_positional() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let config = get_config(&argv(&["org/a", "org/b"]), &registry).unwrap();
        assert_eq!(config, json!({"repositories": ["org/a", "org/b"]}));
    }

    #[test]
    fn test_no_arguments_is_empty_layer() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        assert_eq!(get_config(&argv(&[]), &registry).unwrap(), json!({}));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let err = get_config(&argv(&["--no-such-option", "x"]), &registry).unwrap_err();
        assert!(matches!(err, ConfigError::Cli(_)));
    }

    #[test]
    fn test_block_options_not_exposed() {
        let registry = OptionRegistry::builtin(&BuiltinManagers);
        let err = get_config(&argv(&["--npm", "{}"]), &registry).unwrap_err();
        assert!(matches!(err, ConfigError::Cli(_)));
    }
}
