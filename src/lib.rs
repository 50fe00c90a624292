//! uprev configuration core
//!
//! Resolves the effective configuration of the uprev dependency update bot
//! from built-in defaults, a config file, environment variables and
//! command-line arguments, derives manager- and stage-scoped views of it,
//! and registers the host credentials it describes.

pub mod auth;
pub mod config;
pub mod logging;

pub use auth::resolve_credentials;
pub use config::{
    filter_config, get_manager_config, merge_child_config, ConfigError, ConfigResolver,
    LogSettings, Resolution,
};
pub use uprev_hosts::{CredentialStore, HostRule, HostRules};
pub use uprev_options::{BuiltinManagers, ManagerCatalog, OptionRegistry, Stage};
