//! Configuration resolution
//!
//! Resolves the global configuration from four layers:
//! 1. Built-in defaults
//! 2. Config file (`UPREV_CONFIG_FILE`, default `uprev.toml`)
//! 3. Environment variables (`UPREV_*`)
//! 4. Command-line arguments
//!
//! and derives manager-scoped and stage-scoped views from it.

pub mod cli;
mod coerce;
pub mod defaults;
mod effective;
pub mod env;
mod error;
pub mod file;
mod filter;
mod manager;
mod merge;
mod presets;
mod resolve;

pub use coerce::coerce;
pub use effective::{ConfigOrigin, ConfigSource, LogSettings, Resolution};
pub use error::ConfigError;
pub use filter::{filter_config, filter_for_stage};
pub use manager::get_manager_config;
pub use merge::{is_truthy, merge_child_config, FORCE_KEY};
pub use presets::{NoPresets, PresetResolver};
pub use resolve::{redacted, ConfigResolver, OUTPUT_ONLY_KEYS};
