//! In-memory host credential store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use crate::platform::platform_info;
use crate::rule::{HostQuery, HostRule};

/// Errors raised when registering a host rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostRuleError {
    #[error("Failed to set configuration: no platform specified")]
    MissingPlatform,

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Registry of host credentials.
pub trait CredentialStore {
    /// Register `rule`, merging it into any entry for the same platform and host.
    fn update(&self, rule: HostRule) -> Result<(), HostRuleError>;

    /// Best match for `query` with the set fields of `overrides` laid over it.
    ///
    /// When nothing matches, `overrides` is returned as is.
    fn find(&self, query: &HostQuery, overrides: Option<&HostRule>) -> Option<HostRule>;
}

/// Thread-safe credential store keyed by platform, then host.
///
/// Entries within a platform keep registration order, so an unqualified
/// lookup returns the first rule registered for that platform.
#[derive(Debug, Default)]
pub struct HostRules {
    hosts: RwLock<BTreeMap<String, Vec<(String, HostRule)>>>,
}

impl HostRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule flagged as the default credential for `platform`.
    pub fn default_rule(&self, platform: &str) -> Option<HostRule> {
        let hosts = self.hosts.read().unwrap_or_else(|e| e.into_inner());
        hosts
            .get(platform)?
            .iter()
            .find(|(_, rule)| rule.default)
            .map(|(_, rule)| rule.clone())
    }

    /// Every stored rule for `platform`, in registration order.
    pub fn rules(&self, platform: &str) -> Vec<HostRule> {
        let hosts = self.hosts.read().unwrap_or_else(|e| e.into_inner());
        hosts
            .get(platform)
            .map(|entries| entries.iter().map(|(_, rule)| rule.clone()).collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        self.hosts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl CredentialStore for HostRules {
    fn update(&self, rule: HostRule) -> Result<(), HostRuleError> {
        let platform = rule
            .platform
            .clone()
            .ok_or(HostRuleError::MissingPlatform)?;
        if platform_info(&platform).is_none() {
            return Err(HostRuleError::UnsupportedPlatform(platform));
        }

        let key = rule.host_key();
        debug!(platform = %platform, host = %key, "Updating host rule");

        let mut hosts = self.hosts.write().unwrap_or_else(|e| e.into_inner());
        let entries = hosts.entry(platform).or_default();
        match entries.iter_mut().find(|(host, _)| *host == key) {
            Some((_, existing)) => existing.overlay(&rule),
            None => entries.push((key, rule)),
        }
        Ok(())
    }

    fn find(&self, query: &HostQuery, overrides: Option<&HostRule>) -> Option<HostRule> {
        let hosts = self.hosts.read().unwrap_or_else(|e| e.into_inner());
        let found = hosts.get(&query.platform).and_then(|entries| match query.host_key() {
            Some(key) => entries.iter().find(|(host, _)| *host == key),
            None => entries.first(),
        });

        match (found, overrides) {
            (Some((_, rule)), Some(overrides)) => {
                let mut merged = rule.clone();
                merged.overlay(overrides);
                Some(merged)
            }
            (Some((_, rule)), None) => Some(rule.clone()),
            (None, overrides) => overrides.cloned(),
        }
    }
}
