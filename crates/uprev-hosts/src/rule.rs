//! Host credential records.

use serde::{Deserialize, Serialize};

/// Canonical authentication for one platform/endpoint pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Explicit host name; derived from `endpoint` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Process-wide default credential.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

/// Criteria for looking up a stored rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostQuery {
    pub platform: String,
    pub host: Option<String>,
    pub endpoint: Option<String>,
}

impl HostQuery {
    pub fn platform(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Default::default()
        }
    }

    pub(crate) fn host_key(&self) -> Option<String> {
        self.host
            .as_deref()
            .map(str::to_lowercase)
            .or_else(|| self.endpoint.as_deref().and_then(host_of))
    }
}

impl HostRule {
    /// Key this rule is stored under within its platform.
    pub fn host_key(&self) -> String {
        self.host
            .as_deref()
            .map(str::to_lowercase)
            .or_else(|| self.endpoint.as_deref().and_then(host_of))
            .unwrap_or_default()
    }

    /// Copy every field set on `other` over this rule.
    pub fn overlay(&mut self, other: &HostRule) {
        fn take(target: &mut Option<String>, source: &Option<String>) {
            if source.is_some() {
                target.clone_from(source);
            }
        }
        take(&mut self.platform, &other.platform);
        take(&mut self.endpoint, &other.endpoint);
        take(&mut self.host, &other.host);
        take(&mut self.username, &other.username);
        take(&mut self.password, &other.password);
        take(&mut self.token, &other.token);
        if other.default {
            self.default = true;
        }
    }
}

/// Host part of an endpoint URL, lowercased. Port is kept.
pub fn host_of(endpoint: &str) -> Option<String> {
    let rest = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}
