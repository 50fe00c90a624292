//! Configuration errors.

use uprev_hosts::HostRuleError;

/// Errors raised while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported platform: {0}.")]
    UnsupportedPlatform(String),

    #[error("No authentication found for platform {}({platform})", endpoint_label(.endpoint))]
    MissingCredentials {
        platform: String,
        endpoint: Option<String>,
    },

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for '{option}': {value:?} ({reason})")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },

    #[error("Invalid host rule: {0}")]
    InvalidHostRule(String),

    #[error(transparent)]
    HostRule(#[from] HostRuleError),

    #[error(transparent)]
    Cli(#[from] clap::Error),
}

fn endpoint_label(endpoint: &Option<String>) -> String {
    endpoint
        .as_deref()
        .map(|e| format!("{} ", e))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_message() {
        let with_endpoint = ConfigError::MissingCredentials {
            platform: "gitlab".to_string(),
            endpoint: Some("https://gitlab.com/api/v4/".to_string()),
        };
        assert_eq!(
            with_endpoint.to_string(),
            "No authentication found for platform https://gitlab.com/api/v4/ (gitlab)"
        );

        let without_endpoint = ConfigError::MissingCredentials {
            platform: "azure".to_string(),
            endpoint: None,
        };
        assert_eq!(
            without_endpoint.to_string(),
            "No authentication found for platform (azure)"
        );
    }
}
