//! Supported platforms and their default API endpoints.

/// Default host information for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform identifier as used in configuration.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Public API endpoint, if the platform has one.
    pub endpoint: Option<&'static str>,
}

const PLATFORMS: &[PlatformInfo] = &[
    PlatformInfo {
        id: "azure",
        name: "Azure DevOps",
        endpoint: None,
    },
    PlatformInfo {
        id: "bitbucket",
        name: "Bitbucket",
        endpoint: Some("https://api.bitbucket.org/"),
    },
    PlatformInfo {
        id: "bitbucket-server",
        name: "Bitbucket Server",
        endpoint: None,
    },
    PlatformInfo {
        id: "github",
        name: "GitHub",
        endpoint: Some("https://api.github.com/"),
    },
    PlatformInfo {
        id: "gitlab",
        name: "GitLab",
        endpoint: Some("https://gitlab.com/api/v4/"),
    },
];

/// Look up default host info for `platform`.
pub fn platform_info(platform: &str) -> Option<&'static PlatformInfo> {
    PLATFORMS.iter().find(|p| p.id == platform)
}

/// Identifiers of every supported platform.
pub fn platforms() -> impl Iterator<Item = &'static str> {
    PLATFORMS.iter().map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platform() {
        let github = platform_info("github").unwrap();
        assert_eq!(github.name, "GitHub");
        assert_eq!(github.endpoint, Some("https://api.github.com/"));
    }

    #[test]
    fn test_platform_without_default_endpoint() {
        let azure = platform_info("azure").unwrap();
        assert!(azure.endpoint.is_none());
    }

    #[test]
    fn test_unknown_platform() {
        assert!(platform_info("sourcehut").is_none());
    }

    #[test]
    fn test_platforms_listed() {
        let ids: Vec<_> = platforms().collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains(&"gitlab"));
    }
}
