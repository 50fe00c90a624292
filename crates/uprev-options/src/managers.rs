//! Package manager catalog.
//!
//! Every manager belongs to at most one language family. Both manager and
//! language names double as configuration block keys.

use std::collections::BTreeSet;

/// Lookup of managers and the language each belongs to.
pub trait ManagerCatalog {
    /// Language family of `manager`, if it has one.
    fn language(&self, manager: &str) -> Option<&str>;

    /// Every known language name.
    fn language_list(&self) -> BTreeSet<String>;

    /// Every known manager name.
    fn manager_list(&self) -> BTreeSet<String>;
}

/// Manager name -> language family.
const MANAGERS: &[(&str, Option<&str>)] = &[
    ("bazel", None),
    ("buildkite", Some("docker")),
    ("cargo", Some("rust")),
    ("circleci", Some("docker")),
    ("composer", Some("php")),
    ("docker-compose", Some("docker")),
    ("dockerfile", Some("docker")),
    ("gomod", Some("golang")),
    ("gradle", Some("java")),
    ("kubernetes", Some("docker")),
    ("maven", Some("java")),
    ("meteor", Some("js")),
    ("npm", Some("js")),
    ("nuget", Some("dotnet")),
    ("nvm", Some("node")),
    ("pip_requirements", Some("python")),
    ("pipenv", Some("python")),
    ("travis", Some("node")),
];

const LANGUAGES: &[&str] = &[
    "docker", "dotnet", "golang", "java", "js", "node", "php", "python", "rust",
];

/// The managers uprev ships with.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinManagers;

impl ManagerCatalog for BuiltinManagers {
    fn language(&self, manager: &str) -> Option<&str> {
        MANAGERS
            .iter()
            .find(|(name, _)| *name == manager)
            .and_then(|(_, language)| *language)
    }

    fn language_list(&self) -> BTreeSet<String> {
        LANGUAGES.iter().map(|s| s.to_string()).collect()
    }

    fn manager_list(&self) -> BTreeSet<String> {
        MANAGERS.iter().map(|(name, _)| name.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        let catalog = BuiltinManagers;
        assert_eq!(catalog.language("npm"), Some("js"));
        assert_eq!(catalog.language("pipenv"), Some("python"));
        assert_eq!(catalog.language("bazel"), None);
        assert_eq!(catalog.language("unknown"), None);
    }

    #[test]
    fn test_every_manager_language_is_listed() {
        let catalog = BuiltinManagers;
        let languages = catalog.language_list();
        for manager in catalog.manager_list() {
            if let Some(language) = catalog.language(&manager) {
                assert!(languages.contains(language), "{} -> {}", manager, language);
            }
        }
    }

    #[test]
    fn test_manager_and_language_names_disjoint() {
        let catalog = BuiltinManagers;
        let languages = catalog.language_list();
        assert!(catalog.manager_list().is_disjoint(&languages));
    }
}
