//! Configuration stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase at which an option first becomes meaningful.
///
/// Variants are declared in resolution order, so the derived `Ord` gives
/// `Global < Repository < Package < Branch < Pr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Global,
    Repository,
    Package,
    Branch,
    Pr,
}

/// All stages, narrowest last.
pub const STAGES: &[Stage] = &[
    Stage::Global,
    Stage::Repository,
    Stage::Package,
    Stage::Branch,
    Stage::Pr,
];

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Global => "global",
            Stage::Repository => "repository",
            Stage::Package => "package",
            Stage::Branch => "branch",
            Stage::Pr => "pr",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage: '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Global < Stage::Repository);
        assert!(Stage::Repository < Stage::Package);
        assert!(Stage::Package < Stage::Branch);
        assert!(Stage::Branch < Stage::Pr);
    }

    #[test]
    fn test_parse_roundtrip() {
        for stage in STAGES {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), *stage);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "deploy".parse::<Stage>().unwrap_err();
        assert_eq!(err, UnknownStage("deploy".to_string()));
        assert_eq!(err.to_string(), "unknown stage: 'deploy'");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Stage::Pr).unwrap();
        assert_eq!(json, "\"pr\"");
        let parsed: Stage = serde_json::from_str("\"repository\"").unwrap();
        assert_eq!(parsed, Stage::Repository);
    }
}
