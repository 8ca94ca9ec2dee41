// ABOUTME: Deployment environment tag.
// ABOUTME: Decides keyvault endpoint resolution and whether zones fan out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid environment, got: {0}")]
pub struct InvalidEnvironment(pub String);

/// The environment a release is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Edge,
    Acceptance,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Edge,
        Environment::Acceptance,
        Environment::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Edge => "edge",
            Environment::Acceptance => "acceptance",
            Environment::Production => "production",
        }
    }

    /// Production deploys to every discovered zone; the other environments
    /// are their own single zone.
    pub fn is_multi_zone(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = InvalidEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| InvalidEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
