// ABOUTME: Zone identifier naming a single deployment target.
// ABOUTME: Used as the subdomain of the upload URL and the signer audience.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Environment;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zone(String);

impl Zone {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The single zone an edge or acceptance release targets.
    pub fn for_environment(environment: Environment) -> Self {
        Self(environment.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zones named after a non-production environment are deployed through
    /// that environment and never as part of a production fan-out.
    pub fn is_reserved(&self) -> bool {
        self.0 == Environment::Edge.as_str() || self.0 == Environment::Acceptance.as_str()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Zone {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Zone {
    fn from(value: String) -> Self {
        Self(value)
    }
}
