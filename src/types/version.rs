// ABOUTME: Release version string.
// ABOUTME: Validated non-empty at construction so downstream code never re-checks.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("version is required")]
pub struct MissingVersion;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(value: &str) -> Result<Self, MissingVersion> {
        if value.is_empty() {
            return Err(MissingVersion);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
