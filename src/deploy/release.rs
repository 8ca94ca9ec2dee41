// ABOUTME: A validated release request: target environment plus version.
// ABOUTME: Validation happens before any file, environment or network access.

use crate::error::{Error, Result};
use crate::types::{Environment, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub environment: Environment,
    pub version: Version,
}

impl Release {
    pub fn new(environment: Environment, version: Version) -> Self {
        Self {
            environment,
            version,
        }
    }

    /// Validate raw CLI input. The environment is checked before the version.
    pub fn parse(environment: Option<&str>, version: Option<&str>) -> Result<Self> {
        let environment = match environment {
            None | Some("") => return Err(Error::MissingEnvironment),
            Some(env) => env.parse::<Environment>()?,
        };
        let version = Version::new(version.unwrap_or_default())?;
        Ok(Self::new(environment, version))
    }
}
