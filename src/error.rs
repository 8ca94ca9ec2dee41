// ABOUTME: Application-wide error types for wadm-deploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::types::{Environment, InvalidEnvironment, MissingVersion};

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment is required")]
    MissingEnvironment,

    #[error(transparent)]
    InvalidEnvironment(#[from] InvalidEnvironment),

    #[error(transparent)]
    MissingVersion(#[from] MissingVersion),

    #[error("startup configuration error: {0}")]
    StartupConfig(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error("no zones to deploy for {0}")]
    NoZones(Environment),

    #[error("{failed} of {total} zone(s) failed")]
    ZonesFailed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
