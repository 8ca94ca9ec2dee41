// ABOUTME: Startup configuration errors.
// ABOUTME: Every variant is fatal and raised before any deployment work begins.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("keyvault index is not a JSON object of zone to URI: {0}")]
    InvalidKeyvaults(serde_json::Error),

    #[error("signer credentials are not valid JSON: {0}")]
    InvalidCredentials(serde_json::Error),

    #[error("signer credentials are missing required key `{0}`")]
    MissingCredentialKey(&'static str),

    #[error("failed to parse template {path}: {source}")]
    Template {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
