// ABOUTME: Settings for a deployment run and the startup configuration bundle.
// ABOUTME: Handles the optional YAML settings file, defaults and env-supplied secrets.

mod credentials;
mod deserialize;
mod endpoint;
mod env_value;
mod error;
mod keyvaults;

pub use credentials::SignerCredentials;
pub use endpoint::{EndpointTemplate, ZONE_PLACEHOLDER};
pub use env_value::EnvValue;
pub use error::ConfigError;
pub use keyvaults::KeyvaultIndex;

use deserialize::deserialize_endpoint_template;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::Environment;

pub const SETTINGS_FILENAME: &str = "wadm-deploy.yml";
pub const SETTINGS_FILENAME_ALT: &str = "wadm-deploy.yaml";
pub const SETTINGS_FILENAME_DIR: &str = ".wadm-deploy/config.yml";

pub const KEYVAULTS_VAR: &str = "KEYVAULTS";
pub const SIGNER_CREDENTIALS_VAR: &str = "JAWS_SECRETS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_registry")]
    pub registry: String,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(
        default = "default_endpoint",
        deserialize_with = "deserialize_endpoint_template"
    )]
    pub endpoint: EndpointTemplate,

    #[serde(default = "default_dry_run_url")]
    pub dry_run_url: String,

    #[serde(default)]
    pub keyvault_endpoints: KeyvaultEndpoints,

    #[serde(default = "default_application_id")]
    pub application_id: String,

    #[serde(default = "default_sign_timeout", with = "humantime_serde")]
    pub sign_timeout: Duration,

    #[serde(default = "default_upload_timeout", with = "humantime_serde")]
    pub upload_timeout: Duration,

    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,

    #[serde(default)]
    pub max_concurrency: Option<NonZeroUsize>,

    #[serde(default = "default_keyvaults_source")]
    pub keyvaults: EnvValue,

    #[serde(default = "default_credentials_source")]
    pub signer_credentials: EnvValue,
}

/// Fixed keyvault endpoints for the single-zone environments.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyvaultEndpoints {
    #[serde(default = "default_edge_endpoint")]
    pub edge: String,
    #[serde(default = "default_acceptance_endpoint")]
    pub acceptance: String,
}

impl Default for KeyvaultEndpoints {
    fn default() -> Self {
        Self {
            edge: default_edge_endpoint(),
            acceptance: default_acceptance_endpoint(),
        }
    }
}

impl KeyvaultEndpoints {
    /// The fixed endpoint for `environment`, or `None` for production, whose
    /// endpoints come from the keyvault index.
    pub fn fixed_for(&self, environment: Environment) -> Option<&str> {
        match environment {
            Environment::Edge => Some(&self.edge),
            Environment::Acceptance => Some(&self.acceptance),
            Environment::Production => None,
        }
    }
}

fn default_registry() -> String {
    "ghcr.io/bettyblocks".to_string()
}

fn default_template() -> PathBuf {
    PathBuf::from("template.wadm.yaml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("wadm")
}

fn default_endpoint() -> EndpointTemplate {
    EndpointTemplate::parse(
        "https://{zone}.betty.zone/api/actions-compiler/internal/wadm/deploy_native_app",
    )
    .expect("default endpoint contains the zone placeholder")
}

fn default_dry_run_url() -> String {
    "https://httpbin.org/anything".to_string()
}

fn default_edge_endpoint() -> String {
    "https://betty-edge-keyvault.vault.azure.net/".to_string()
}

fn default_acceptance_endpoint() -> String {
    "https://betty-acc-keyvault.vault.azure.net/".to_string()
}

fn default_application_id() -> String {
    "native".to_string()
}

fn default_sign_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_upload_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(300)
}

fn default_keyvaults_source() -> EnvValue {
    EnvValue::from_env(KEYVAULTS_VAR, Some("{}"))
}

fn default_credentials_source() -> EnvValue {
    EnvValue::from_env(SIGNER_CREDENTIALS_VAR, None)
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            registry: default_registry(),
            template: default_template(),
            output_dir: default_output_dir(),
            endpoint: default_endpoint(),
            dry_run_url: default_dry_run_url(),
            keyvault_endpoints: KeyvaultEndpoints::default(),
            application_id: default_application_id(),
            sign_timeout: default_sign_timeout(),
            upload_timeout: default_upload_timeout(),
            token_ttl: default_token_ttl(),
            max_concurrency: None,
            keyvaults: default_keyvaults_source(),
            signer_credentials: default_credentials_source(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(ConfigError::from)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load the first settings file found in `dir`, or defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidates = [
            dir.join(SETTINGS_FILENAME),
            dir.join(SETTINGS_FILENAME_ALT),
            dir.join(SETTINGS_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("loading settings from {}", path.display());
                return Self::load(path);
            }
        }

        tracing::debug!("no settings file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Load an explicitly requested settings file, which must exist.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::load(path)
    }

    /// Resolve relative template and output paths against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.template.is_relative() {
            self.template = base.join(&self.template);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        self
    }
}

/// Everything loaded once at process entry and shared read-only by every zone.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub settings: Settings,
    pub keyvaults: KeyvaultIndex,
    pub credentials: SignerCredentials,
}

impl DeployConfig {
    /// Resolve the env-supplied secrets named by `settings`.
    ///
    /// Fails on a missing variable, malformed JSON, or credentials without
    /// `issuer` / `services`.
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let keyvaults = KeyvaultIndex::from_json(&settings.keyvaults.resolve()?)?;
        let credentials = SignerCredentials::from_json(&settings.signer_credentials.resolve()?)?;

        if keyvaults.is_empty() {
            tracing::debug!("keyvault index is empty, production has no zones");
        }

        tracing::debug!(
            zones = keyvaults.len(),
            issuer = credentials.issuer(),
            "loaded startup configuration"
        );

        Ok(Self {
            settings,
            keyvaults,
            credentials,
        })
    }
}
