// ABOUTME: Signer credentials: token issuer and per-zone shared secrets.
// ABOUTME: Parsed once at startup from the JAWS_SECRETS JSON document.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::types::Zone;

use super::ConfigError;

#[derive(Debug, Deserialize)]
struct RawCredentials {
    #[serde(default)]
    issuer: Option<String>,
    #[serde(default)]
    services: Option<Services>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Services {
    List(Vec<BTreeMap<String, ServiceSecret>>),
    Map(BTreeMap<String, ServiceSecret>),
}

#[derive(Debug, Deserialize)]
struct ServiceSecret {
    secret: String,
}

#[derive(Clone)]
pub struct SignerCredentials {
    issuer: String,
    secrets: BTreeMap<Zone, String>,
}

impl SignerCredentials {
    pub fn new(issuer: impl Into<String>, secrets: BTreeMap<Zone, String>) -> Self {
        Self {
            issuer: issuer.into(),
            secrets,
        }
    }

    /// Parse credentials, accepting `services` either as the discovery
    /// script's list of single-entry objects or as a plain object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawCredentials =
            serde_json::from_str(json).map_err(ConfigError::InvalidCredentials)?;

        let services = raw
            .services
            .ok_or(ConfigError::MissingCredentialKey("services"))?;
        let issuer = raw
            .issuer
            .filter(|issuer| !issuer.is_empty())
            .ok_or(ConfigError::MissingCredentialKey("issuer"))?;

        let entries: Vec<(String, ServiceSecret)> = match services {
            Services::List(list) => list.into_iter().flatten().collect(),
            Services::Map(map) => map.into_iter().collect(),
        };

        let secrets = entries
            .into_iter()
            .map(|(zone, service)| (Zone::new(zone), service.secret))
            .collect();

        Ok(Self { issuer, secrets })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn secret_for(&self, zone: &Zone) -> Option<&str> {
        self.secrets.get(zone).map(String::as_str)
    }
}

impl fmt::Debug for SignerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerCredentials")
            .field("issuer", &self.issuer)
            .field("zones", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_secrets() {
        let creds = SignerCredentials::from_json(
            r#"{"issuer": "github", "services": [{"eu1": {"secret": "hunter2"}}]}"#,
        )
        .unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("eu1"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn empty_issuer_counts_as_missing() {
        let err = SignerCredentials::from_json(r#"{"issuer": "", "services": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentialKey("issuer")));
    }
}
