// ABOUTME: Shared fixtures for integration tests.
// ABOUTME: Fake signers and orchestrators wired to a wiremock server.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wadm_deploy::config::{DeployConfig, EndpointTemplate, KeyvaultIndex, Settings, SignerCredentials};
use wadm_deploy::deploy::Orchestrator;
use wadm_deploy::render::Template;
use wadm_deploy::sign::{Claims, SignError, TokenSigner};
use wadm_deploy::types::Zone;
use wiremock::MockServer;

pub const TEMPLATE: &str = r#"
apiVersion: core.oam.dev/v1beta1
kind: Application
metadata:
  name: actions-{{ENVIRONMENT}}
  annotations:
    version: "{{VERSION}}"
spec:
  components:
    - name: key-vault
      type: capability
      properties:
        image: "{{REGISTRY}}/key-vault:{{VERSION}}"
        config:
          - name: vault
            properties:
              url: "{{KEYVAULT_ENDPOINT}}"
      traits:
        - type: spreadscaler
          properties:
            instances: 1
"#;

pub const ENDPOINT_PATH: &str = "deploy_native_app";

/// Signer that hands out `token-for-<zone>` and records every request.
#[derive(Default)]
pub struct FakeSigner {
    failing: Vec<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, Claims)>>,
}

impl FakeSigner {
    pub fn failing_for(zones: &[&str]) -> Self {
        Self {
            failing: zones.iter().map(|z| z.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Claims)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSigner for FakeSigner {
    async fn sign(&self, zone: &Zone, claims: &Claims) -> Result<String, SignError> {
        self.calls
            .lock()
            .unwrap()
            .push((zone.to_string(), claims.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.iter().any(|z| z == zone.as_str()) {
            return Err(SignError::Rejected(format!("signer refused {zone}")));
        }

        Ok(format!("token-for-{zone}"))
    }
}

pub fn keyvaults(zones: &[&str]) -> KeyvaultIndex {
    zones
        .iter()
        .map(|zone| (*zone, format!("https://betty-{zone}-keyvault.vault.azure.net/")))
        .collect()
}

/// Settings pointing every zone endpoint and the dry-run sink at `server`.
pub fn settings(server: &MockServer, dir: &Path) -> Settings {
    Settings {
        endpoint: EndpointTemplate::parse(&format!(
            "{}/zones/{{zone}}/{ENDPOINT_PATH}",
            server.uri()
        ))
        .unwrap(),
        dry_run_url: format!("{}/anything", server.uri()),
        output_dir: dir.join("wadm"),
        ..Settings::default()
    }
}

pub fn zone_path(zone: &str) -> String {
    format!("/zones/{zone}/{ENDPOINT_PATH}")
}

pub fn orchestrator_with(
    settings: Settings,
    keyvaults: KeyvaultIndex,
    signer: Arc<FakeSigner>,
) -> Orchestrator {
    let config = DeployConfig {
        settings,
        keyvaults,
        credentials: SignerCredentials::new("github", BTreeMap::new()),
    };
    Orchestrator::new(config, Template::from_yaml(TEMPLATE).unwrap(), signer).unwrap()
}

pub fn orchestrator(
    server: &MockServer,
    dir: &Path,
    keyvaults: KeyvaultIndex,
    signer: Arc<FakeSigner>,
) -> Orchestrator {
    orchestrator_with(settings(server, dir), keyvaults, signer)
}
