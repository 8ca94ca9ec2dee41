// ABOUTME: Read-only resources shared by every zone of a run.
// ABOUTME: Built once at process entry; zones only ever borrow it.

use std::sync::Arc;

use crate::config::{DeployConfig, KeyvaultIndex, Settings};
use crate::render::{ManifestWriter, Template, VariableResolver};
use crate::sign::TokenSigner;

pub struct DeployContext {
    pub(crate) settings: Settings,
    pub(crate) keyvaults: KeyvaultIndex,
    pub(crate) template: Template,
    pub(crate) writer: ManifestWriter,
    pub(crate) signer: Arc<dyn TokenSigner>,
    pub(crate) client: reqwest::Client,
}

impl std::fmt::Debug for DeployContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployContext")
            .field("settings", &self.settings)
            .field("keyvaults", &self.keyvaults)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}

impl DeployContext {
    /// Build the shared context, including one HTTP client bounded by the
    /// configured upload timeout.
    pub fn new(
        config: DeployConfig,
        template: Template,
        signer: Arc<dyn TokenSigner>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.settings.upload_timeout)
            .build()?;

        Ok(Self {
            writer: ManifestWriter::new(config.settings.output_dir.clone()),
            settings: config.settings,
            keyvaults: config.keyvaults,
            template,
            signer,
            client,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn keyvaults(&self) -> &KeyvaultIndex {
        &self.keyvaults
    }

    pub fn writer(&self) -> &ManifestWriter {
        &self.writer
    }

    pub fn resolver(&self) -> VariableResolver<'_> {
        VariableResolver::new(
            &self.settings.registry,
            &self.settings.keyvault_endpoints,
            &self.keyvaults,
        )
    }
}
