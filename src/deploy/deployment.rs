// ABOUTME: Generic per-zone deployment parameterized by state marker.
// ABOUTME: Transitions consume self so steps can only run Resolve → Render → Write → Sign → Upload.

use std::path::Path;

use crate::types::Zone;

use super::context::DeployContext;
use super::error::DeployError;
use super::release::Release;
use super::state::{Pending, Rendered, Resolved, Signed, Written};
use super::upload::UploadRequest;
use crate::sign::{Claims, SignError};

/// One zone's deployment in progress, parameterized by its current state.
#[derive(Debug)]
pub struct ZoneDeployment<'a, S> {
    context: &'a DeployContext,
    release: &'a Release,
    zone: &'a Zone,
    state: S,
}

impl<'a, S> ZoneDeployment<'a, S> {
    fn transition<T>(self, state: T) -> ZoneDeployment<'a, T> {
        ZoneDeployment {
            context: self.context,
            release: self.release,
            zone: self.zone,
            state,
        }
    }

    pub fn zone(&self) -> &Zone {
        self.zone
    }

    pub fn release(&self) -> &Release {
        self.release
    }
}

impl<'a> ZoneDeployment<'a, Pending> {
    pub fn new(context: &'a DeployContext, release: &'a Release, zone: &'a Zone) -> Self {
        Self {
            context,
            release,
            zone,
            state: Pending,
        }
    }

    pub fn resolve(self) -> Result<ZoneDeployment<'a, Resolved>, DeployError> {
        let variables = self.context.resolver().resolve(
            self.release.environment,
            &self.release.version,
            self.zone,
        )?;
        tracing::debug!(keyvault = variables.keyvault_endpoint(), "resolved variables");
        Ok(self.transition(Resolved { variables }))
    }
}

impl<'a> ZoneDeployment<'a, Resolved> {
    pub fn render(self) -> ZoneDeployment<'a, Rendered> {
        let manifest = self.context.template.render(&self.state.variables);
        self.transition(Rendered { manifest })
    }
}

impl<'a> ZoneDeployment<'a, Rendered> {
    pub fn manifest(&self) -> &serde_yaml::Value {
        &self.state.manifest
    }

    pub async fn write(self) -> Result<ZoneDeployment<'a, Written>, DeployError> {
        let (path, contents) = self
            .context
            .writer
            .write(&self.state.manifest, self.release.environment, self.zone)
            .await?;
        Ok(self.transition(Written { path, contents }))
    }
}

impl<'a> ZoneDeployment<'a, Written> {
    pub fn manifest_path(&self) -> &Path {
        &self.state.path
    }

    /// Request a token for the zone, bounded by the configured sign timeout.
    pub async fn sign(self) -> Result<ZoneDeployment<'a, Signed>, DeployError> {
        let settings = &self.context.settings;
        let claims = Claims::new(settings.application_id.clone());

        let token = tokio::time::timeout(
            settings.sign_timeout,
            self.context.signer.sign(self.zone, &claims),
        )
        .await
        .map_err(|_| SignError::Timeout(settings.sign_timeout))??;

        let Written { path, contents } = self.state;
        Ok(ZoneDeployment {
            context: self.context,
            release: self.release,
            zone: self.zone,
            state: Signed {
                path,
                contents,
                token,
            },
        })
    }
}

impl<'a> ZoneDeployment<'a, Signed> {
    /// The request that would be sent to the zone's real endpoint.
    pub fn upload_request(&self) -> UploadRequest {
        UploadRequest::new(
            self.context.settings.endpoint.url_for(self.zone),
            self.state.token.clone(),
            self.state.contents.clone(),
            self.release.version.as_str(),
        )
    }

    /// Send the manifest. A dry run still performs the POST, against the sink.
    pub async fn upload(self, dry_run: bool) -> Result<String, DeployError> {
        let mut request = self.upload_request();

        if dry_run {
            tracing::info!(
                url = %request.url,
                version = %request.version,
                manifest = %self.state.path.display(),
                "dry run, redirecting upload to {}",
                self.context.settings.dry_run_url
            );
            request = request.into_dry_run(&self.context.settings.dry_run_url);
        }

        request.send(&self.context.client).await
    }
}
