// ABOUTME: Runs one zone's deployment from variable resolution to upload.
// ABOUTME: Every failure is captured as that zone's outcome; nothing is retried.

use tracing::Instrument;

use crate::types::Zone;

use super::context::DeployContext;
use super::deployment::ZoneDeployment;
use super::outcome::{DeploymentOutcome, ZoneOutcome};
use super::release::Release;
use super::state::DeployStage;

#[derive(Debug, Clone, Copy)]
pub struct Deployer<'a> {
    context: &'a DeployContext,
    release: &'a Release,
    dry_run: bool,
}

impl<'a> Deployer<'a> {
    pub fn new(context: &'a DeployContext, release: &'a Release, dry_run: bool) -> Self {
        Self {
            context,
            release,
            dry_run,
        }
    }

    pub async fn deploy(self, zone: Zone) -> ZoneOutcome {
        let span = tracing::info_span!("zone", zone = %zone);
        let outcome = self.run(&zone).instrument(span).await;
        ZoneOutcome { zone, outcome }
    }

    async fn run(&self, zone: &Zone) -> DeploymentOutcome {
        match self.steps(zone).await {
            Ok(body) => {
                tracing::info!("deployed");
                DeploymentOutcome::Succeeded { body }
            }
            Err(outcome) => {
                if let DeploymentOutcome::Failed { stage, error } = &outcome {
                    tracing::warn!(%stage, kind = %error.kind(), "deployment failed: {error}");
                }
                outcome
            }
        }
    }

    async fn steps(&self, zone: &Zone) -> Result<String, DeploymentOutcome> {
        let deployment = ZoneDeployment::new(self.context, self.release, zone)
            .resolve()
            .map_err(DeploymentOutcome::failed(DeployStage::Resolving))?;

        let deployment = deployment
            .render()
            .write()
            .await
            .map_err(DeploymentOutcome::failed(DeployStage::Writing))?;

        let deployment = deployment
            .sign()
            .await
            .map_err(DeploymentOutcome::failed(DeployStage::Signing))?;

        deployment
            .upload(self.dry_run)
            .await
            .map_err(DeploymentOutcome::failed(DeployStage::Uploading))
    }
}
