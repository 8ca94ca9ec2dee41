// ABOUTME: Plans the zones of a release and deploys them concurrently.
// ABOUTME: Waits for every zone and reports all outcomes; never aborts early.

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use nonempty::NonEmpty;
use std::sync::Arc;

use crate::config::DeployConfig;
use crate::error::{Error, Result};
use crate::render::Template;
use crate::sign::TokenSigner;
use crate::types::{Environment, Zone};

use super::context::DeployContext;
use super::deployer::Deployer;
use super::outcome::RunReport;
use super::release::Release;
use super::upload::PlannedUpload;

#[derive(Debug)]
pub struct Orchestrator {
    context: DeployContext,
}

impl Orchestrator {
    pub fn new(
        config: DeployConfig,
        template: Template,
        signer: Arc<dyn TokenSigner>,
    ) -> Result<Self> {
        let context = DeployContext::new(config, template, signer).map_err(Error::HttpClient)?;
        Ok(Self { context })
    }

    pub fn context(&self) -> &DeployContext {
        &self.context
    }

    /// Zones targeted by a release to `environment`.
    ///
    /// Production targets every indexed zone except `edge` and `acceptance`;
    /// every other environment is its own single zone.
    pub fn plan(&self, environment: Environment) -> Result<NonEmpty<Zone>> {
        if !environment.is_multi_zone() {
            return Ok(NonEmpty::new(Zone::for_environment(environment)));
        }

        NonEmpty::from_vec(self.context.keyvaults().production_zones())
            .ok_or(Error::NoZones(environment))
    }

    /// Where each zone's upload goes when not redirected to the dry-run sink.
    pub fn planned_uploads(
        &self,
        release: &Release,
        zones: &NonEmpty<Zone>,
    ) -> Vec<PlannedUpload> {
        let settings = self.context.settings();
        zones
            .iter()
            .map(|zone| PlannedUpload {
                zone: zone.clone(),
                url: settings.endpoint.url_for(zone),
                version: release.version.to_string(),
                manifest: self.context.writer().path_for(release.environment, zone),
            })
            .collect()
    }

    /// Validate the raw request, then deploy it.
    pub async fn run(&self, environment: &str, version: &str, dry_run: bool) -> Result<RunReport> {
        let release = Release::parse(Some(environment), Some(version))?;
        self.deploy(release, dry_run).await
    }

    /// Deploy every planned zone and collect one outcome per zone.
    ///
    /// Zone failures are reported in the returned [`RunReport`], not as an
    /// `Err`; only planning errors are returned early.
    pub async fn deploy(&self, release: Release, dry_run: bool) -> Result<RunReport> {
        let zones = self.plan(release.environment)?;
        tracing::info!(
            environment = %release.environment,
            version = %release.version,
            zones = zones.len(),
            dry_run,
            "starting deployment"
        );

        let deployer = Deployer::new(&self.context, &release, dry_run);
        let tasks = zones.into_iter().map(|zone| deployer.deploy(zone));

        let outcomes = match self.context.settings().max_concurrency {
            Some(limit) => {
                stream::iter(tasks)
                    .buffer_unordered(limit.get())
                    .collect::<Vec<_>>()
                    .await
            }
            None => join_all(tasks).await,
        };

        Ok(RunReport::new(release, dry_run, outcomes))
    }
}
