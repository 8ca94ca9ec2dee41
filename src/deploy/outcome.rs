// ABOUTME: Per-zone outcomes and the aggregate report of a run.
// ABOUTME: A report always holds exactly one outcome per launched zone.

use crate::types::Zone;

use super::error::{DeployError, DeployErrorKind};
use super::release::Release;
use super::state::DeployStage;

/// How a single zone's deployment ended.
#[derive(Debug)]
pub enum DeploymentOutcome {
    /// The endpoint accepted the manifest.
    Succeeded { body: String },
    /// The deployment stopped at `stage`.
    Failed {
        stage: DeployStage,
        error: DeployError,
    },
}

impl DeploymentOutcome {
    pub fn failed(stage: DeployStage) -> impl FnOnce(DeployError) -> Self {
        move |error| DeploymentOutcome::Failed { stage, error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentOutcome::Succeeded { .. })
    }

    pub fn error(&self) -> Option<&DeployError> {
        match self {
            DeploymentOutcome::Failed { error, .. } => Some(error),
            DeploymentOutcome::Succeeded { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<DeployErrorKind> {
        self.error().map(DeployError::kind)
    }
}

#[derive(Debug)]
pub struct ZoneOutcome {
    pub zone: Zone,
    pub outcome: DeploymentOutcome,
}

impl ZoneOutcome {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Every zone's outcome for one release, sorted by zone.
#[derive(Debug)]
pub struct RunReport {
    pub release: Release,
    pub dry_run: bool,
    pub outcomes: Vec<ZoneOutcome>,
}

impl RunReport {
    pub fn new(release: Release, dry_run: bool, mut outcomes: Vec<ZoneOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.zone.cmp(&b.zone));
        Self {
            release,
            dry_run,
            outcomes,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ZoneOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ZoneOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.outcomes.iter().map(|o| &o.zone)
    }

    pub fn outcome_for(&self, zone: &str) -> Option<&DeploymentOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.zone.as_str() == zone)
            .map(|o| &o.outcome)
    }
}
