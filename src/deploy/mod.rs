// ABOUTME: Zone deployment orchestration using the type state pattern.
// ABOUTME: Exports the orchestrator, per-zone deployer, outcomes and state markers.

mod context;
mod deployer;
mod deployment;
mod error;
mod orchestrator;
mod outcome;
mod release;
mod state;
mod upload;

pub use context::DeployContext;
pub use deployer::Deployer;
pub use deployment::ZoneDeployment;
pub use error::{DeployError, DeployErrorKind};
pub use orchestrator::Orchestrator;
pub use outcome::{DeploymentOutcome, RunReport, ZoneOutcome};
pub use release::Release;
pub use state::{DeployStage, Pending, Rendered, Resolved, Signed, Written};
pub use upload::{DRY_RUN_TOKEN, MANIFEST_FILENAME, PlannedUpload, UploadRequest};
