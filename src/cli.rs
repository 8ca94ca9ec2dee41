// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Positional environment and version plus run flags.

use clap::Parser;
use std::path::PathBuf;

use wadm_deploy::output::OutputMode;

#[derive(Parser)]
#[command(name = "wadm-deploy")]
#[command(about = "Render wadm manifests and deploy them to every zone of an environment")]
#[command(version)]
pub struct Cli {
    /// Target environment: edge, acceptance or production
    pub environment: Option<String>,

    /// Version to deploy
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Send uploads to the dry-run sink instead of the zone endpoints
    #[arg(long = "dryRun", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Settings file (defaults to wadm-deploy.yml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print failures and the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
