// ABOUTME: Entry point for the wadm-deploy CLI application.
// ABOUTME: Validates arguments, loads startup configuration and runs the release.

mod cli;

use clap::Parser;
use cli::Cli;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wadm_deploy::config::{DeployConfig, Settings};
use wadm_deploy::deploy::{Orchestrator, Release};
use wadm_deploy::error::{Error, Result};
use wadm_deploy::output::Output;
use wadm_deploy::render::Template;
use wadm_deploy::sign::JwtSigner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    // Arguments are validated before touching the filesystem or environment.
    let release = Release::parse(cli.environment.as_deref(), cli.version.as_deref())?;

    let cwd = env::current_dir()?;
    let settings = match &cli.config {
        Some(path) => Settings::load_required(path)?,
        None => Settings::discover(&cwd)?,
    }
    .rooted_at(&cwd);

    let config = DeployConfig::from_settings(settings)?;
    let template = Template::load(&config.settings.template)?;
    let signer = JwtSigner::new(config.credentials.clone(), config.settings.token_ttl);
    let orchestrator = Orchestrator::new(config, template, Arc::new(signer))?;

    let zones = orchestrator.plan(release.environment)?;
    output.progress(&format!(
        "Deploying {} to {} ({} zone(s)){}",
        release.version,
        release.environment,
        zones.len(),
        if cli.dry_run { " [dry run]" } else { "" }
    ));
    for zone in zones.iter() {
        output.progress(&format!("  → {zone}"));
    }
    if cli.dry_run {
        for upload in orchestrator.planned_uploads(&release, &zones) {
            output.dry_run(&upload);
        }
    }

    let report = orchestrator.deploy(release, cli.dry_run).await?;
    output.report(&report);

    if !report.is_success() {
        return Err(Error::ZonesFailed {
            failed: report.failed_count(),
            total: report.outcomes.len(),
        });
    }

    Ok(())
}
