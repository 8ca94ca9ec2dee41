// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::deploy::{DeploymentOutcome, PlannedUpload, RunReport, ZoneOutcome};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Announce where a zone's upload would have gone (suppressed in quiet mode).
    pub fn dry_run(&self, upload: &PlannedUpload) {
        match self.mode {
            OutputMode::Normal => println!(
                "  [dry run] {}: would POST {} (version {}, manifest {})",
                upload.zone,
                upload.url,
                upload.version,
                upload.manifest.display()
            ),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let event = DryRunEvent {
                    event: "dry_run",
                    zone: upload.zone.as_str(),
                    url: &upload.url,
                    version: &upload.version,
                    manifest: upload.manifest.display().to_string(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print one zone's result.
    pub fn zone(&self, zone: &ZoneOutcome) {
        match self.mode {
            OutputMode::Normal => match &zone.outcome {
                DeploymentOutcome::Succeeded { body } => {
                    println!("  ✓ Deployed to {}", zone.zone);
                    if !body.is_empty() {
                        println!("{body}");
                    }
                }
                DeploymentOutcome::Failed { stage, error } => {
                    eprintln!(
                        "  ✗ {} failed while {stage}: {}: {error}",
                        zone.zone,
                        error.kind()
                    );
                }
            },
            OutputMode::Quiet => {
                if let DeploymentOutcome::Failed { error, .. } = &zone.outcome {
                    eprintln!("{}: {}: {error}", zone.zone, error.kind());
                }
            }
            OutputMode::Json => {
                let event = ZoneEvent::from(zone);
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print every zone's result followed by a summary line.
    pub fn report(&self, report: &RunReport) {
        for zone in &report.outcomes {
            self.zone(zone);
        }

        let total = report.outcomes.len();
        let failed = report.failed_count();
        if failed == 0 {
            let suffix = if report.dry_run { " (dry run)" } else { "" };
            self.success(&format!(
                "Deployed {} to {} zone(s){suffix}",
                report.release.version, total
            ));
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct DryRunEvent<'a> {
    event: &'static str,
    zone: &'a str,
    url: &'a str,
    version: &'a str,
    manifest: String,
}

#[derive(Serialize)]
struct ZoneEvent<'a> {
    event: &'static str,
    zone: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

impl<'a> From<&'a ZoneOutcome> for ZoneEvent<'a> {
    fn from(zone: &'a ZoneOutcome) -> Self {
        let mut event = ZoneEvent {
            event: "zone",
            zone: zone.zone.as_str(),
            success: zone.is_success(),
            stage: None,
            kind: None,
            status: None,
            error: None,
            body: None,
        };
        match &zone.outcome {
            DeploymentOutcome::Succeeded { body } => event.body = Some(body.as_str()),
            DeploymentOutcome::Failed { stage, error } => {
                event.stage = Some(stage.as_str());
                event.kind = Some(error.kind().as_str());
                event.status = error.upload_response().map(|(status, _)| status);
                event.error = Some(error.to_string());
            }
        }
        event
    }
}
