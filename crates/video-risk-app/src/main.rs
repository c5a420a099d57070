#![warn(missing_docs)]
//! # video-risk binary
//!
//! Terminal entry point: uploads one video to the analysis endpoint and
//! prints the rendered result.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use video_risk_app::{APP_VERSION, ClientConfig, Controls, FixedSelection, UploadController};
use video_risk_ui::{DisplayContent, DisplayRegion, Tone, TriggerControl};
use video_risk_upload::SelectedFile;

/// Upload a video for risk analysis and print the result.
#[derive(Debug, Parser)]
#[command(name = "video-risk", version = APP_VERSION)]
struct Cli {
    /// Video file to analyze. Omitting it reports the missing selection.
    file: Option<PathBuf>,

    /// Analysis endpoint URL. Overrides `VIDEO_RISK_ENDPOINT_URL`, which
    /// overrides the built-in local endpoint.
    #[arg(long)]
    endpoint: Option<String>,
}

/// Prints error-toned content to stderr and everything else to stdout.
struct TerminalDisplay;

impl DisplayRegion for TerminalDisplay {
    fn render(&self, content: DisplayContent) {
        match content.tone() {
            Tone::Error => eprintln!("{content}"),
            Tone::Normal => println!("{content}"),
        }
    }
}

/// The terminal has no button; state changes are only traced.
struct TracedTrigger;

impl TriggerControl for TracedTrigger {
    fn set_enabled(&self, enabled: bool) {
        debug!(enabled, "trigger state changed");
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "video_risk_app=info,video_risk_upload=info".into());

    // stdout carries only rendered results
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.endpoint {
        Some(endpoint) => ClientConfig::new(endpoint),
        None => ClientConfig::from_env(),
    }
    .context("invalid endpoint configuration")?;

    let file = match &cli.file {
        Some(path) => Some(
            SelectedFile::from_path(path)
                .await
                .with_context(|| format!("failed to load '{}'", path.display()))?,
        ),
        None => None,
    };

    let controls = Controls {
        picker: FixedSelection::shared(file),
        display: Arc::new(TerminalDisplay),
        trigger: Arc::new(TracedTrigger),
    };
    let controller =
        UploadController::new(&config, controls).context("failed to build upload controller")?;

    let outcome = controller.submit().await;
    Ok(if outcome.is_analyzed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
