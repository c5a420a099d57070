#![warn(missing_docs)]
//! # video-risk-app
//!
//! ## Purpose
//! Orchestrates file selection, upload, and result rendering for
//! `video-risk`.
//!
//! ## Responsibilities
//! - Resolve the analysis endpoint from defaults, environment, and overrides.
//! - Run the submit cycle through [`UploadController`]: validate selection,
//!   show progress, post once, render the result or the error, re-enable the
//!   trigger.
//! - Keep at most one submit in flight per controller.
//!
//! ## Data flow
//! Trigger activation -> [`UploadController::submit`] -> file picker ->
//! upload client -> response interpretation -> display region.
//!
//! ## Ownership and lifetimes
//! Host controls are injected as shared handles at construction; the
//! controller never reaches for ambient global state.
//!
//! ## Error model
//! Construction failures surface as [`AppError`]. Submit failures are
//! classified as [`SubmitError`] and rendered, never returned as `Err`.
//!
//! ## Security and privacy notes
//! Video bytes are never logged. A warning is emitted when uploads would
//! cross the network unencrypted.

mod config;
mod controller;

use std::sync::Arc;

use thiserror::Error;
use video_risk_ui::FilePicker;
use video_risk_upload::{SelectedFile, UploadError};

pub use config::{ClientConfig, ConfigError, ENDPOINT_ENV_VAR};
pub use controller::{Controls, SubmitError, SubmitOutcome, UploadController};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("VIDEO_RISK_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// File picker whose selection is fixed when it is created, used by
/// non-interactive hosts such as the CLI.
#[derive(Debug, Clone, Default)]
pub struct FixedSelection {
    file: Option<SelectedFile>,
}

impl FixedSelection {
    /// Picker with `file` selected.
    pub fn new(file: Option<SelectedFile>) -> Self {
        Self { file }
    }

    /// Shared picker handle for [`Controls`].
    pub fn shared(file: Option<SelectedFile>) -> Arc<dyn FilePicker> {
        Arc::new(Self::new(file))
    }
}

impl FilePicker for FixedSelection {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.clone()
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be resolved.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Upload subsystem error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}
