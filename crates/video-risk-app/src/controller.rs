//! Upload controller: one request/response cycle per trigger activation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};
use video_risk_contract::{AnalysisContractError, AnalysisReply, AnalysisResult, interpret_response};
use video_risk_ui::{DisplayContent, DisplayRegion, FilePicker, TriggerControl};
use video_risk_upload::{ReqwestTransport, SelectedFile, UploadClient, UploadError, UploadTransport};

use crate::{AppError, ClientConfig};

/// Host-provided handles the controller drives.
#[derive(Clone)]
pub struct Controls {
    /// File-selection widget.
    pub picker: Arc<dyn FilePicker>,
    /// Region receiving status, result, and error text.
    pub display: Arc<dyn DisplayRegion>,
    /// Control that starts a submit.
    pub trigger: Arc<dyn TriggerControl>,
}

/// Why a submit did not produce an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Trigger activated with no file selected.
    #[error("no file selected")]
    NoFileSelected,
    /// Server answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server `error` text or the unknown-error fallback.
        message: String,
    },
    /// No usable response was obtained.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Projects the error into the content shown to the user.
    pub fn display_content(&self) -> DisplayContent {
        match self {
            Self::NoFileSelected => DisplayContent::validation(),
            Self::Server { message, .. } => DisplayContent::server_error(message),
            Self::Transport(description) => DisplayContent::network_error(description),
        }
    }
}

impl From<UploadError> for SubmitError {
    fn from(error: UploadError) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<AnalysisContractError> for SubmitError {
    fn from(error: AnalysisContractError) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Result of one [`UploadController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Analysis completed and was rendered.
    Analyzed(AnalysisResult),
    /// Submit failed; the error message was rendered.
    Failed(SubmitError),
    /// Another submit was still in flight; nothing was sent or rendered.
    Busy,
}

impl SubmitOutcome {
    /// Returns `true` when an analysis was rendered.
    pub fn is_analyzed(&self) -> bool {
        matches!(self, Self::Analyzed(_))
    }
}

/// Orchestrates file validation, upload, and result rendering.
pub struct UploadController {
    client: UploadClient,
    controls: Controls,
    in_flight: AtomicBool,
}

impl UploadController {
    /// Creates a controller posting through a `reqwest` transport.
    ///
    /// # Errors
    /// Returns [`AppError::Upload`] when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, controls: Controls) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, controls, Arc::new(transport)))
    }

    /// Creates a controller with an injected transport.
    pub fn with_transport(
        config: &ClientConfig,
        controls: Controls,
        transport: Arc<dyn UploadTransport>,
    ) -> Self {
        Self {
            client: UploadClient::new(config.endpoint_url().clone(), transport),
            controls,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns `true` while a submit is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one submit cycle. Every failure is rendered and reported through
    /// the returned outcome; nothing propagates to the caller.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(mut guard) = SubmitGuard::acquire(&self.in_flight) else {
            debug!("submit ignored while another is in flight");
            return SubmitOutcome::Busy;
        };

        let Some(file) = self.controls.picker.selected_file() else {
            self.controls.display.render(DisplayContent::validation());
            return SubmitOutcome::Failed(SubmitError::NoFileSelected);
        };

        self.controls.display.render(DisplayContent::progress());
        guard.disable_trigger(self.controls.trigger.as_ref());

        info!(
            file_name = file.file_name(),
            bytes = file.len(),
            endpoint = %self.client.endpoint(),
            "submitting video for analysis"
        );

        match self.exchange(file).await {
            Ok(result) => {
                info!(
                    status = result.status_text(),
                    risk = ?result.risk_level(),
                    "analysis completed"
                );
                self.controls.display.render(DisplayContent::analysis(&result));
                SubmitOutcome::Analyzed(result)
            }
            Err(error) => {
                warn!(%error, "analysis submit failed");
                self.controls.display.render(error.display_content());
                SubmitOutcome::Failed(error)
            }
        }
    }

    async fn exchange(&self, file: SelectedFile) -> Result<AnalysisResult, SubmitError> {
        let response = self.client.upload(file).await?;

        match interpret_response(response.status, &response.body)? {
            AnalysisReply::Success(result) => Ok(result),
            AnalysisReply::Failure { status, error } => Err(SubmitError::Server {
                status,
                message: error.message_or_default().to_string(),
            }),
        }
    }
}

/// Scoped ownership of the submitting state. Dropping the guard clears the
/// in-flight flag and re-enables the trigger if it was disabled.
struct SubmitGuard<'a> {
    in_flight: &'a AtomicBool,
    trigger: Option<&'a dyn TriggerControl>,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(in_flight: &'a AtomicBool) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                in_flight,
                trigger: None,
            })
    }

    fn disable_trigger(&mut self, trigger: &'a dyn TriggerControl) {
        trigger.set_enabled(false);
        self.trigger = Some(trigger);
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if let Some(trigger) = self.trigger {
            trigger.set_enabled(true);
        }
        self.in_flight.store(false, Ordering::Release);
    }
}
