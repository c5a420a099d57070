#![warn(missing_docs)]
//! # video-risk-ui
//!
//! ## Purpose
//! Defines the UI-facing model for `video-risk`: what the display region
//! shows and the control handles the upload controller drives.
//!
//! ## Responsibilities
//! - Represent rendered content ([`DisplayContent`]) with a [`Tone`].
//! - Project an [`AnalysisResult`] into labeled text fields.
//! - Declare the collaborator seams [`DisplayRegion`], [`TriggerControl`], and
//!   [`FilePicker`] that hosts implement.
//!
//! ## Data flow
//! Controller events build a [`DisplayContent`] value and hand it to the
//! injected [`DisplayRegion`], which renders it in the host shell.
//!
//! ## Ownership and lifetimes
//! `DisplayContent` owns all strings so a display can keep it after the
//! response buffer is gone.
//!
//! ## Error model
//! Rendering is infallible from the controller's point of view. Hosts deal
//! with their own output failures.
//!
//! ## Security and privacy notes
//! Display content never includes file bytes, only names and server text.

use std::fmt;

use video_risk_contract::AnalysisResult;
use video_risk_upload::SelectedFile;

/// Shown when the trigger is activated with no file selected.
pub const VALIDATION_MESSAGE: &str = "Please select a video file.";
/// Shown while the upload and analysis are outstanding.
pub const PROGRESS_MESSAGE: &str = "Uploading and analyzing video...";

/// Label for [`AnalysisResult::status`].
pub const LABEL_STATUS: &str = "Analysis Status";
/// Label for [`AnalysisResult::message`].
pub const LABEL_MESSAGE: &str = "Message";
/// Label for [`AnalysisResult::potential_risk`].
pub const LABEL_POTENTIAL_RISK: &str = "Potential Risk";
/// Label for [`AnalysisResult::details`].
pub const LABEL_DETAILS: &str = "Details";

/// Visual tone of rendered content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Regular informational text.
    Normal,
    /// Error styling (red in the browser original).
    Error,
}

/// One `label: value` line of an analysis rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    /// Field label.
    pub label: &'static str,
    /// Field value, empty when the server omitted it.
    pub value: String,
}

/// Content rendered into the display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent {
    /// Plain progress or informational text.
    Notice(String),
    /// Error text rendered with [`Tone::Error`].
    Error(String),
    /// Labeled analysis result fields.
    Fields(Vec<LabeledField>),
}

impl DisplayContent {
    /// Validation message for a submit without a selected file.
    pub fn validation() -> Self {
        Self::Error(VALIDATION_MESSAGE.to_string())
    }

    /// In-progress message shown while the request is outstanding.
    pub fn progress() -> Self {
        Self::Notice(PROGRESS_MESSAGE.to_string())
    }

    /// Projects a successful analysis into the four labeled fields.
    pub fn analysis(result: &AnalysisResult) -> Self {
        let field = |label, value: &str| LabeledField {
            label,
            value: value.to_string(),
        };

        Self::Fields(vec![
            field(LABEL_STATUS, result.status_text()),
            field(LABEL_MESSAGE, result.message_text()),
            field(LABEL_POTENTIAL_RISK, result.potential_risk_text()),
            field(LABEL_DETAILS, result.details_text()),
        ])
    }

    /// Error message for a non-2xx response.
    pub fn server_error(message: &str) -> Self {
        Self::Error(format!("Error: {message}"))
    }

    /// Error message for a request that never produced a usable response.
    pub fn network_error(description: &str) -> Self {
        Self::Error(format!("Network error: {description}"))
    }

    /// Returns the tone hosts should style this content with.
    pub fn tone(&self) -> Tone {
        match self {
            Self::Error(_) => Tone::Error,
            Self::Notice(_) | Self::Fields(_) => Tone::Normal,
        }
    }

    /// Returns the value of a labeled field, if this is a fields rendering.
    pub fn field(&self, label: &str) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .find(|field| field.label == label)
                .map(|field| field.value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice(text) | Self::Error(text) => f.write_str(text),
            Self::Fields(fields) => {
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", field.label, field.value)?;
                }
                Ok(())
            }
        }
    }
}

/// Region where status, result, and error text is rendered.
pub trait DisplayRegion: Send + Sync {
    /// Replaces the currently rendered content.
    fn render(&self, content: DisplayContent);
}

/// Control whose activation starts a submit.
pub trait TriggerControl: Send + Sync {
    /// Enables or disables the control.
    fn set_enabled(&self, enabled: bool);
}

/// File-selection widget.
pub trait FilePicker: Send + Sync {
    /// Returns the currently selected file, if any.
    fn selected_file(&self) -> Option<SelectedFile>;
}
