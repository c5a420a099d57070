#![warn(missing_docs)]
//! # video-risk-contract
//!
//! ## Purpose
//! Defines the analysis endpoint response schema and client-side
//! interpretation helpers.
//!
//! ## Responsibilities
//! - Parse success payloads into [`AnalysisResult`] and failure payloads into
//!   [`ErrorResult`].
//! - Decide success versus failure from the HTTP status alone.
//! - Map the free-form `potential_risk` label to a [`RiskLevel`].
//!
//! ## Data flow
//! HTTP status + raw body -> [`interpret_response`] -> [`AnalysisReply`] ->
//! display projection in the app crate.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs so they outlive the transient response
//! buffer.
//!
//! ## Error model
//! A body that is not a JSON object of the expected shape returns
//! [`AnalysisContractError::Decode`]. Absent fields are never an error: every
//! field is optional for rendering purposes.
//!
//! ## Security and privacy notes
//! Only server-produced analysis text is handled here; video bytes never reach
//! this crate.

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback text used when a failure payload carries no `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Success payload returned by the analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Analysis status reported by the server (for example `success`).
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Risk label (the reference server emits `low` or `high`).
    #[serde(default)]
    pub potential_risk: Option<String>,
    /// Free-form explanation of the finding.
    #[serde(default)]
    pub details: Option<String>,
}

impl AnalysisResult {
    /// Returns the status text, or an empty string when absent.
    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    /// Returns the message text, or an empty string when absent.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Returns the risk label, or an empty string when absent.
    pub fn potential_risk_text(&self) -> &str {
        self.potential_risk.as_deref().unwrap_or_default()
    }

    /// Returns the details text, or an empty string when absent.
    pub fn details_text(&self) -> &str {
        self.details.as_deref().unwrap_or_default()
    }

    /// Maps the `potential_risk` label to a [`RiskLevel`].
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_label(self.potential_risk_text())
    }
}

/// Failure payload returned with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    /// Server-supplied error description.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResult {
    /// Returns the server error text, or [`UNKNOWN_ERROR`] when it is absent
    /// or blank.
    pub fn message_or_default(&self) -> &str {
        match self.error.as_deref() {
            Some(error) if !error.is_empty() => error,
            _ => UNKNOWN_ERROR,
        }
    }
}

/// Coarse risk level derived from the `potential_risk` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No specific risk detected.
    Low,
    /// A fall, collapse, or seizure was detected.
    High,
    /// Label missing or not recognized.
    Unknown,
}

impl RiskLevel {
    /// Parses a risk label case-insensitively; unrecognized labels map to
    /// [`RiskLevel::Unknown`] so new server labels never break the client.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }
}

/// Interpreted response of one analysis exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisReply {
    /// 2xx status with a parsed result body.
    Success(AnalysisResult),
    /// Non-2xx status with a parsed error body.
    Failure {
        /// HTTP status code.
        status: u16,
        /// Parsed error payload.
        error: ErrorResult,
    },
}

/// Returns `true` for HTTP status codes in the 2xx range.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Parses a raw success body.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or a body that
/// is not a JSON object.
pub fn parse_analysis_result(raw: &str) -> Result<AnalysisResult, AnalysisContractError> {
    decode_object(raw)
}

/// Parses a raw failure body.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or a body that
/// is not a JSON object.
pub fn parse_error_result(raw: &str) -> Result<ErrorResult, AnalysisContractError> {
    decode_object(raw)
}

// Derived struct deserializers also accept sequences and fill fields by
// position, so the object shape is checked before mapping.
fn decode_object<T: DeserializeOwned>(raw: &str) -> Result<T, AnalysisContractError> {
    let value: Value = serde_json::from_str(raw)?;
    if value.is_object() {
        return Ok(serde_json::from_value(value)?);
    }

    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
    };

    Err(AnalysisContractError::Decode(serde_json::Error::invalid_type(
        unexpected,
        &"a JSON object",
    )))
}

/// Parses the body as JSON regardless of status, then selects the success or
/// failure shape from the status code.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] when the body does not decode
/// into the shape selected by `status`.
pub fn interpret_response(status: u16, raw: &str) -> Result<AnalysisReply, AnalysisContractError> {
    if is_success_status(status) {
        return parse_analysis_result(raw).map(AnalysisReply::Success);
    }

    let error = parse_error_result(raw)?;
    Ok(AnalysisReply::Failure { status, error })
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("invalid analysis response body: {0}")]
    Decode(#[from] serde_json::Error),
}
