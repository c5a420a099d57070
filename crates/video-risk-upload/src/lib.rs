#![warn(missing_docs)]
//! # video-risk-upload
//!
//! ## Purpose
//! Packages a selected video as a multipart form and posts it to the analysis
//! endpoint.
//!
//! ## Responsibilities
//! - Model the transient [`SelectedFile`] (name, MIME type, bytes).
//! - Validate endpoint URLs before any request is built.
//! - Send exactly one `POST` per [`UploadClient::upload`] call through an
//!   injectable [`UploadTransport`].
//!
//! ## Data flow
//! File picker -> [`SelectedFile`] -> [`UploadClient::upload`] ->
//! [`UploadTransport::send`] -> [`RawResponse`] (status + body text).
//!
//! ## Ownership and lifetimes
//! `upload` consumes the [`SelectedFile`]; its bytes move into the multipart
//! body without a copy and are dropped once the request completes.
//!
//! ## Error model
//! Endpoint policy violations return [`UploadError::InvalidEndpoint`].
//! Anything that prevents a response from being obtained is an
//! [`UploadError::Transport`]. There are no retries.
//!
//! ## Security and privacy notes
//! File bytes are never logged; only the file name and size are traced.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::debug;
use url::{Host, Url};

/// Multipart field name carrying the video part.
pub const VIDEO_FIELD_NAME: &str = "video";

/// Analysis endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000/analyze-video";

/// Content type used when the file extension is not recognized.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// User-selected file, owned only between selection and submission.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    file_name: String,
    mime_type: String,
    contents: Vec<u8>,
}

impl SelectedFile {
    /// Creates a file with an explicit MIME type.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        contents: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            contents,
        }
    }

    /// Creates a file whose MIME type is guessed from the file name extension.
    pub fn from_bytes(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(Path::new(&file_name));
        Self {
            file_name,
            mime_type,
            contents,
        }
    }

    /// Reads a file from disk.
    ///
    /// # Errors
    /// Returns [`UploadError::ReadFile`] when the file cannot be read and
    /// [`UploadError::InvalidFile`] when the path has no file name component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                UploadError::InvalidFile(format!("'{}' has no file name", path.display()))
            })?;

        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_bytes(file_name, contents))
    }

    /// File name sent as the multipart part filename.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type sent as the multipart part content type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw file bytes.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns `true` for a zero-byte file.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn into_part(self) -> Result<Part, UploadError> {
        Part::bytes(self.contents)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|error| UploadError::InvalidFile(format!("invalid mime type: {error}")))
    }
}

// Bytes are left out so debug logs stay small and content-free.
impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.contents.len())
            .finish()
    }
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}

/// Status and body text of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: String,
}

/// Abstract transport used by [`UploadClient`].
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Posts `file` as the `video` part of a multipart form to `endpoint`.
    async fn send(&self, endpoint: &Url, file: SelectedFile) -> Result<RawResponse, UploadError>;
}

/// `reqwest`-backed transport. No request timeout is configured.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with a dedicated connection pool.
    ///
    /// # Errors
    /// Returns [`UploadError::Transport`] when the HTTP client cannot be built
    /// (for example when TLS initialization fails).
    pub fn new() -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("video-risk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| UploadError::Transport(describe_error(&error)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UploadTransport for ReqwestTransport {
    async fn send(&self, endpoint: &Url, file: SelectedFile) -> Result<RawResponse, UploadError> {
        let form = Form::new().part(VIDEO_FIELD_NAME, file.into_part()?);

        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|error| UploadError::Transport(describe_error(&error)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| UploadError::Transport(describe_error(&error)))?;

        debug!(status, body_len = body.len(), "analysis response received");
        Ok(RawResponse { status, body })
    }
}

/// Upload client bound to one validated endpoint.
#[derive(Clone)]
pub struct UploadClient {
    endpoint: Url,
    transport: Arc<dyn UploadTransport>,
}

impl UploadClient {
    /// Creates a client for a validated endpoint.
    pub fn new(endpoint: Url, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Parses and validates `endpoint` before building the client.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] per [`validate_endpoint`].
    pub fn from_endpoint(
        endpoint: &str,
        transport: Arc<dyn UploadTransport>,
    ) -> Result<Self, UploadError> {
        Ok(Self::new(validate_endpoint(endpoint)?, transport))
    }

    /// Sends one upload. Exactly one transport call is made.
    ///
    /// # Errors
    /// Propagates transport errors unchanged.
    pub async fn upload(&self, file: SelectedFile) -> Result<RawResponse, UploadError> {
        debug!(
            endpoint = %self.endpoint,
            file_name = file.file_name(),
            bytes = file.len(),
            "posting video"
        );
        self.transport.send(&self.endpoint, file).await
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Parses an endpoint URL and checks it can carry an upload.
///
/// # Errors
/// Returns [`UploadError::InvalidEndpoint`] when the URL does not parse, the
/// scheme is not `http`/`https`, or the host is missing.
pub fn validate_endpoint(endpoint: &str) -> Result<Url, UploadError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid url: {error}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UploadError::InvalidEndpoint(format!(
            "unsupported scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    if parsed.host().is_none() {
        return Err(UploadError::InvalidEndpoint("url has no host".to_string()));
    }

    Ok(parsed)
}

/// Returns `true` when uploads to `endpoint` stay on this machine or are
/// encrypted in transit.
pub fn is_local_or_https(endpoint: &Url) -> bool {
    if endpoint.scheme() == "https" {
        return true;
    }

    match endpoint.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => address.is_loopback(),
        Some(Host::Ipv6(address)) => address.is_loopback(),
        None => false,
    }
}

/// Renders an error and its source chain as one line.
pub fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}

/// Upload errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Endpoint violates URL policy.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Local file could not be read.
    #[error("unable to read '{}': {source}", path.display())]
    ReadFile {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// File metadata cannot be encoded into a multipart part.
    #[error("invalid file: {0}")]
    InvalidFile(String),
    /// Request failed before a complete response was obtained.
    #[error("{0}")]
    Transport(String),
}
