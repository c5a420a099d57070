//! Client configuration: endpoint URL layered from default, environment, and
//! explicit overrides.

use thiserror::Error;
use tracing::warn;
use url::Url;
use video_risk_upload::{DEFAULT_ENDPOINT_URL, UploadError, is_local_or_https, validate_endpoint};

/// Environment variable overriding the analysis endpoint.
pub const ENDPOINT_ENV_VAR: &str = "VIDEO_RISK_ENDPOINT_URL";

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint_url: Url,
}

impl ClientConfig {
    /// Builds a configuration targeting `endpoint_url`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Endpoint`] when the URL fails endpoint policy.
    pub fn new(endpoint_url: &str) -> Result<Self, ConfigError> {
        let endpoint_url =
            validate_endpoint(endpoint_url).map_err(|source| ConfigError::Endpoint {
                value: endpoint_url.to_string(),
                source,
            })?;

        if !is_local_or_https(&endpoint_url) {
            warn!(endpoint = %endpoint_url, "uploading over plain http to a remote host");
        }

        Ok(Self { endpoint_url })
    }

    /// Builds a configuration for [`DEFAULT_ENDPOINT_URL`].
    ///
    /// # Errors
    /// Never fails in practice; the signature matches [`ClientConfig::new`].
    pub fn with_default_endpoint() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_ENDPOINT_URL)
    }

    /// Reads [`ENDPOINT_ENV_VAR`] from the process environment, falling back to
    /// the default endpoint when unset or blank.
    ///
    /// # Errors
    /// Returns [`ConfigError::Endpoint`] for an invalid override.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::Endpoint`] for an invalid override.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENDPOINT_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::with_default_endpoint(),
        }
    }

    /// Target address of every submit.
    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Endpoint override failed validation.
    #[error("endpoint '{value}' rejected: {source}")]
    Endpoint {
        /// Raw configured value.
        value: String,
        /// Validation failure.
        source: UploadError,
    },
}
