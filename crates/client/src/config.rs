//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLATEFUL_API_URL` - Base URL of the food-ordering API
//!   (e.g., `http://localhost:8000/api/`)
//!
//! ## Optional
//! - `PLATEFUL_API_TOKEN` - Pre-issued auth token (skips interactive login)
//! - `PLATEFUL_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Client application configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the remote API. Trailing slash is normalized on load so
    /// relative endpoint paths always join correctly.
    pub api_url: Url,
    /// Pre-issued auth token, if any.
    pub api_token: Option<SecretString>,
    /// Transport-level request timeout.
    pub http_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("PLATEFUL_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("PLATEFUL_API_URL".into()))?;
        let api_url = Self::parse_api_url(&raw_url)?;

        let api_token = std::env::var("PLATEFUL_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let http_timeout = match std::env::var("PLATEFUL_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("PLATEFUL_HTTP_TIMEOUT_SECS".into(), e.to_string())
            })?),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            api_token,
            http_timeout,
        })
    }

    fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
        // Url::join drops the last path segment unless the base ends in '/'
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        Url::parse(&normalized)
            .map_err(|e| ConfigError::InvalidEnvVar("PLATEFUL_API_URL".into(), e.to_string()))
    }
}
