//! Token service client configuration.
//!
//! The base URL has no default; it names an internal deployment and must
//! be supplied explicitly or via the environment. The timeout defaults to
//! 150ms, enforced by the transport client on every request.

use url::Url;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 150;

/// Configuration for connecting to the token-resolution service.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Base URL of the OAuth token service.
    pub base_url: Url,
    /// Request timeout in milliseconds, enforced by the transport client.
    pub timeout_ms: u64,
}

impl TokenServiceConfig {
    /// Configuration with the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `AUTHGATE_TOKEN_SERVICE_URL` (required)
    /// - `AUTHGATE_TIMEOUT_MS` (default: 150)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw =
            std::env::var("AUTHGATE_TOKEN_SERVICE_URL").map_err(|_| ConfigError::MissingUrl)?;
        let base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e.to_string()))?;

        let timeout_ms = std::env::var("AUTHGATE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self {
            base_url,
            timeout_ms,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AUTHGATE_TOKEN_SERVICE_URL environment variable is required")]
    MissingUrl,
    #[error("invalid token service URL {0:?}: {1}")]
    InvalidUrl(String, String),
}
