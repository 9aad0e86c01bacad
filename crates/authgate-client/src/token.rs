//! Typed client for the token-resolution endpoint.
//!
//! One endpoint: `POST {base_url}/oauth/access_token/{token_id}`. The
//! service answers a success body with the resolved identity record, or an
//! error body `{"status": ..., "message": ...}` whose `status` field (not
//! the HTTP status line) is what distinguishes "token unknown" from every
//! other fault. A 404 produced by an intermediary with a non-conforming
//! body therefore lands in the internal-fault class; that asymmetry is the
//! service's documented contract.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TokenServiceConfig;
use crate::error::TokenError;

/// Resolved identity record returned for a valid access token.
///
/// Meaningful only in combination with the token id that produced it;
/// never persisted beyond the processing of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Opaque token identifier, echoed back by the service.
    pub id: String,
    /// End user the token represents.
    pub user_id: i64,
    /// Client application the token was issued to.
    pub client_id: i64,
}

/// Error body shape the token service uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    status: u16,
    message: String,
}

/// Client for the token-resolution service.
///
/// Holds a shared `reqwest::Client` with a fixed sub-second timeout. Build
/// one at process start and clone it freely; clones share the connection
/// pool and are safe for concurrent use across requests.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl TokenClient {
    /// Create a client from configuration.
    pub fn new(config: TokenServiceConfig) -> Result<Self, TokenError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TokenError::Transport { source: e })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Exchange an opaque token id for the identity record it represents.
    ///
    /// Sends exactly one request per invocation: no retry, no caching.
    /// Exceeding the configured timeout surfaces as
    /// [`TokenError::Transport`], indistinguishable from any other
    /// transport fault.
    pub async fn resolve(&self, token_id: &str) -> Result<AccessToken, TokenError> {
        let url = format!("{}oauth/access_token/{token_id}", self.base_url);

        let resp = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| TokenError::Transport { source: e })?;

        if !resp.status().is_success() {
            let http_status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();

            return Err(match serde_json::from_str::<ServiceErrorBody>(&body) {
                Ok(err) if err.status == 404 => TokenError::NotFound {
                    message: err.message,
                },
                Ok(err) => {
                    tracing::warn!(status = err.status, "token service reported error");
                    TokenError::Service {
                        status: err.status,
                        message: err.message,
                    }
                }
                Err(_) => {
                    tracing::warn!(status = http_status, "undecodable token service error body");
                    TokenError::Service {
                        status: http_status,
                        message: body,
                    }
                }
            });
        }

        resp.json()
            .await
            .map_err(|e| TokenError::Decode { source: e })
    }
}
