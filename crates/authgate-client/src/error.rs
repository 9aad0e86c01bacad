//! Error taxonomy for token resolution.
//!
//! Callers care about exactly two classes: "token unknown" (benign, the
//! request degrades to anonymous) and everything else (internal fault,
//! the request should be aborted). [`TokenError::is_not_found`] is the
//! classification the interceptor consults; the finer-grained variants
//! exist for logging and diagnostics, not for control flow.

use thiserror::Error;

/// Errors produced by [`TokenClient::resolve`](crate::TokenClient::resolve).
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token service does not recognize the token (error body with
    /// `status == 404`).
    #[error("access token not found: {message}")]
    NotFound {
        /// Message reported by the token service.
        message: String,
    },

    /// Transport-level failure: connection error, timeout, TLS failure.
    #[error("token service unreachable: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The token service reported an error other than not-found, or its
    /// error body could not be decoded.
    #[error("token service error (status {status}): {message}")]
    Service {
        /// Status reported in the error body, or the HTTP status when the
        /// body was undecodable.
        status: u16,
        /// Message reported by the service, or the raw body text.
        message: String,
    },

    /// The success response body could not be decoded.
    #[error("malformed token service response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

impl TokenError {
    /// True for the benign "token unknown" outcome. Every other variant is
    /// internal-fault class and non-recoverable at this layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
