//! Interceptor error type with a structured JSON response body.
//!
//! Only fatal outcomes are errors here; "no token" and "unknown token" are
//! successful anonymous outcomes and never reach this type. Internal
//! detail is logged but never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use authgate_client::TokenError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Fatal authentication failures.
///
/// Both variants render as 500: indistinguishable internal faults from the
/// caller's point of view, but always distinguishable from a valid
/// anonymous request, which is a success.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token service failed in a way other than "token unknown".
    #[error("access token resolution failed: {0}")]
    Resolution(#[from] TokenError),

    /// No `TokenClient` was found in the request extensions: the
    /// middleware is mounted without its `Extension` layer.
    #[error("token client missing from request extensions")]
    MissingClient,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Log the detail for operators; never expose it to clients.
        tracing::error!(error = %self, "authentication aborted");

        let body = ErrorBody {
            error: ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal error occurred".to_string(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
