//! Read-only identity accessors over ambient request headers.
//!
//! All three accessors are total functions: an absent, non-UTF-8, or
//! non-numeric field yields the anonymous default (`false` / `0`), never
//! an error. Downstream code can call them unconditionally, with no guard
//! code. The headers are authoritative only after
//! [`authenticate`](crate::auth::authenticate) has run on the request.

use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Marker header set by a trusted upstream for requests that require no
/// authentication. Never written by this crate.
pub const HEADER_PUBLIC: &str = "x_public";
/// Header stamped with the end user id after successful resolution.
pub const HEADER_CALLER_ID: &str = "x-caller-id";
/// Header stamped with the client application id after successful resolution.
pub const HEADER_CLIENT_ID: &str = "x-client-id";
/// Query parameter carrying the opaque access token.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// True iff the request is marked public by the upstream gateway.
///
/// Exact, case-sensitive match: `"True"` and `"1"` do not count.
pub fn is_public(headers: &HeaderMap) -> bool {
    headers.get(HEADER_PUBLIC).and_then(|v| v.to_str().ok()) == Some("true")
}

/// End user id stamped by the interceptor. `0` means unknown/unauthenticated.
pub fn caller_id(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_CALLER_ID)
}

/// Client application id stamped by the interceptor. `0` means unknown.
pub fn client_id(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_CLIENT_ID)
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Identity of the caller as stamped by the interceptor, available to any
/// handler via Axum's `FromRequestParts`.
///
/// Extraction never rejects: an unauthenticated request yields the
/// anonymous identity (both ids `0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    /// End user the access token represents; `0` when anonymous.
    pub caller_id: i64,
    /// Client application the token was issued to; `0` when anonymous.
    pub client_id: i64,
}

impl CallerIdentity {
    /// True when no resolved identity is attached to the request.
    pub fn is_anonymous(&self) -> bool {
        self.caller_id == 0
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            caller_id: caller_id(&parts.headers),
            client_id: client_id(&parts.headers),
        })
    }
}
