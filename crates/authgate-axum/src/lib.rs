//! # authgate-axum — request-authentication interceptor
//!
//! Validates the opaque `access_token` query parameter against the remote
//! token service and stamps the request with resolved identity, so that
//! downstream handlers can trust two pieces of context: who is calling,
//! and on behalf of which client application.
//!
//! | Field | Direction | Meaning |
//! |-------|-----------|---------|
//! | `access_token` query param | read | opaque token identifier |
//! | `x_public` header | read | set by a trusted upstream; `"true"` marks the request public |
//! | `x-caller-id` header | cleared, then written | end user id, decimal |
//! | `x-client-id` header | cleared, then written | client application id, decimal |
//!
//! ## Wiring
//!
//! Mount [`auth_middleware`] ahead of every handler that depends on
//! identity, together with the `Extension` carrying the shared
//! [`TokenClient`](authgate_client::TokenClient):
//!
//! ```ignore
//! let client = TokenClient::new(TokenServiceConfig::from_env()?)?;
//!
//! let app = Router::new()
//!     .route("/items", get(list_items))
//!     .layer(axum::middleware::from_fn(authgate_axum::auth_middleware))
//!     .layer(axum::Extension(client));
//! ```
//!
//! ## Failure policy
//!
//! An absent/empty token and an unknown token both degrade the request to
//! anonymous (identity headers cleared, request forwarded); whether
//! anonymous access is acceptable is a downstream authorization decision,
//! not an authentication one. Every other resolution failure aborts the
//! request with a 500.

pub mod auth;
pub mod error;
pub mod identity;

pub use auth::{auth_middleware, authenticate};
pub use error::AuthError;
pub use identity::{caller_id, client_id, is_public, CallerIdentity};
