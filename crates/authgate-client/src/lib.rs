//! # authgate-client — Typed client for the token-resolution service
//!
//! Exchanges an opaque access token identifier for the identity record it
//! represents, via a single RPC-style call to the OAuth service:
//!
//! ```text
//! POST {base_url}/oauth/access_token/{token_id}
//!   200 → {"id": "abc123", "user_id": 55, "client_id": 9}
//!   4xx/5xx → {"status": 404, "message": "not found"}
//! ```
//!
//! The error body's `status` field (not the HTTP status line) decides
//! whether a failure is the benign "token unknown" outcome or an internal
//! fault. See [`TokenError`] for the full taxonomy.
//!
//! ## Usage
//!
//! Build one [`TokenClient`] at process start and share it; clones are
//! cheap and share the underlying connection pool. The configured timeout
//! is the only deadline. There is no retry and no caching: every
//! `resolve` call maps to exactly one outbound request.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use authgate_client::{TokenClient, TokenServiceConfig};
//!
//! let client = TokenClient::new(TokenServiceConfig::from_env()?)?;
//! let record = client.resolve("abc123").await?;
//! assert_eq!(record.user_id, 55);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod token;

pub use config::{ConfigError, TokenServiceConfig};
pub use error::TokenError;
pub use token::{AccessToken, TokenClient};
