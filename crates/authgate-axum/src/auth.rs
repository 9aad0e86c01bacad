//! The authentication interceptor.
//!
//! Per request, in order:
//!
//! 1. remove any `x-caller-id` / `x-client-id` headers; they are untrusted
//!    input and must never survive into the handler pipeline, whether or
//!    not authentication is attempted;
//! 2. read and trim the `access_token` query parameter; absent or empty
//!    means the request proceeds anonymous, with no remote call;
//! 3. resolve the token remotely. Unknown token: anonymous pass-through.
//!    Any other failure: abort. Success: stamp both identity headers.
//!
//! The flow is linear, with no loops or retries:
//!
//! ```text
//! START → CLEARED → (no token)          → DONE-ANON
//!                 → resolve → not found → DONE-ANON
//!                           → fault     → DONE-FAIL
//!                           → success   → DONE-AUTH
//! ```
//!
//! The public flag (`x_public`) is never consulted here; it is an input to
//! downstream authorization, not to authentication.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use authgate_client::TokenClient;

use crate::error::AuthError;
use crate::identity::{HEADER_CALLER_ID, HEADER_CLIENT_ID, PARAM_ACCESS_TOKEN};

/// Authenticate one request in place.
///
/// Returns `Ok(())` both for an authenticated request (identity headers
/// stamped) and for an anonymous one (headers cleared); `Err` only for
/// faults that should abort request processing. Re-running on the same
/// request yields the same header outcome; there is no accumulated state.
pub async fn authenticate<B>(
    client: &TokenClient,
    request: &mut axum::http::Request<B>,
) -> Result<(), AuthError> {
    let headers = request.headers_mut();
    headers.remove(HEADER_CALLER_ID);
    headers.remove(HEADER_CLIENT_ID);

    let token = request
        .uri()
        .query()
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(name, _)| name == PARAM_ACCESS_TOKEN)
                .map(|(_, value)| value.trim().to_owned())
        })
        .unwrap_or_default();

    if token.is_empty() {
        return Ok(());
    }

    match client.resolve(&token).await {
        Ok(record) => {
            let headers = request.headers_mut();
            headers.insert(HEADER_CLIENT_ID, HeaderValue::from(record.client_id));
            headers.insert(HEADER_CALLER_ID, HeaderValue::from(record.user_id));
            tracing::debug!(
                caller_id = record.user_id,
                client_id = record.client_id,
                "access token resolved"
            );
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            // Unknown token degrades the request to anonymous; downstream
            // authorization decides whether that is acceptable.
            tracing::debug!("unknown access token, request proceeds anonymous");
            Ok(())
        }
        Err(err) => Err(AuthError::Resolution(err)),
    }
}

/// axum middleware wrapper around [`authenticate`].
///
/// The shared [`TokenClient`] is read from the request extensions; mount
/// the middleware together with its `Extension` layer (see the crate
/// docs). A missing client is a wiring error and aborts the request.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let Some(client) = request.extensions().get::<TokenClient>().cloned() else {
        return AuthError::MissingClient.into_response();
    };

    match authenticate(&client, &mut request).await {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{caller_id, client_id};
    use authgate_client::TokenServiceConfig;
    use axum::http::Request;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(mock_server: &MockServer) -> TokenClient {
        TokenClient::new(TokenServiceConfig::new(mock_server.uri().parse().unwrap())).unwrap()
    }

    fn request(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    #[tokio::test]
    async fn no_token_passes_through_anonymous() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server);

        let mut req = request("/items");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 0);
        assert_eq!(client_id(req.headers()), 0);
    }

    #[tokio::test]
    async fn whitespace_token_makes_no_remote_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=%20%20");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 0);
        assert_eq!(client_id(req.headers()), 0);
    }

    #[tokio::test]
    async fn valid_token_stamps_identity_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc123",
                "user_id": 55,
                "client_id": 9
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=abc123");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 55);
        assert_eq!(client_id(req.headers()), 9);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_trimmed_before_resolution() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc123",
                "user_id": 55,
                "client_id": 9
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=%20abc123%20");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 55);
    }

    #[tokio::test]
    async fn unknown_token_degrades_to_anonymous() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token/expired-token"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "status": 404,
                "message": "not found"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=expired-token");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 0);
        assert_eq!(client_id(req.headers()), 0);
    }

    #[tokio::test]
    async fn service_fault_propagates_with_headers_cleared() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token/abc123"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "status": 500,
                "message": "users db down"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=abc123");
        // Forged identity attached by the caller must be gone even on the
        // failure path.
        req.headers_mut()
            .insert(HEADER_CALLER_ID, HeaderValue::from_static("999"));

        let err = authenticate(&client, &mut req).await.unwrap_err();
        assert!(matches!(err, AuthError::Resolution(_)));
        assert_eq!(caller_id(req.headers()), 0);
        assert_eq!(client_id(req.headers()), 0);
    }

    #[tokio::test]
    async fn forged_headers_never_survive_anonymous_pass() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server);

        let mut req = request("/items");
        req.headers_mut()
            .insert(HEADER_CALLER_ID, HeaderValue::from_static("999"));
        req.headers_mut()
            .insert(HEADER_CLIENT_ID, HeaderValue::from_static("42"));

        authenticate(&client, &mut req).await.unwrap();

        assert!(req.headers().get(HEADER_CALLER_ID).is_none());
        assert!(req.headers().get(HEADER_CLIENT_ID).is_none());
    }

    #[tokio::test]
    async fn authenticate_twice_is_idempotent_and_uncached() {
        let mock_server = MockServer::start().await;

        // Two invocations mean exactly two remote calls (no caching).
        Mock::given(method("POST"))
            .and(path("/oauth/access_token/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc123",
                "user_id": 55,
                "client_id": 9
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=abc123");

        authenticate(&client, &mut req).await.unwrap();
        let first = (caller_id(req.headers()), client_id(req.headers()));

        authenticate(&client, &mut req).await.unwrap();
        let second = (caller_id(req.headers()), client_id(req.headers()));

        assert_eq!(first, (55, 9));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn first_access_token_parameter_wins() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token/first"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "first",
                "user_id": 1,
                "client_id": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let mut req = request("/items?access_token=first&access_token=second");
        authenticate(&client, &mut req).await.unwrap();

        assert_eq!(caller_id(req.headers()), 1);
    }
}
