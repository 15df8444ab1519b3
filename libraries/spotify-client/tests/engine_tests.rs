//! RequestEngine behaviour against a mock Web API.

use async_trait::async_trait;
use serde_json::{json, Value};
use spotify_client::{
    ApiRequest, ClientConfig, RequestEngine, SpotifyClient, StaticToken, TokenProvider,
};
use spotify_core::{ErrorKind, Result, SpotifyError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build an engine pointed at the mock server
fn setup_engine(server: &MockServer) -> RequestEngine {
    let config = ClientConfig::new(format!("{}/v1", server.uri()));
    RequestEngine::new(config, Arc::new(StaticToken::new("test-token"))).unwrap()
}

/// Counts how often a token is requested.
struct CountingToken(AtomicUsize);

#[async_trait]
impl TokenProvider for CountingToken {
    async fn access_token(&self) -> Result<String> {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{}", n))
    }
}

// =============================================================================
// Body Decoding Tests
// =============================================================================

mod decoding {
    use super::*;

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let body: Value = engine.execute_expect(ApiRequest::get("me")).await.unwrap();
        assert_eq!(body["id"], "u1");
    }

    #[tokio::test]
    async fn test_empty_body_is_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/me/albums"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let result: Option<Value> = engine.execute(ApiRequest::put("me/albums")).await.unwrap();
        assert!(result.is_none());

        let client = SpotifyClient::new(
            ClientConfig::new(format!("{}/v1", server.uri())),
            Arc::new(StaticToken::new("test-token")),
        )
        .unwrap();
        assert!(client.player().playback_state(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_is_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/me/player/next"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let result: Option<Value> = engine
            .execute(ApiRequest::post("me/player/next"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/albums/contains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": 1})))
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let err = engine
            .execute::<Vec<bool>>(ApiRequest::get("me/albums/contains"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[tokio::test]
    async fn test_expect_rejects_missing_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let err = engine
            .execute_expect::<Value>(ApiRequest::get("me"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::Decode(_)));
    }
}

// =============================================================================
// Status Classification Tests
// =============================================================================

mod errors {
    use super::*;

    async fn error_for(status: u16, body: Value) -> SpotifyError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/albums/x"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        setup_engine(&server)
            .execute::<Value>(ApiRequest::get("albums/x"))
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_bad_request_is_validation() {
        let err = error_for(
            400,
            json!({"error": {"status": 400, "message": "invalid id"}}),
        )
        .await;
        match err {
            SpotifyError::Validation(msg) => assert_eq!(msg, "invalid id"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_are_authentication() {
        let unauthorized = error_for(
            401,
            json!({"error": {"status": 401, "message": "The access token expired"}}),
        )
        .await;
        assert_eq!(unauthorized.kind(), ErrorKind::Authentication);
        assert!(unauthorized.to_string().contains("The access token expired"));

        let forbidden = error_for(
            403,
            json!({"error": {"status": 403, "message": "Premium required"}}),
        )
        .await;
        assert_eq!(forbidden.kind(), ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_not_found() {
        let err = error_for(
            404,
            json!({"error": {"status": 404, "message": "Resource not found"}}),
        )
        .await;
        assert!(matches!(err, SpotifyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let err = error_for(
            503,
            json!({"error": {"status": 503, "message": "Service unavailable"}}),
        )
        .await;
        match err {
            SpotifyError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service unavailable");
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let engine = RequestEngine::new(
            ClientConfig::new(format!("http://127.0.0.1:{}/v1", port)),
            Arc::new(StaticToken::new("t")),
        )
        .unwrap();

        let err = engine.execute_unit(ApiRequest::get("me")).await.unwrap_err();
        assert!(matches!(err, SpotifyError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}

// =============================================================================
// Rate Limit Tests
// =============================================================================

mod rate_limit {
    use super::*;

    #[tokio::test]
    async fn test_retry_after_is_honoured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let started = Instant::now();
        let body: Value = engine.execute_expect(ApiRequest::get("me")).await.unwrap();

        assert_eq!(body["id"], "u1");
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(3)
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let err = engine.execute_unit(ApiRequest::get("me")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RateLimit);
        match err {
            SpotifyError::RateLimited { attempts } => assert_eq!(attempts, 3),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_per_request_retry_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(1)
            .mount(&server)
            .await;

        let engine = setup_engine(&server);
        let err = engine
            .execute_unit(ApiRequest::get("me").max_retries(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::RateLimited { attempts: 1 }));
    }

    #[tokio::test]
    async fn test_token_fetched_for_every_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .and(header("authorization", "Bearer token-0"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = Arc::new(CountingToken(AtomicUsize::new(0)));
        let engine = RequestEngine::new(
            ClientConfig::new(format!("{}/v1", server.uri())),
            tokens.clone(),
        )
        .unwrap();

        engine.execute_unit(ApiRequest::get("me")).await.unwrap();
        assert_eq!(tokens.0.load(Ordering::SeqCst), 2);
    }
}
