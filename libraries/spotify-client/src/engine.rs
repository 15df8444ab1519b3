//! Request execution: auth header, status classification, rate-limit retry
//! and decoding into caller-chosen shapes.

use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use spotify_auth::AuthManager;
use spotify_core::{Result, SpotifyError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Wait applied when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Source of bearer tokens for outgoing requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

#[async_trait]
impl TokenProvider for AuthManager {
    async fn access_token(&self) -> Result<String> {
        self.get_access_token().await
    }
}

/// Fixed token, for scripts and tests that already hold one.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
enum Body {
    Json(Value),
    Raw {
        content_type: &'static str,
        data: String,
    },
}

/// A single API call, described independently of how it is sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Body>,
    max_retries: Option<u32>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            max_retries: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the parameter only when a value is given.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Send `data` verbatim with the given content type.
    pub fn raw(mut self, content_type: &'static str, data: impl Into<String>) -> Self {
        self.body = Some(Body::Raw {
            content_type,
            data: data.into(),
        });
        self
    }

    /// Override the engine's default retry budget for this call.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Sends [`ApiRequest`]s to the Web API.
///
/// Every attempt asks the [`TokenProvider`] for a token, so a refresh that
/// happens while waiting out a rate limit is picked up on the retry.
pub struct RequestEngine {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    max_retries: u32,
}

impl RequestEngine {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("typed-spotify/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpotifyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            tokens,
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `request` and decode the body as `T`.
    ///
    /// `Ok(None)` means the call succeeded without content: an empty body,
    /// or one that is not JSON at all. JSON of the wrong shape is an error.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        let path = request.path.clone();
        match self.send(request).await? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                SpotifyError::decode(format!("Unexpected response shape for {}: {}", path, e))
            }),
            None => Ok(None),
        }
    }

    /// Like [`RequestEngine::execute`] for endpoints that must return a body.
    pub async fn execute_expect<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        self.execute(request).await?.ok_or_else(|| {
            SpotifyError::decode(format!("Expected a response body from {}", path))
        })
    }

    /// Send `request` and discard whatever comes back.
    pub async fn execute_unit(&self, request: ApiRequest) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: ApiRequest) -> Result<Option<Value>> {
        let max_retries = request.max_retries.unwrap_or(self.max_retries);
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut rate_limited = 0u32;

        loop {
            let token = self.tokens.access_token().await?;

            let mut builder = self
                .http
                .request(request.method.clone(), &url)
                .bearer_auth(&token);
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            match &request.body {
                Some(Body::Json(body)) => builder = builder.json(body),
                Some(Body::Raw { content_type, data }) => {
                    builder = builder.header(CONTENT_TYPE, *content_type).body(data.clone());
                }
                None => {}
            }

            debug!(method = %request.method, path = %request.path, "Sending request");

            let response = builder
                .send()
                .await
                .map_err(|e| SpotifyError::Transport(e.to_string()))?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                rate_limited += 1;
                if rate_limited >= max_retries {
                    error!(
                        path = %request.path,
                        attempts = rate_limited,
                        "Rate limit retries exhausted"
                    );
                    return Err(SpotifyError::RateLimited {
                        attempts: rate_limited,
                    });
                }

                let delay = retry_after(response.headers());
                warn!(
                    path = %request.path,
                    attempt = rate_limited,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    "Rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| SpotifyError::Transport(e.to_string()))?;

            if !status.is_success() {
                return Err(classify(status, &bytes));
            }

            return Ok(parse_body(&request.path, &bytes));
        }
    }
}

/// Delay requested by a 429 response. Only integer seconds are honoured.
pub(crate) fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER, Duration::from_secs)
}

fn parse_body(path: &str, bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path, error = %e, "Response body is not JSON, treating as no content");
            None
        }
    }
}

/// Message from the API's error object, or the raw body.
fn error_message(status: StatusCode, bytes: &[u8]) -> String {
    let from_json = serde_json::from_slice::<Value>(bytes).ok().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
            .map(String::from)
    });

    from_json.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        if text.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            text
        }
    })
}

fn classify(status: StatusCode, bytes: &[u8]) -> SpotifyError {
    let message = error_message(status, bytes);
    match status {
        StatusCode::BAD_REQUEST => SpotifyError::Validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SpotifyError::Authentication(format!("{} ({})", message, status.as_u16()))
        }
        StatusCode::NOT_FOUND => SpotifyError::NotFound(message),
        _ => SpotifyError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use spotify_core::ErrorKind;

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), DEFAULT_RETRY_AFTER);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
        assert_eq!(retry_after(&headers), Duration::from_secs(2));

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(retry_after(&headers), DEFAULT_RETRY_AFTER);
    }

    #[test]
    fn test_parse_body() {
        assert!(parse_body("p", b"").is_none());
        assert!(parse_body("p", b"  \n").is_none());
        assert!(parse_body("p", b"snapshot-updated").is_none());
        assert!(parse_body("p", b"null").is_none());
        assert_eq!(parse_body("p", b"[true]"), Some(serde_json::json!([true])));
    }

    #[test]
    fn test_classify_uses_api_message() {
        let body = br#"{"error": {"status": 400, "message": "Invalid limit"}}"#;
        match classify(StatusCode::BAD_REQUEST, body) {
            SpotifyError::Validation(msg) => assert_eq!(msg, "Invalid limit"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_status_mapping() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, b"").kind(),
            ErrorKind::Authentication
        );
        assert_eq!(classify(StatusCode::FORBIDDEN, b"").kind(), ErrorKind::Authentication);
        assert_eq!(classify(StatusCode::NOT_FOUND, b"").kind(), ErrorKind::NotFound);

        let err = classify(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_query_opt_skips_none() {
        let request = ApiRequest::get("me/albums")
            .query("limit", 10)
            .query_opt("market", None::<&str>)
            .query_opt("offset", Some(20));
        assert_eq!(
            request.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_token_failure_stops_before_network() {
        let mut tokens = MockTokenProvider::new();
        tokens
            .expect_access_token()
            .times(1)
            .returning(|| Err(SpotifyError::StateMismatch));

        // Nothing listens here; a network attempt would surface as Transport.
        let engine = RequestEngine::new(
            ClientConfig::new("http://127.0.0.1:9"),
            Arc::new(tokens),
        )
        .unwrap();

        let err = engine
            .execute_unit(ApiRequest::get("me"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::StateMismatch));
    }
}
