//! Settings for the authorization-code flow.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CALLBACK_PORT: u16 = 9090;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Window in which the user has to complete the browser consent.
pub const DEFAULT_AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Application credentials and endpoints used by [`crate::AuthManager`].
#[derive(Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Requested scopes, joined with spaces on the wire
    pub scopes: Vec<String>,
    pub callback_port: u16,
    pub authorize_url: String,
    pub token_url: String,
    /// Timeout for each token endpoint request
    pub request_timeout: Duration,
    pub authorization_timeout: Duration,
}

impl AuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
            callback_port: DEFAULT_CALLBACK_PORT,
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            authorization_timeout: DEFAULT_AUTHORIZATION_TIMEOUT,
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_callback_port(mut self, port: u16) -> Self {
        self.callback_port = port;
        self
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_authorization_timeout(mut self, timeout: Duration) -> Self {
        self.authorization_timeout = timeout;
        self
    }

    /// Redirect target registered with the authorization server.
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback", self.callback_port)
    }

    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("callback_port", &self.callback_port)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("request_timeout", &self.request_timeout)
            .field("authorization_timeout", &self.authorization_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("id", "secret");
        assert_eq!(config.redirect_uri(), "http://localhost:9090/callback");
        assert_eq!(config.authorization_timeout, Duration::from_secs(300));
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_scope_string() {
        let config = AuthConfig::new("id", "secret")
            .with_scopes(["user-read-private", "user-follow-read"])
            .with_callback_port(8888);
        assert_eq!(config.scope_string(), "user-read-private user-follow-read");
        assert_eq!(config.redirect_uri(), "http://localhost:8888/callback");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("id", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
