/// Core error types for Typed Spotify
use thiserror::Error;

/// Result type alias using `SpotifyError`
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Stable classification of every [`SpotifyError`].
///
/// Callers that only care about the broad failure category match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Token exchange/refresh failure, interactive flow failure, or upstream 401/403
    Authentication,
    /// Upstream 404
    NotFound,
    /// Local precondition violation or upstream 400
    Validation,
    /// Rate-limit retries exhausted
    RateLimit,
    /// Any other upstream failure
    Api,
    /// Credential persistence failure
    Storage,
    /// Invalid client or application configuration
    Config,
}

/// Core error type for Typed Spotify
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Token exchange or refresh failed, or the API rejected the credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No callback arrived before the authorization window closed
    #[error("Authorization timed out after {seconds} seconds")]
    AuthorizationTimeout { seconds: u64 },

    /// Callback `state` did not match the nonce sent with the authorization request
    #[error("Authorization failed: state mismatch, possible CSRF attack")]
    StateMismatch,

    /// The user or the authorization server refused access
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Upstream 404
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request parameters (checked locally or rejected upstream with 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Still rate limited after the configured number of attempts
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body was valid JSON but not the requested shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Credential persistence I/O failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpotifyError {
    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_)
            | Self::AuthorizationTimeout { .. }
            | Self::StateMismatch
            | Self::AuthorizationDenied(_) => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::Api { .. } | Self::Transport(_) | Self::Decode(_) => ErrorKind::Api,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Upstream HTTP status, when the error came from a response that carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Whether this error belongs to the authentication family.
    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_failures_are_authentication() {
        assert!(SpotifyError::StateMismatch.is_authentication());
        assert!(SpotifyError::AuthorizationTimeout { seconds: 300 }.is_authentication());
        assert!(SpotifyError::AuthorizationDenied("access_denied".into()).is_authentication());
        assert!(!SpotifyError::validation("too many ids").is_authentication());
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SpotifyError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            SpotifyError::RateLimited { attempts: 3 }.kind(),
            ErrorKind::RateLimit
        );
        assert_eq!(SpotifyError::Transport("reset".into()).kind(), ErrorKind::Api);
        assert_eq!(SpotifyError::decode("missing key").kind(), ErrorKind::Api);
        assert_eq!(SpotifyError::storage("disk full").kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_status() {
        let err = SpotifyError::Api {
            status: 502,
            message: "Bad gateway".into(),
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(SpotifyError::Transport("timeout".into()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = SpotifyError::AuthorizationTimeout { seconds: 300 };
        assert_eq!(err.to_string(), "Authorization timed out after 300 seconds");

        let err = SpotifyError::Api {
            status: 500,
            message: "Internal error".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpotifyError>();
    }
}
