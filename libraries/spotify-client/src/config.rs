//! Client configuration.

use spotify_core::{Result, SpotifyError};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings for [`crate::RequestEngine`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.spotify.com/v1`
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Rate-limited attempts allowed per request before giving up
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the base URL and strip any trailing slash.
    pub(crate) fn normalized_base_url(&self) -> Result<String> {
        let url = self.base_url.trim_end_matches('/');
        if url.is_empty() {
            return Err(SpotifyError::Config("Base URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SpotifyError::Config(
                "Base URL must start with http:// or https://".into(),
            ));
        }
        Ok(url.to_string())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
