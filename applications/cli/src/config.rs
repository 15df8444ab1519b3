/// CLI configuration
use crate::error::{CliError, Result};
use serde::Deserialize;
use spotify_auth::AuthConfig;
use spotify_client::ClientConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "spotify.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    #[serde(default = "default_callback_port")]
    pub callback_port: u16,

    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (SPOTIFY_CLIENT_ID, SPOTIFY_SCOPES, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("SPOTIFY")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("scopes"),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(CliError::Config(
                "Client id is required (set SPOTIFY_CLIENT_ID)".to_string(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(CliError::Config(
                "Client secret is required (set SPOTIFY_CLIENT_SECRET)".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(&self.client_id, &self.client_secret)
            .with_scopes(self.scopes.iter().cloned())
            .with_callback_port(self.callback_port)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
            .with_max_retries(self.max_retries)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

// Default values
fn default_scopes() -> Vec<String> {
    [
        "user-read-private",
        "user-read-email",
        "user-follow-read",
        "user-library-read",
        "user-top-read",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_callback_port() -> u16 {
    spotify_auth::config::DEFAULT_CALLBACK_PORT
}

fn default_token_path() -> PathBuf {
    PathBuf::from(spotify_auth::store::DEFAULT_CREDENTIAL_PATH)
}

fn default_base_url() -> String {
    spotify_client::config::DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    spotify_client::config::DEFAULT_MAX_RETRIES
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file_with_defaults() {
        let file = write_config(
            r#"
client_id = "abc"
client_secret = "def"
callback_port = 8888
"#,
        );
        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.client_id, "abc");
        assert_eq!(config.callback_port, 8888);
        assert_eq!(config.token_path, PathBuf::from(".spotify"));
        assert_eq!(config.max_retries, 3);
        assert!(config.scopes.contains(&"user-follow-read".to_string()));
        config.validate().unwrap();

        let auth = config.auth_config();
        assert_eq!(auth.redirect_uri(), "http://localhost:8888/callback");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/spotify.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_validate_requires_credentials() {
        let file = write_config("client_id = \"abc\"\n");
        let config = CliConfig::load(Some(file.path())).unwrap();
        assert!(config.validate().is_err());
    }
}
