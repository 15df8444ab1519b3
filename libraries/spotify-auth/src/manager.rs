//! Credential lifecycle: load, refresh, and interactive authorization.

use crate::browser::{SystemBrowser, UrlOpener};
use crate::callback::CallbackListener;
use crate::config::AuthConfig;
use crate::credential::{Credential, TokenResponse};
use crate::request::AuthorizationRequest;
use crate::store::CredentialStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use spotify_core::{Result, SpotifyError};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use url::Url;

/// Where the manager is in the credential lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    NoCredential,
    Authorizing,
    Authorized,
    RefreshPending,
}

/// Owns the current credential and keeps it usable.
///
/// [`AuthManager::get_access_token`] is the entry point for request code:
/// it serves the stored token while valid, refreshes it when expired, and
/// falls back to the interactive browser flow when neither works. Concurrent
/// callers are serialized so only one of them refreshes or authorizes.
pub struct AuthManager {
    config: AuthConfig,
    http: reqwest::Client,
    store: Arc<dyn CredentialStore>,
    opener: Arc<dyn UrlOpener>,
    state: RwLock<AuthState>,
    token_lock: Mutex<()>,
}

impl AuthManager {
    pub fn new(config: AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SpotifyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            store,
            opener: Arc::new(SystemBrowser),
            state: RwLock::new(AuthState::NoCredential),
            token_lock: Mutex::new(()),
        })
    }

    /// Replace the browser launcher.
    pub fn with_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Lifecycle state as of the last operation.
    pub async fn state(&self) -> AuthState {
        *self.state.read().await
    }

    async fn set_state(&self, state: AuthState) {
        *self.state.write().await = state;
    }

    /// The currently stored credential, if any. Never triggers network I/O.
    pub async fn credential(&self) -> Option<Credential> {
        self.store.load().await
    }

    /// Return a valid access token, refreshing or authorizing as needed.
    pub async fn get_access_token(&self) -> Result<String> {
        let _guard = self.token_lock.lock().await;

        match self.store.load().await {
            Some(credential) if !credential.is_expired() => {
                self.set_state(AuthState::Authorized).await;
                return Ok(credential.access_token().to_string());
            }
            Some(credential) => {
                debug!(expires_at = %credential.expires_at(), "Stored credential expired");
                if let Some(refresh_token) = credential.refresh_token() {
                    self.set_state(AuthState::RefreshPending).await;
                    match self.refresh(refresh_token).await {
                        Ok(refreshed) => return Ok(refreshed.access_token().to_string()),
                        Err(e) => {
                            info!(error = %e, "Token refresh failed, starting authorization flow");
                        }
                    }
                }
            }
            None => debug!("No stored credential"),
        }

        let credential = self.authorize().await?;
        Ok(credential.access_token().to_string())
    }

    /// Exchange `refresh_token` for a new credential and persist it.
    ///
    /// If the response carries no refresh token the supplied one is kept.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential> {
        info!("Refreshing access token");

        let result = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await;
        let mut credential = match result {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return Err(e);
            }
        };
        if credential.refresh_token().is_none() {
            credential = credential.with_refresh_token(refresh_token);
        }

        self.store.save(&credential).await?;
        self.set_state(AuthState::Authorized).await;
        Ok(credential)
    }

    /// Run the interactive browser flow and persist the resulting credential.
    pub async fn authorize(&self) -> Result<Credential> {
        self.set_state(AuthState::Authorizing).await;

        let request = AuthorizationRequest::new(self.config.callback_port);
        let result = self.run_authorization(&request).await;

        self.set_state(if result.is_ok() {
            AuthState::Authorized
        } else {
            AuthState::NoCredential
        })
        .await;
        result
    }

    async fn run_authorization(&self, request: &AuthorizationRequest) -> Result<Credential> {
        let mut listener = CallbackListener::start(request.callback_port(), request.state()).await?;

        let outcome = async {
            let url = self.authorization_url(request)?;
            info!("Opening browser for authorization");
            if let Err(e) = self.opener.open(&url) {
                warn!(error = %e, url = %url, "Could not open a browser, visit the URL manually");
            }

            let code = listener
                .await_result(self.config.authorization_timeout)
                .await?;
            self.exchange_code(&code).await
        }
        .await;

        listener.stop().await;
        outcome
    }

    /// Exchange an authorization code for a credential and persist it.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let redirect_uri = self.config.redirect_uri();
        let credential = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &redirect_uri),
            ])
            .await?;

        self.store.save(&credential).await?;
        info!("Authorization complete");
        Ok(credential)
    }

    /// Remove the stored credential.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.token_lock.lock().await;
        self.store.delete().await?;
        self.set_state(AuthState::NoCredential).await;
        info!("Logged out");
        Ok(())
    }

    /// Consent URL for `request`.
    pub fn authorization_url(&self, request: &AuthorizationRequest) -> Result<Url> {
        let redirect_uri = self.config.redirect_uri();
        let scope = self.config.scope_string();
        Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("state", request.state()),
            ],
        )
        .map_err(|e| SpotifyError::Config(format!("Invalid authorize URL: {}", e)))
    }

    fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", STANDARD.encode(pair))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Credential> {
        let response = self
            .http
            .post(&self.config.token_url)
            .header(AUTHORIZATION, self.basic_auth_header())
            .form(form)
            .send()
            .await
            .map_err(|e| SpotifyError::authentication(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::authentication(format!(
                "Token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let payload: TokenResponse = response.json().await.map_err(|e| {
            SpotifyError::authentication(format!("Failed to parse token response: {}", e))
        })?;
        payload.into_credential(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockCredentialStore;

    fn manager(store: MockCredentialStore) -> AuthManager {
        AuthManager::new(AuthConfig::new("client", "secret"), Arc::new(store)).unwrap()
    }

    #[test]
    fn test_basic_auth_header() {
        let manager = manager(MockCredentialStore::new());
        // base64("client:secret")
        assert_eq!(manager.basic_auth_header(), "Basic Y2xpZW50OnNlY3JldA==");
    }

    #[test]
    fn test_authorization_url() {
        let config = AuthConfig::new("client", "secret")
            .with_scopes(["user-read-private", "user-top-read"])
            .with_callback_port(8123);
        let manager = AuthManager::new(config, Arc::new(MockCredentialStore::new())).unwrap();
        let request = AuthorizationRequest::new(8123);

        let url = manager.authorization_url(&request).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(params["client_id"], "client");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["redirect_uri"], "http://localhost:8123/callback");
        assert_eq!(params["scope"], "user-read-private user-top-read");
        assert_eq!(params["state"], request.state());
    }

    #[tokio::test]
    async fn test_valid_credential_served_from_store() {
        let mut store = MockCredentialStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Some(Credential::new("cached", 3600).unwrap()));
        store.expect_save().never();

        let manager = manager(store);
        assert_eq!(manager.get_access_token().await.unwrap(), "cached");
        assert_eq!(manager.state().await, AuthState::Authorized);
    }

    #[tokio::test]
    async fn test_logout_propagates_storage_error() {
        let mut store = MockCredentialStore::new();
        store
            .expect_delete()
            .times(1)
            .returning(|| Err(SpotifyError::storage("read-only filesystem")));

        let err = manager(store).logout().await.unwrap_err();
        assert!(matches!(err, SpotifyError::Storage(_)));
    }
}
