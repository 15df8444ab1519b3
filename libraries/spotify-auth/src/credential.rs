//! Access credential value object.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use spotify_core::{Result, SpotifyError};
use std::fmt;

/// The only token type the API issues.
pub const TOKEN_TYPE: &str = "Bearer";

/// Subtracted from `expires_in` when the expiry is derived at issue time.
pub const ISSUE_MARGIN_SECS: i64 = 60;

/// Additional buffer applied when checking expiry.
pub const EXPIRY_BUFFER_SECS: i64 = 30;

/// An issued access credential.
///
/// Values are never mutated once issued; a refresh produces a new
/// `Credential` that supersedes the old one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    token_type: String,
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    expires_in: u64,
    expires_at: DateTime<Utc>,
}

impl Credential {
    /// Issue a credential now.
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Result<Self> {
        Self::issued_at(access_token, expires_in, Utc::now())
    }

    /// Issue a credential at `issued`, deriving `expires_at` as
    /// `issued + expires_in - 60s`.
    pub fn issued_at(
        access_token: impl Into<String>,
        expires_in: u64,
        issued: DateTime<Utc>,
    ) -> Result<Self> {
        if expires_in == 0 {
            return Err(SpotifyError::validation("expires_in must be greater than 0"));
        }
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(|lifetime| Duration::try_seconds(lifetime - ISSUE_MARGIN_SECS))
            .and_then(|lifetime| issued.checked_add_signed(lifetime))
            .ok_or_else(|| {
                SpotifyError::validation(format!("expires_in is out of range: {}", expires_in))
            })?;

        Ok(Self {
            token_type: TOKEN_TYPE.to_string(),
            access_token: access_token.into(),
            refresh_token: None,
            scope: String::new(),
            expires_in,
            expires_at,
        })
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Override the derived expiry with an explicit one.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Space separated granted scopes.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired once `now` is within 30 seconds of `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at - Duration::seconds(EXPIRY_BUFFER_SECS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("{} {}", TOKEN_TYPE, self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token payload as returned by the token endpoint or read back from disk.
///
/// Unvalidated; [`TokenResponse::into_credential`] enforces the credential
/// invariants.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "scope_string")]
    pub scope: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    TOKEN_TYPE.to_string()
}

/// Scopes arrive either space separated or as a list.
fn scope_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scope {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Scope>::deserialize(deserializer)? {
        Some(Scope::Text(s)) => s,
        Some(Scope::List(list)) => list.join(" "),
        None => String::new(),
    })
}

impl TokenResponse {
    /// Validate and turn the payload into a [`Credential`] issued at `now`.
    pub fn into_credential(self, now: DateTime<Utc>) -> Result<Credential> {
        if !self.token_type.eq_ignore_ascii_case(TOKEN_TYPE) {
            return Err(SpotifyError::authentication(format!(
                "Unsupported token type: {}",
                self.token_type
            )));
        }
        let expires_in = u64::try_from(self.expires_in)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                SpotifyError::authentication(format!(
                    "Invalid expires_in: {}",
                    self.expires_in
                ))
            })?;

        let mut credential = Credential::issued_at(self.access_token, expires_in, now)
            .map_err(|e| SpotifyError::authentication(e.to_string()))?
            .with_scope(self.scope);
        if let Some(refresh_token) = self.refresh_token {
            credential = credential.with_refresh_token(refresh_token);
        }
        if let Some(expires_at) = self.expires_at {
            credential = credential.with_expires_at(expires_at);
        }
        Ok(credential)
    }
}
