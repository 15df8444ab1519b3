//! Credential persistence.
//!
//! The [`CredentialStore`] trait holds at most one credential per store.
//! Two implementations ship with the crate: [`MemoryCredentialStore`] for
//! tests and short-lived processes, and [`FileCredentialStore`] which keeps
//! the credential as JSON on local disk.

use crate::credential::{Credential, TokenResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use spotify_core::{Result, SpotifyError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default credential file, relative to the working directory.
pub const DEFAULT_CREDENTIAL_PATH: &str = ".spotify";

/// Durable holder of the current credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist `credential`, replacing any previous one.
    async fn save(&self, credential: &Credential) -> Result<()>;

    /// Read the stored credential.
    ///
    /// Absent, unreadable, or invalid data all yield `None`.
    async fn load(&self) -> Option<Credential>;

    /// Remove the stored credential. Deleting nothing is not an error.
    async fn delete(&self) -> Result<()>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, credential: &Credential) -> Result<()> {
        *self.credential.write().await = Some(credential.clone());
        Ok(())
    }

    async fn load(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    async fn delete(&self) -> Result<()> {
        self.credential.write().await.take();
        Ok(())
    }
}

/// On-disk layout: the credential fields plus an informational timestamp.
#[derive(Serialize)]
struct StoredCredential<'a> {
    #[serde(flatten)]
    credential: &'a Credential,
    #[serde(rename = "_stored_at")]
    stored_at: DateTime<Utc>,
}

/// JSON file store.
///
/// Writes go to a sibling temporary file first and are then renamed over the
/// target, so a crash mid-write never leaves a truncated credential behind.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_PATH)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                SpotifyError::storage(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let stored = StoredCredential {
            credential,
            stored_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&stored)
            .map_err(|e| SpotifyError::storage(format!("Failed to encode credential: {}", e)))?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            SpotifyError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            SpotifyError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }

    async fn load(&self) -> Option<Credential> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored credential");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read stored credential");
                return None;
            }
        };

        let payload: TokenResponse = match serde_json::from_slice(&contents) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored credential is not valid JSON"
                );
                return None;
            }
        };

        match payload.into_credential(Utc::now()) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored credential is invalid");
                None
            }
        }
    }

    async fn delete(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Credential deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SpotifyError::storage(format!(
                "Failed to delete {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
