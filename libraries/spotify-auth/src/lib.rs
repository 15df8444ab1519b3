//! Typed Spotify Auth
//!
//! OAuth2 authorization-code flow for the Spotify Web API.
//!
//! # Architecture
//!
//! - **Credential**: immutable token value with expiry arithmetic
//! - **Stores**: `CredentialStore` trait with in-memory and JSON file backends
//! - **Callback listener**: one-shot loopback server receiving the redirect
//! - **AuthManager**: serves valid tokens, refreshes expired ones and runs the
//!   browser flow when nothing else works
//!
//! # Example
//!
//! ```no_run
//! use spotify_auth::{AuthConfig, AuthManager, FileCredentialStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> spotify_core::Result<()> {
//! let config = AuthConfig::new("client-id", "client-secret")
//!     .with_scopes(["user-read-private", "user-library-read"]);
//! let manager = AuthManager::new(config, Arc::new(FileCredentialStore::default()))?;
//!
//! let token = manager.get_access_token().await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod browser;
pub mod callback;
pub mod config;
pub mod credential;
pub mod manager;
pub mod request;
pub mod store;

pub use browser::{SystemBrowser, UrlOpener};
pub use callback::{CallbackListener, CALLBACK_PATH};
pub use config::AuthConfig;
pub use credential::{Credential, TokenResponse};
pub use manager::{AuthManager, AuthState};
pub use request::{generate_state, AuthorizationRequest};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
