//! Typed Spotify Client
//!
//! HTTP client for the Spotify Web API on top of [`spotify_auth`].
//!
//! # Architecture
//!
//! - **RequestEngine**: attaches the bearer token, classifies failures into
//!   [`spotify_core::SpotifyError`], waits out rate limits and decodes bodies
//! - **Validation**: batch-size and range limits enforced before any request
//! - **Endpoint groups**: thin wrappers per resource reached through
//!   [`SpotifyClient`]
//!
//! # Example
//!
//! ```no_run
//! use spotify_auth::{AuthConfig, AuthManager, FileCredentialStore};
//! use spotify_client::{ClientConfig, SpotifyClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> spotify_core::Result<()> {
//! let auth = AuthManager::new(
//!     AuthConfig::new("client-id", "client-secret").with_scopes(["user-follow-read"]),
//!     Arc::new(FileCredentialStore::default()),
//! )?;
//! let client = SpotifyClient::new(ClientConfig::default(), Arc::new(auth))?;
//!
//! let me = client.users().current().await?;
//! let followed = client.users().followed_artists(None, Some(20)).await?;
//! println!("{} follows {} artists", me.profile.id, followed.total);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod engine;
pub mod validate;

pub use api::{
    AlbumsClient, ArtistsClient, AudiobooksClient, BrowseClient, EpisodesClient, FollowType,
    PlaybackStart, PlayerClient, PlaylistDetails, PlaylistsClient, SearchClient, ShowsClient,
    StartOffset, TracksClient, UsersClient,
};
pub use config::ClientConfig;
pub use engine::{ApiRequest, RequestEngine, StaticToken, TokenProvider};

use spotify_core::Result;
use std::sync::Arc;

/// Entry point for the Web API.
///
/// Endpoint groups borrow the client, so they are cheap to create per call:
///
/// ```ignore
/// let album = client.albums().get("4aawyAB9vmqN3uQ7FjRGTy", None).await?;
/// ```
pub struct SpotifyClient {
    engine: RequestEngine,
}

impl SpotifyClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Ok(Self {
            engine: RequestEngine::new(config, tokens)?,
        })
    }

    /// Raw access for endpoints without a dedicated wrapper.
    pub fn engine(&self) -> &RequestEngine {
        &self.engine
    }

    pub fn albums(&self) -> AlbumsClient<'_> {
        AlbumsClient::new(&self.engine)
    }

    pub fn artists(&self) -> ArtistsClient<'_> {
        ArtistsClient::new(&self.engine)
    }

    pub fn tracks(&self) -> TracksClient<'_> {
        TracksClient::new(&self.engine)
    }

    pub fn shows(&self) -> ShowsClient<'_> {
        ShowsClient::new(&self.engine)
    }

    pub fn episodes(&self) -> EpisodesClient<'_> {
        EpisodesClient::new(&self.engine)
    }

    /// Audiobooks and their chapters.
    pub fn audiobooks(&self) -> AudiobooksClient<'_> {
        AudiobooksClient::new(&self.engine)
    }

    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.engine)
    }

    pub fn browse(&self) -> BrowseClient<'_> {
        BrowseClient::new(&self.engine)
    }

    pub fn search(&self) -> SearchClient<'_> {
        SearchClient::new(&self.engine)
    }

    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(&self.engine)
    }

    pub fn player(&self) -> PlayerClient<'_> {
        PlayerClient::new(&self.engine)
    }
}
