/// Command implementations
use crate::config::CliConfig;
use crate::error::Result;
use chrono::Utc;
use spotify_auth::{AuthManager, FileCredentialStore};
use spotify_client::SpotifyClient;
use spotify_core::SearchType;
use std::sync::Arc;
use tracing::{debug, info};

/// Wired-up libraries for one CLI invocation.
pub struct App {
    auth: Arc<AuthManager>,
    client: SpotifyClient,
}

impl App {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(&config.token_path));
        let auth = Arc::new(AuthManager::new(config.auth_config(), store)?);
        let client = SpotifyClient::new(config.client_config(), auth.clone())?;
        Ok(Self { auth, client })
    }

    /// Run the browser flow even if a credential is stored.
    pub async fn login(&self) -> Result<()> {
        let credential = self.auth.authorize().await?;
        println!(
            "Logged in. Token valid until {}",
            credential.expires_at().format("%Y-%m-%d %H:%M:%S UTC")
        );
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.auth.logout().await?;
        println!("Logged out.");
        Ok(())
    }

    /// Report on the stored credential without touching the network.
    pub async fn status(&self) -> Result<()> {
        match self.auth.credential().await {
            Some(credential) => {
                let state = if credential.is_expired_at(Utc::now()) {
                    "expired"
                } else {
                    "valid"
                };
                println!("Credential: {}", state);
                println!(
                    "Expires at: {}",
                    credential.expires_at().format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!(
                    "Refresh token: {}",
                    if credential.refresh_token().is_some() { "present" } else { "absent" }
                );
                println!("Scopes: {}", credential.scope());
            }
            None => println!("Not logged in."),
        }
        Ok(())
    }

    pub async fn me(&self) -> Result<()> {
        let user = self.client.users().current().await?;
        println!(
            "{} ({})",
            user.profile.display_name.as_deref().unwrap_or("-"),
            user.profile.id
        );
        if let Some(country) = &user.country {
            println!("Country: {}", country);
        }
        if let Some(product) = &user.product {
            println!("Plan: {}", product);
        }
        Ok(())
    }

    /// Walk every page of followed artists.
    pub async fn followed(&self, limit: u32) -> Result<()> {
        let users = self.client.users();
        let mut after: Option<String> = None;
        let mut shown = 0usize;

        loop {
            let page = users.followed_artists(after.as_deref(), Some(limit)).await?;
            debug!(items = page.items.len(), total = page.total, "Fetched followed artists page");

            for artist in &page.items {
                println!("{:<40} {}", artist.name, artist.genres.join(", "));
            }
            shown += page.items.len();

            match page.next_cursor() {
                Some(cursor) => after = Some(cursor.to_string()),
                None => break,
            }
        }

        info!(count = shown, "Listed followed artists");
        println!("{} artists", shown);
        Ok(())
    }

    pub async fn search(&self, query: &str, kind: SearchType, limit: u32) -> Result<()> {
        let results = self
            .client
            .search()
            .search(query, &[kind], Some(limit), None, None)
            .await?;

        if let Some(tracks) = results.tracks {
            for track in &tracks.items {
                println!("{} - {}", track.artist_names(), track.name());
            }
        }
        if let Some(artists) = results.artists {
            for artist in &artists.items {
                println!("{} (popularity {})", artist.name, artist.popularity);
            }
        }
        if let Some(albums) = results.albums {
            for album in &albums.items {
                println!(
                    "{} [{}]",
                    album.name,
                    album.release_date.as_deref().unwrap_or("-")
                );
            }
        }
        if let Some(playlists) = results.playlists {
            for playlist in playlists.items.iter().flatten() {
                println!("{} ({} items)", playlist.name, playlist.tracks.total);
            }
        }
        if let Some(shows) = results.shows {
            for show in shows.items.iter().flatten() {
                println!("{} - {}", show.publisher, show.name);
            }
        }
        if let Some(episodes) = results.episodes {
            for episode in episodes.items.iter().flatten() {
                println!(
                    "{} [{}]",
                    episode.name,
                    episode.release_date.as_deref().unwrap_or("-")
                );
            }
        }
        if let Some(audiobooks) = results.audiobooks {
            for audiobook in audiobooks.items.iter().flatten() {
                println!("{} - {}", audiobook.author_names(), audiobook.name);
            }
        }
        Ok(())
    }
}
