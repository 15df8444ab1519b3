use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_COVER_IMAGE_BYTES, MAX_PAGE_LIMIT, MAX_PLAYLIST_ITEMS};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value};
use spotify_core::{
    Image, Paging, Playlist, PlaylistItem, PlaylistSnapshotId, Result, SimplifiedPlaylist,
    SpotifyError,
};
use tracing::debug;
use urlencoding::encode;

/// Editable playlist attributes. Unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PlaylistDetails {
    pub name: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub description: Option<String>,
}

impl PlaylistDetails {
    fn into_body(self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(name) = self.name {
            body.insert("name".into(), Value::String(name));
        }
        if let Some(public) = self.public {
            body.insert("public".into(), Value::Bool(public));
        }
        if let Some(collaborative) = self.collaborative {
            body.insert("collaborative".into(), Value::Bool(collaborative));
        }
        if let Some(description) = self.description {
            body.insert("description".into(), Value::String(description));
        }
        body
    }
}

/// Playlist read and edit endpoints.
pub struct PlaylistsClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Playlist> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("playlists/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    pub async fn current_user_playlists(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<SimplifiedPlaylist>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/playlists")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await
    }

    pub async fn user_playlists(
        &self,
        user_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<SimplifiedPlaylist>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("users/{}/playlists", encode(user_id)))
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await
    }

    /// Create a playlist owned by `user_id`. `details.name` is required.
    pub async fn create(&self, user_id: &str, details: PlaylistDetails) -> Result<Playlist> {
        if !details.name.as_deref().is_some_and(|n| !n.trim().is_empty()) {
            return Err(SpotifyError::validation("Playlist name is required"));
        }
        self.engine
            .execute_expect(
                ApiRequest::post(format!("users/{}/playlists", encode(user_id)))
                    .json(Value::Object(details.into_body())),
            )
            .await
    }

    /// Append up to 100 track or episode URIs, optionally at `position`.
    pub async fn add_items(
        &self,
        id: &str,
        uris: &[&str],
        position: Option<u32>,
    ) -> Result<PlaylistSnapshotId> {
        validate::item_count("uris", uris, MAX_PLAYLIST_ITEMS)?;
        let mut body = json!({ "uris": uris });
        if let Some(position) = position {
            body["position"] = position.into();
        }
        self.engine
            .execute_expect(ApiRequest::post(format!("playlists/{}/tracks", encode(id))).json(body))
            .await
    }

    /// Remove every occurrence of up to 100 URIs.
    pub async fn remove_items(
        &self,
        id: &str,
        uris: &[&str],
        snapshot_id: Option<&str>,
    ) -> Result<PlaylistSnapshotId> {
        validate::item_count("uris", uris, MAX_PLAYLIST_ITEMS)?;
        let tracks: Vec<Value> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
        let mut body = json!({ "tracks": tracks });
        if let Some(snapshot_id) = snapshot_id {
            body["snapshot_id"] = snapshot_id.into();
        }
        self.engine
            .execute_expect(
                ApiRequest::delete(format!("playlists/{}/tracks", encode(id))).json(body),
            )
            .await
    }

    pub async fn change_details(&self, id: &str, details: PlaylistDetails) -> Result<()> {
        let body = details.into_body();
        if body.is_empty() {
            return Err(SpotifyError::validation("No playlist details to change"));
        }
        self.engine
            .execute_unit(
                ApiRequest::put(format!("playlists/{}", encode(id))).json(Value::Object(body)),
            )
            .await
    }

    /// One page of a playlist's entries.
    pub async fn items(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<PlaylistItem>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("playlists/{}/tracks", encode(id)))
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    /// Replace every entry with up to 100 URIs. An empty list clears the playlist.
    pub async fn replace_items(&self, id: &str, uris: &[&str]) -> Result<PlaylistSnapshotId> {
        if uris.len() > MAX_PLAYLIST_ITEMS {
            return Err(SpotifyError::validation(format!(
                "Too many uris: {} given, at most {} allowed",
                uris.len(),
                MAX_PLAYLIST_ITEMS
            )));
        }
        self.engine
            .execute_expect(
                ApiRequest::put(format!("playlists/{}/tracks", encode(id)))
                    .json(json!({ "uris": uris })),
            )
            .await
    }

    /// Move `range_length` entries starting at `range_start` before `insert_before`.
    pub async fn reorder_items(
        &self,
        id: &str,
        range_start: u32,
        insert_before: u32,
        range_length: u32,
        snapshot_id: Option<&str>,
    ) -> Result<PlaylistSnapshotId> {
        if range_length == 0 {
            return Err(SpotifyError::validation("range_length must be at least 1"));
        }
        let mut body = json!({
            "range_start": range_start,
            "insert_before": insert_before,
            "range_length": range_length,
        });
        if let Some(snapshot_id) = snapshot_id {
            body["snapshot_id"] = snapshot_id.into();
        }
        self.engine
            .execute_expect(
                ApiRequest::put(format!("playlists/{}/tracks", encode(id))).json(body),
            )
            .await
    }

    /// Current cover images, largest first.
    pub async fn cover_image(&self, id: &str) -> Result<Vec<Image>> {
        let images: Option<Vec<Image>> = self
            .engine
            .execute(ApiRequest::get(format!("playlists/{}/images", encode(id))))
            .await?;
        Ok(images.unwrap_or_default())
    }

    /// Replace the cover with a JPEG of at most 256 KiB.
    pub async fn upload_cover_image(&self, id: &str, jpeg: &[u8]) -> Result<()> {
        if jpeg.is_empty() {
            return Err(SpotifyError::validation("Cover image is empty"));
        }
        if jpeg.len() > MAX_COVER_IMAGE_BYTES {
            return Err(SpotifyError::validation(format!(
                "Cover image is {} bytes, at most {} allowed",
                jpeg.len(),
                MAX_COVER_IMAGE_BYTES
            )));
        }
        debug!(bytes = jpeg.len(), "Uploading playlist cover");
        self.engine
            .execute_unit(
                ApiRequest::put(format!("playlists/{}/images", encode(id)))
                    .raw("image/jpeg", STANDARD.encode(jpeg)),
            )
            .await
    }
}
