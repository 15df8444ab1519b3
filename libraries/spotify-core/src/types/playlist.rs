/// Playlist types
use super::common::{ExternalUrls, Followers, Image};
use super::track::Track;
use super::user::SimplifiedUser;
use crate::paging::Paging;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a playlist's items, as found in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub href: String,
    pub total: u32,
}

/// Playlist as found in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    pub snapshot_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub owner: SimplifiedUser,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub tracks: PlaylistTracksRef,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// One entry of a playlist.
///
/// `track` is `None` for unavailable items; episodes are kept as raw JSON
/// since only tracks are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub added_by: Option<SimplifiedUser>,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub track: Option<serde_json::Value>,
}

impl PlaylistItem {
    /// Decode the entry as a track, if it is one.
    pub fn as_track(&self) -> Option<Track> {
        self.track
            .as_ref()
            .filter(|v| v.get("type").and_then(|t| t.as_str()) == Some("track"))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Full playlist object, including its first page of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    pub snapshot_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub owner: SimplifiedUser,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub tracks: Paging<PlaylistItem>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Version identifier returned by playlist mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSnapshotId {
    pub snapshot_id: String,
}
