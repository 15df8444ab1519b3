/// Track types
use super::album::SimplifiedAlbum;
use super::artist::SimplifiedArtist;
use super::common::{ExternalIds, ExternalUrls, Restrictions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Track as listed inside an album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    pub duration_ms: u64,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default = "default_disc_number")]
    pub disc_number: u32,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
}

fn default_disc_number() -> u32 {
    1
}

impl SimplifiedTrack {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Full track object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(flatten)]
    pub summary: SimplifiedTrack,
    pub album: SimplifiedAlbum,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default)]
    pub popularity: u32,
}

impl Track {
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Comma separated artist names, for display.
    pub fn artist_names(&self) -> String {
        self.summary
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
