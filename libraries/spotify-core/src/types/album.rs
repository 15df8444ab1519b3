/// Album types
use super::artist::SimplifiedArtist;
use super::common::{Copyright, ExternalIds, ExternalUrls, Image, Restrictions};
use super::track::SimplifiedTrack;
use crate::paging::Paging;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

/// Filter for an artist's discography
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeGroup {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl IncludeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeGroup::Album => "album",
            IncludeGroup::Single => "single",
            IncludeGroup::AppearsOn => "appears_on",
            IncludeGroup::Compilation => "compilation",
        }
    }
}

impl fmt::Display for IncludeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Album as embedded in tracks and listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    pub album_type: AlbumType,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
}

/// Full album object, including its first page of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(flatten)]
    pub summary: SimplifiedAlbum,
    pub tracks: Paging<SimplifiedTrack>,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default)]
    pub copyrights: Vec<Copyright>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub popularity: u32,
}
