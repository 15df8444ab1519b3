/// Search types
use super::album::SimplifiedAlbum;
use super::artist::Artist;
use super::audiobook::SimplifiedAudiobook;
use super::playlist::SimplifiedPlaylist;
use super::show::{SimplifiedEpisode, SimplifiedShow};
use super::track::Track;
use crate::paging::Paging;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item type to search across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    Album,
    Artist,
    Playlist,
    Track,
    Show,
    Episode,
    Audiobook,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Album => "album",
            SearchType::Artist => "artist",
            SearchType::Playlist => "playlist",
            SearchType::Track => "track",
            SearchType::Show => "show",
            SearchType::Episode => "episode",
            SearchType::Audiobook => "audiobook",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "album" => Ok(SearchType::Album),
            "artist" => Ok(SearchType::Artist),
            "playlist" => Ok(SearchType::Playlist),
            "track" => Ok(SearchType::Track),
            "show" => Ok(SearchType::Show),
            "episode" => Ok(SearchType::Episode),
            "audiobook" => Ok(SearchType::Audiobook),
            other => Err(format!("unknown search type: {}", other)),
        }
    }
}

/// One page per requested type; types that were not requested stay `None`.
///
/// Playlist, show, episode and audiobook listings may contain `null` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub tracks: Option<Paging<Track>>,
    #[serde(default)]
    pub artists: Option<Paging<Artist>>,
    #[serde(default)]
    pub albums: Option<Paging<SimplifiedAlbum>>,
    #[serde(default)]
    pub playlists: Option<Paging<Option<SimplifiedPlaylist>>>,
    #[serde(default)]
    pub shows: Option<Paging<Option<SimplifiedShow>>>,
    #[serde(default)]
    pub episodes: Option<Paging<Option<SimplifiedEpisode>>>,
    #[serde(default)]
    pub audiobooks: Option<Paging<Option<SimplifiedAudiobook>>>,
}
