/// Playback types
use super::common::ExternalUrls;
use super::show::Episode;
use super::track::Track;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connect device that can play content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_private_session: bool,
    #[serde(default)]
    pub is_restricted: bool,
    pub volume_percent: Option<u8>,
    #[serde(default)]
    pub supports_volume: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatState {
    #[default]
    Off,
    Track,
    Context,
}

impl RepeatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatState::Off => "off",
            RepeatState::Track => "track",
            RepeatState::Context => "context",
        }
    }
}

impl fmt::Display for RepeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Album, artist, playlist or show that playback was started from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackContext {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Something the player can play.
///
/// Anything other than a track or an episode (ads, for instance) decodes as
/// `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaybackItem {
    Track(Box<Track>),
    Episode(Box<Episode>),
    #[serde(other)]
    Unknown,
}

impl PlaybackItem {
    pub fn name(&self) -> Option<&str> {
        match self {
            PlaybackItem::Track(track) => Some(track.name()),
            PlaybackItem::Episode(episode) => Some(episode.name()),
            PlaybackItem::Unknown => None,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            PlaybackItem::Track(track) => Some(track),
            _ => None,
        }
    }
}

/// Current playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub repeat_state: RepeatState,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default)]
    pub context: Option<PlaybackContext>,
    pub timestamp: i64,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<PlaybackItem>,
    pub currently_playing_type: String,
}

/// The item playing now and what is queued after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackQueue {
    #[serde(default)]
    pub currently_playing: Option<PlaybackItem>,
    #[serde(default)]
    pub queue: Vec<PlaybackItem>,
}

/// One entry of the recently-played history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: DateTime<Utc>,
    #[serde(default)]
    pub context: Option<PlaybackContext>,
}
