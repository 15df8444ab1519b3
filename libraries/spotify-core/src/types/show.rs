/// Podcast types
use super::common::{Copyright, ExternalUrls, Image, Restrictions};
use crate::paging::Paging;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the user stopped listening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePoint {
    pub fully_played: bool,
    pub resume_position_ms: u64,
}

/// Show as found in listings and embedded in episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedShow {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_description: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub is_externally_hosted: Option<bool>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub total_episodes: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub copyrights: Vec<Copyright>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub available_markets: Vec<String>,
}

/// Full show object, including its first page of episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    #[serde(flatten)]
    pub summary: SimplifiedShow,
    pub episodes: Paging<SimplifiedEpisode>,
}

/// Episode as listed inside a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedEpisode {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_description: Option<String>,
    pub duration_ms: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub is_externally_hosted: bool,
    #[serde(default)]
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub resume_point: Option<ResumePoint>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
}

impl SimplifiedEpisode {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Full episode object, with the show it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(flatten)]
    pub summary: SimplifiedEpisode,
    pub show: SimplifiedShow,
}

impl Episode {
    pub fn name(&self) -> &str {
        &self.summary.name
    }
}
