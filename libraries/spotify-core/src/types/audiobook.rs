/// Audiobook types
use super::common::{Copyright, ExternalUrls, Image, Restrictions};
use super::show::ResumePoint;
use crate::paging::Paging;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrator {
    pub name: String,
}

/// Audiobook as found in listings and embedded in chapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedAudiobook {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub narrators: Vec<Narrator>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_description: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub total_chapters: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
}

impl SimplifiedAudiobook {
    /// Comma separated author names, for display.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Full audiobook object, including its first page of chapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audiobook {
    #[serde(flatten)]
    pub summary: SimplifiedAudiobook,
    pub chapters: Paging<SimplifiedChapter>,
    #[serde(default)]
    pub copyrights: Vec<Copyright>,
}

/// Chapter as listed inside an audiobook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedChapter {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub chapter_number: u32,
    pub duration_ms: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_description: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub resume_point: Option<ResumePoint>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
}

impl SimplifiedChapter {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Full chapter object, with the audiobook it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(flatten)]
    pub summary: SimplifiedChapter,
    pub audiobook: SimplifiedAudiobook,
}
