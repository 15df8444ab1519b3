/// Artist types
use super::common::{ExternalUrls, Followers, Image};
use serde::{Deserialize, Serialize};

/// Artist as embedded in albums and tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Full artist object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub popularity: u32,
}
