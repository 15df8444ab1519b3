/// User profile types
use super::common::{ExternalUrls, Followers, Image};
use serde::{Deserialize, Serialize};

/// Public profile of any user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedUser {
    pub id: String,
    pub uri: String,
    pub href: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Option<Followers>,
}

/// Profile of the authorized user
///
/// `country`, `email` and `product` are only present when the matching
/// scopes were granted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub profile: SimplifiedUser,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Which kind of top items to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopItemType {
    Artists,
    Tracks,
}

impl TopItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopItemType::Artists => "artists",
            TopItemType::Tracks => "tracks",
        }
    }
}

/// Affinity window for top items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    /// Roughly the last year
    LongTerm,
    /// Roughly the last six months
    #[default]
    MediumTerm,
    /// Roughly the last four weeks
    ShortTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LongTerm => "long_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::ShortTerm => "short_term",
        }
    }
}
