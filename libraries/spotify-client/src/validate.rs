//! Local preconditions checked before a request leaves the process.

use spotify_core::{Result, SpotifyError};

pub const MAX_SEVERAL_ALBUMS: usize = 20;
pub const MAX_SEVERAL_ARTISTS: usize = 50;
pub const MAX_SEVERAL_TRACKS: usize = 50;
pub const MAX_SEVERAL_SHOWS: usize = 50;
pub const MAX_SEVERAL_EPISODES: usize = 50;
pub const MAX_SEVERAL_AUDIOBOOKS: usize = 50;
pub const MAX_SEVERAL_CHAPTERS: usize = 50;
pub const MAX_LIBRARY_IDS: usize = 50;
pub const MAX_FOLLOW_IDS: usize = 50;
pub const MAX_PLAYLIST_ITEMS: usize = 100;
pub const MAX_PAGE_LIMIT: u32 = 50;
pub const MAX_SEARCH_OFFSET: u32 = 1000;
/// Decoded JPEG size accepted for a playlist cover.
pub const MAX_COVER_IMAGE_BYTES: usize = 256 * 1024;

/// Require between 1 and `max` entries in `items`.
pub fn item_count<T>(name: &str, items: &[T], max: usize) -> Result<()> {
    if items.is_empty() {
        return Err(SpotifyError::validation(format!(
            "{} must contain at least one entry",
            name
        )));
    }
    if items.len() > max {
        return Err(SpotifyError::validation(format!(
            "Too many {}: {} given, at most {} allowed",
            name,
            items.len(),
            max
        )));
    }
    Ok(())
}

/// Require `min <= value <= max`.
pub fn in_range(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(SpotifyError::validation(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// [`in_range`] for optional parameters; `None` always passes.
pub fn opt_in_range(name: &str, value: Option<u32>, min: u32, max: u32) -> Result<()> {
    value.map_or(Ok(()), |v| in_range(name, v, min, max))
}

/// Validated, comma-joined id list for query strings.
pub fn joined_ids(name: &str, ids: &[&str], max: usize) -> Result<String> {
    item_count(name, ids, max)?;
    Ok(ids.join(","))
}
