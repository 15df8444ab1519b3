//! Typed Spotify Core
//!
//! Transport-agnostic building blocks shared by the auth and client crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Error Handling**: Unified `SpotifyError`, its `ErrorKind` taxonomy and `Result`
//! - **Envelopes**: `Paging<T>`, `CursorPaging<T>` and the keyed wrappers that
//!   unwrap `{"albums": ...}`-style responses into a uniform shape
//! - **Domain Types**: `Album`, `Artist`, `Track`, `User`, `Playlist`, etc.
//!
//! # Example
//!
//! ```rust
//! use spotify_core::{ItemList, SimplifiedArtist};
//!
//! let body = r#"{"artists": [null]}"#;
//! let list: ItemList<SimplifiedArtist> = serde_json::from_str(body).unwrap();
//! assert_eq!(list.items.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod paging;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, Result, SpotifyError};
pub use paging::{
    CursorPaging, CursorPagingResponse, Cursors, ItemList, PagingResponse, Paging, SavedItem,
    CONTAINER_KEYS,
};

pub use types::{
    Album, AlbumType, Artist, Audiobook, Author, Category, Chapter, Copyright, Device, Episode,
    ExternalIds, ExternalUrls, Followers, Image, IncludeGroup, Markets, Narrator,
    PlayHistory, PlaybackContext, PlaybackItem, PlaybackQueue, PlaybackState, Playlist,
    PlaylistItem, PlaylistSnapshotId, PlaylistTracksRef, RepeatState, ResumePoint,
    SearchResults, SearchType, Show, SimplifiedAlbum, SimplifiedArtist, SimplifiedAudiobook,
    SimplifiedChapter, SimplifiedEpisode, SimplifiedPlaylist, SimplifiedShow, SimplifiedTrack,
    SimplifiedUser, TimeRange, TopItemType, Track, User,
};
