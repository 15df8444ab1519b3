//! Endpoint wrappers grouped by resource.
//!
//! Each group borrows the engine from [`crate::SpotifyClient`]; obtain one
//! through the client's accessor methods (`client.albums()`, ...).

mod albums;
mod artists;
mod audiobooks;
mod browse;
mod episodes;
mod player;
mod playlists;
mod search;
mod shows;
mod tracks;
mod users;

pub use albums::AlbumsClient;
pub use artists::ArtistsClient;
pub use audiobooks::AudiobooksClient;
pub use browse::BrowseClient;
pub use episodes::EpisodesClient;
pub use player::{PlaybackStart, PlayerClient, StartOffset};
pub use playlists::{PlaylistDetails, PlaylistsClient};
pub use search::SearchClient;
pub use shows::ShowsClient;
pub use tracks::TracksClient;
pub use users::{FollowType, UsersClient};
