//! Catalog and user types returned by the Web API.
//!
//! Only fields the client relies on are required; everything the API omits
//! for some markets or scopes is optional or defaulted.

mod album;
mod artist;
mod audiobook;
mod browse;
mod common;
mod player;
mod playlist;
mod search;
mod show;
mod track;
mod user;

pub use album::{Album, AlbumType, IncludeGroup, SimplifiedAlbum};
pub use artist::{Artist, SimplifiedArtist};
pub use audiobook::{
    Audiobook, Author, Chapter, Narrator, SimplifiedAudiobook, SimplifiedChapter,
};
pub use browse::{Category, Markets};
pub use common::{Copyright, ExternalIds, ExternalUrls, Followers, Image, Restrictions};
pub use player::{
    Device, PlayHistory, PlaybackContext, PlaybackItem, PlaybackQueue, PlaybackState,
    RepeatState,
};
pub use playlist::{
    Playlist, PlaylistItem, PlaylistSnapshotId, PlaylistTracksRef, SimplifiedPlaylist,
};
pub use search::{SearchResults, SearchType};
pub use show::{Episode, ResumePoint, Show, SimplifiedEpisode, SimplifiedShow};
pub use track::{SimplifiedTrack, Track};
pub use user::{SimplifiedUser, TimeRange, TopItemType, User};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artist_json() -> serde_json::Value {
        json!({
            "id": "0kbYTNQb4Pb1rPbbaF0pT4",
            "name": "Miles Davis",
            "uri": "spotify:artist:0kbYTNQb4Pb1rPbbaF0pT4",
            "href": "https://api.spotify.com/v1/artists/0kbYTNQb4Pb1rPbbaF0pT4",
            "type": "artist",
            "external_urls": {"spotify": "https://open.spotify.com/artist/0kbYTNQb4Pb1rPbbaF0pT4"}
        })
    }

    #[test]
    fn test_track_decodes_flattened_summary() {
        let body = json!({
            "id": "4vLYewWIvqHfKtJDk8c8tq",
            "name": "So What",
            "uri": "spotify:track:4vLYewWIvqHfKtJDk8c8tq",
            "href": "https://api.spotify.com/v1/tracks/4vLYewWIvqHfKtJDk8c8tq",
            "type": "track",
            "artists": [artist_json()],
            "duration_ms": 562_640,
            "track_number": 1,
            "explicit": false,
            "popularity": 71,
            "external_ids": {"isrc": "USSM15900113"},
            "album": {
                "id": "1weenld61qoidwYuZ1GESA",
                "name": "Kind Of Blue",
                "uri": "spotify:album:1weenld61qoidwYuZ1GESA",
                "href": "https://api.spotify.com/v1/albums/1weenld61qoidwYuZ1GESA",
                "album_type": "album",
                "total_tracks": 6,
                "release_date": "1959-08-17",
                "artists": [artist_json()]
            }
        });

        let track: Track = serde_json::from_value(body).unwrap();
        assert_eq!(track.name(), "So What");
        assert_eq!(track.summary.disc_number, 1);
        assert_eq!(track.summary.duration().as_secs(), 562);
        assert_eq!(track.album.album_type, AlbumType::Album);
        assert_eq!(track.artist_names(), "Miles Davis");
        assert_eq!(track.external_ids.isrc.as_deref(), Some("USSM15900113"));
    }

    #[test]
    fn test_search_type_parsing() {
        assert_eq!("Track".parse::<SearchType>(), Ok(SearchType::Track));
        assert!("podcast".parse::<SearchType>().is_err());
        assert_eq!(IncludeGroup::AppearsOn.to_string(), "appears_on");
    }

    fn show_json() -> serde_json::Value {
        json!({
            "id": "38bS44xjbVVZ3No3ByF1dJ",
            "name": "Jazz After Dark",
            "uri": "spotify:show:38bS44xjbVVZ3No3ByF1dJ",
            "href": "https://api.spotify.com/v1/shows/38bS44xjbVVZ3No3ByF1dJ",
            "type": "show",
            "publisher": "WBGO",
            "description": "Late night sessions",
            "total_episodes": 120,
            "languages": ["en"]
        })
    }

    fn episode_json() -> serde_json::Value {
        json!({
            "id": "512ojhOuo1ktJprKbVcKyQ",
            "name": "Ep. 12: Blue in Green",
            "uri": "spotify:episode:512ojhOuo1ktJprKbVcKyQ",
            "href": "https://api.spotify.com/v1/episodes/512ojhOuo1ktJprKbVcKyQ",
            "type": "episode",
            "description": "A closer listen",
            "duration_ms": 1_686_230,
            "release_date": "2024-02-01",
            "release_date_precision": "day",
            "resume_point": {"fully_played": false, "resume_position_ms": 60_000},
            "show": show_json()
        })
    }

    #[test]
    fn test_search_results_keep_every_requested_type() {
        let page = |items: serde_json::Value| {
            json!({
                "href": "https://api.spotify.com/v1/search?query=blue",
                "items": items,
                "limit": 20,
                "next": null,
                "offset": 0,
                "previous": null,
                "total": 1
            })
        };
        let body = json!({
            "shows": page(json!([show_json()])),
            "episodes": page(json!([episode_json(), null])),
            "audiobooks": page(json!([{
                "id": "7iHfbu1YPACw6oZPAFJtqe",
                "name": "Miles: The Autobiography",
                "uri": "spotify:audiobook:7iHfbu1YPACw6oZPAFJtqe",
                "href": "https://api.spotify.com/v1/audiobooks/7iHfbu1YPACw6oZPAFJtqe",
                "type": "audiobook",
                "authors": [{"name": "Miles Davis"}, {"name": "Quincy Troupe"}],
                "narrators": [{"name": "Dion Graham"}],
                "total_chapters": 24
            }]))
        });

        let results: SearchResults = serde_json::from_value(body).unwrap();
        assert!(results.tracks.is_none());

        let shows = results.shows.unwrap();
        assert_eq!(shows.items[0].as_ref().unwrap().publisher, "WBGO");

        let episodes = results.episodes.unwrap();
        assert_eq!(episodes.items.len(), 2);
        assert!(episodes.items[1].is_none());

        let audiobooks = results.audiobooks.unwrap();
        let audiobook = audiobooks.items[0].as_ref().unwrap();
        assert_eq!(audiobook.author_names(), "Miles Davis, Quincy Troupe");
        assert_eq!(audiobook.total_chapters, 24);
    }

    #[test]
    fn test_episode_decodes_show_and_resume_point() {
        let episode: Episode = serde_json::from_value(episode_json()).unwrap();
        assert_eq!(episode.name(), "Ep. 12: Blue in Green");
        assert_eq!(episode.show.name, "Jazz After Dark");
        assert_eq!(episode.summary.duration().as_secs(), 1686);
        assert_eq!(
            episode.summary.resume_point,
            Some(ResumePoint {
                fully_played: false,
                resume_position_ms: 60_000
            })
        );
    }

    #[test]
    fn test_playback_queue_mixes_tracks_and_episodes() {
        let body = json!({
            "currently_playing": episode_json(),
            "queue": [
                {
                    "id": "4vLYewWIvqHfKtJDk8c8tq",
                    "name": "So What",
                    "uri": "spotify:track:4vLYewWIvqHfKtJDk8c8tq",
                    "type": "track",
                    "duration_ms": 562_640,
                    "album": {
                        "id": "1weenld61qoidwYuZ1GESA",
                        "name": "Kind Of Blue",
                        "uri": "spotify:album:1weenld61qoidwYuZ1GESA",
                        "href": "https://api.spotify.com/v1/albums/1weenld61qoidwYuZ1GESA",
                        "album_type": "album"
                    }
                },
                {"type": "ad"}
            ]
        });

        let queue: PlaybackQueue = serde_json::from_value(body).unwrap();
        let current = queue.currently_playing.unwrap();
        assert!(matches!(current, PlaybackItem::Episode(_)));
        assert_eq!(current.name(), Some("Ep. 12: Blue in Green"));

        assert_eq!(queue.queue.len(), 2);
        assert_eq!(queue.queue[0].as_track().map(Track::name), Some("So What"));
        assert_eq!(queue.queue[1], PlaybackItem::Unknown);
    }

    #[test]
    fn test_playlist_item_as_track_skips_episodes() {
        let item = PlaylistItem {
            added_at: None,
            added_by: None,
            is_local: false,
            track: Some(json!({"type": "episode", "name": "Ep. 1"})),
        };
        assert!(item.as_track().is_none());
    }
}
