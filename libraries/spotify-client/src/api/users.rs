use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_FOLLOW_IDS, MAX_PAGE_LIMIT};
use serde::de::DeserializeOwned;
use serde_json::json;
use spotify_core::{
    Artist, CursorPaging, CursorPagingResponse, Paging, Result, SimplifiedUser, TimeRange,
    TopItemType, Track, User,
};
use urlencoding::encode;

/// What a follow operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowType {
    Artist,
    User,
}

impl FollowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowType::Artist => "artist",
            FollowType::User => "user",
        }
    }
}

/// Profile, top items and follow endpoints.
pub struct UsersClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Profile of the user the token belongs to.
    pub async fn current(&self) -> Result<User> {
        self.engine.execute_expect(ApiRequest::get("me")).await
    }

    /// Public profile of any user.
    pub async fn profile(&self, user_id: &str) -> Result<SimplifiedUser> {
        self.engine
            .execute_expect(ApiRequest::get(format!("users/{}", encode(user_id))))
            .await
    }

    pub async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<Artist>> {
        self.top_items(TopItemType::Artists, time_range, limit, offset)
            .await
    }

    pub async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<Track>> {
        self.top_items(TopItemType::Tracks, time_range, limit, offset)
            .await
    }

    async fn top_items<T: DeserializeOwned>(
        &self,
        kind: TopItemType,
        time_range: TimeRange,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<T>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("me/top/{}", kind.as_str()))
                    .query("time_range", time_range.as_str())
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await
    }

    /// Artists the user follows. Pass the previous page's
    /// [`CursorPaging::next_cursor`] as `after` to continue.
    pub async fn followed_artists(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<CursorPaging<Artist>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        let response: CursorPagingResponse<Artist> = self
            .engine
            .execute_expect(
                ApiRequest::get("me/following")
                    .query("type", "artist")
                    .query_opt("after", after)
                    .query_opt("limit", limit),
            )
            .await?;
        Ok(response.into_page())
    }

    pub async fn follow(&self, kind: FollowType, ids: &[&str]) -> Result<()> {
        validate::item_count("ids", ids, MAX_FOLLOW_IDS)?;
        self.engine
            .execute_unit(
                ApiRequest::put("me/following")
                    .query("type", kind.as_str())
                    .json(json!({ "ids": ids })),
            )
            .await
    }

    pub async fn unfollow(&self, kind: FollowType, ids: &[&str]) -> Result<()> {
        validate::item_count("ids", ids, MAX_FOLLOW_IDS)?;
        self.engine
            .execute_unit(
                ApiRequest::delete("me/following")
                    .query("type", kind.as_str())
                    .json(json!({ "ids": ids })),
            )
            .await
    }

    pub async fn check_following(&self, kind: FollowType, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("ids", ids, MAX_FOLLOW_IDS)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/following/contains")
                    .query("type", kind.as_str())
                    .query("ids", ids),
            )
            .await
    }

    pub async fn follow_playlist(&self, playlist_id: &str, public: Option<bool>) -> Result<()> {
        let mut request = ApiRequest::put(format!("playlists/{}/followers", encode(playlist_id)));
        if let Some(public) = public {
            request = request.json(json!({ "public": public }));
        }
        self.engine.execute_unit(request).await
    }

    pub async fn unfollow_playlist(&self, playlist_id: &str) -> Result<()> {
        self.engine
            .execute_unit(ApiRequest::delete(format!(
                "playlists/{}/followers",
                encode(playlist_id)
            )))
            .await
    }

    /// Whether each of `user_ids` follows the playlist, in input order.
    pub async fn check_following_playlist(
        &self,
        playlist_id: &str,
        user_ids: &[&str],
    ) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("user ids", user_ids, MAX_FOLLOW_IDS)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("playlists/{}/followers/contains", encode(playlist_id)))
                    .query("ids", ids),
            )
            .await
    }
}
