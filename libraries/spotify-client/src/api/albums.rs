use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_LIBRARY_IDS, MAX_PAGE_LIMIT, MAX_SEVERAL_ALBUMS};
use serde_json::json;
use spotify_core::{
    Album, ItemList, Paging, PagingResponse, Result, SavedItem, SimplifiedAlbum, SimplifiedTrack,
};
use tracing::debug;
use urlencoding::encode;

/// Album catalog and library endpoints.
pub struct AlbumsClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AlbumsClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Album> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("albums/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    /// Up to 20 albums; unknown ids come back as `None`.
    pub async fn several(&self, ids: &[&str], market: Option<&str>) -> Result<Vec<Option<Album>>> {
        let ids = validate::joined_ids("album ids", ids, MAX_SEVERAL_ALBUMS)?;
        let list: ItemList<Album> = self
            .engine
            .execute_expect(
                ApiRequest::get("albums")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.items)
    }

    pub async fn tracks(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SimplifiedTrack>> {
        validate::opt_in_range("limit", limit, 0, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("albums/{}/tracks", encode(id)))
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    /// Albums in the current user's library.
    pub async fn saved(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SavedItem<Album>>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/albums")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn save(&self, ids: &[&str]) -> Result<()> {
        validate::item_count("album ids", ids, MAX_LIBRARY_IDS)?;
        debug!(count = ids.len(), "Saving albums");
        self.engine
            .execute_unit(ApiRequest::put("me/albums").json(json!({ "ids": ids })))
            .await
    }

    pub async fn remove(&self, ids: &[&str]) -> Result<()> {
        validate::item_count("album ids", ids, MAX_LIBRARY_IDS)?;
        debug!(count = ids.len(), "Removing saved albums");
        self.engine
            .execute_unit(ApiRequest::delete("me/albums").json(json!({ "ids": ids })))
            .await
    }

    /// Whether each album is in the user's library, in input order.
    pub async fn check_saved(&self, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("album ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_expect(ApiRequest::get("me/albums/contains").query("ids", ids))
            .await
    }

    pub async fn new_releases(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<SimplifiedAlbum>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        let response: PagingResponse<SimplifiedAlbum> = self
            .engine
            .execute_expect(
                ApiRequest::get("browse/new-releases")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await?;
        Ok(response.into_page())
    }
}
