use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_LIBRARY_IDS, MAX_PAGE_LIMIT, MAX_SEVERAL_SHOWS};
use spotify_core::{ItemList, Paging, Result, SavedItem, Show, SimplifiedEpisode, SimplifiedShow};
use tracing::debug;
use urlencoding::encode;

/// Podcast show catalog and library endpoints.
pub struct ShowsClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> ShowsClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Show> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("shows/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    /// Up to 50 shows; unknown ids come back as `None`.
    pub async fn several(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<SimplifiedShow>>> {
        let ids = validate::joined_ids("show ids", ids, MAX_SEVERAL_SHOWS)?;
        let list: ItemList<SimplifiedShow> = self
            .engine
            .execute_expect(
                ApiRequest::get("shows")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.items)
    }

    pub async fn episodes(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SimplifiedEpisode>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("shows/{}/episodes", encode(id)))
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    /// Shows in the current user's library.
    pub async fn saved(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<SavedItem<SimplifiedShow>>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/shows")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await
    }

    pub async fn save(&self, ids: &[&str]) -> Result<()> {
        let ids = validate::joined_ids("show ids", ids, MAX_LIBRARY_IDS)?;
        debug!("Saving shows");
        self.engine
            .execute_unit(ApiRequest::put("me/shows").query("ids", ids))
            .await
    }

    pub async fn remove(&self, ids: &[&str], market: Option<&str>) -> Result<()> {
        let ids = validate::joined_ids("show ids", ids, MAX_LIBRARY_IDS)?;
        debug!("Removing saved shows");
        self.engine
            .execute_unit(
                ApiRequest::delete("me/shows")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn check_saved(&self, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("show ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_expect(ApiRequest::get("me/shows/contains").query("ids", ids))
            .await
    }
}
