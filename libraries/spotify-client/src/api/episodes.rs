use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_LIBRARY_IDS, MAX_PAGE_LIMIT, MAX_SEVERAL_EPISODES};
use spotify_core::{Episode, ItemList, Paging, Result, SavedItem};
use urlencoding::encode;

/// Podcast episode catalog and library endpoints.
pub struct EpisodesClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> EpisodesClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Episode> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("episodes/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    pub async fn several(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<Episode>>> {
        let ids = validate::joined_ids("episode ids", ids, MAX_SEVERAL_EPISODES)?;
        let list: ItemList<Episode> = self
            .engine
            .execute_expect(
                ApiRequest::get("episodes")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.items)
    }

    pub async fn saved(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SavedItem<Episode>>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/episodes")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn save(&self, ids: &[&str]) -> Result<()> {
        let ids = validate::joined_ids("episode ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::put("me/episodes").query("ids", ids))
            .await
    }

    pub async fn remove(&self, ids: &[&str]) -> Result<()> {
        let ids = validate::joined_ids("episode ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::delete("me/episodes").query("ids", ids))
            .await
    }

    pub async fn check_saved(&self, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("episode ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_expect(ApiRequest::get("me/episodes/contains").query("ids", ids))
            .await
    }
}
