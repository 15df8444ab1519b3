use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_LIBRARY_IDS, MAX_PAGE_LIMIT, MAX_SEVERAL_TRACKS};
use serde_json::json;
use spotify_core::{ItemList, Paging, Result, SavedItem, Track};
use urlencoding::encode;

/// Track catalog and library endpoints.
pub struct TracksClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> TracksClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Track> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("tracks/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    pub async fn several(&self, ids: &[&str], market: Option<&str>) -> Result<Vec<Option<Track>>> {
        let ids = validate::joined_ids("track ids", ids, MAX_SEVERAL_TRACKS)?;
        let list: ItemList<Track> = self
            .engine
            .execute_expect(
                ApiRequest::get("tracks")
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
    ) -> Result<Paging<SavedItem<Track>>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/tracks")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn save(&self, ids: &[&str]) -> Result<()> {
        validate::item_count("track ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::put("me/tracks").json(json!({ "ids": ids })))
            .await
    }

    pub async fn remove(&self, ids: &[&str]) -> Result<()> {
        validate::item_count("track ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::delete("me/tracks").json(json!({ "ids": ids })))
            .await
    }

    pub async fn check_saved(&self, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("track ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_expect(ApiRequest::get("me/tracks/contains").query("ids", ids))
            .await
    }
}
