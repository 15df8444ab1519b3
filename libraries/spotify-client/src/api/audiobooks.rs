use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{
    self, MAX_LIBRARY_IDS, MAX_PAGE_LIMIT, MAX_SEVERAL_AUDIOBOOKS, MAX_SEVERAL_CHAPTERS,
};
use spotify_core::{
    Audiobook, Chapter, ItemList, Paging, Result, SavedItem, SimplifiedAudiobook,
    SimplifiedChapter,
};
use urlencoding::encode;

/// Audiobook and chapter endpoints.
///
/// Audiobooks are only served in a handful of markets; elsewhere the API
/// answers with `NotFound` or `null` entries.
pub struct AudiobooksClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AudiobooksClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Audiobook> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("audiobooks/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    pub async fn several(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<Audiobook>>> {
        let ids = validate::joined_ids("audiobook ids", ids, MAX_SEVERAL_AUDIOBOOKS)?;
        let list: ItemList<Audiobook> = self
            .engine
            .execute_expect(
                ApiRequest::get("audiobooks")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.items)
    }

    pub async fn chapters(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SimplifiedChapter>> {
        validate::opt_in_range("limit", limit, 0, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get(format!("audiobooks/{}/chapters", encode(id)))
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn saved(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Paging<SavedItem<SimplifiedAudiobook>>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        self.engine
            .execute_expect(
                ApiRequest::get("me/audiobooks")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset),
            )
            .await
    }

    pub async fn save(&self, ids: &[&str]) -> Result<()> {
        let ids = validate::joined_ids("audiobook ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::put("me/audiobooks").query("ids", ids))
            .await
    }

    pub async fn remove(&self, ids: &[&str]) -> Result<()> {
        let ids = validate::joined_ids("audiobook ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_unit(ApiRequest::delete("me/audiobooks").query("ids", ids))
            .await
    }

    pub async fn check_saved(&self, ids: &[&str]) -> Result<Vec<bool>> {
        let ids = validate::joined_ids("audiobook ids", ids, MAX_LIBRARY_IDS)?;
        self.engine
            .execute_expect(ApiRequest::get("me/audiobooks/contains").query("ids", ids))
            .await
    }

    pub async fn chapter(&self, id: &str, market: Option<&str>) -> Result<Chapter> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("chapters/{}", encode(id))).query_opt("market", market),
            )
            .await
    }

    pub async fn several_chapters(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<Chapter>>> {
        let ids = validate::joined_ids("chapter ids", ids, MAX_SEVERAL_CHAPTERS)?;
        let list: ItemList<Chapter> = self
            .engine
            .execute_expect(
                ApiRequest::get("chapters")
                    .query("ids", ids)
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.items)
    }
}
