use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_PAGE_LIMIT};
use spotify_core::{Category, Markets, Paging, PagingResponse, Result};
use urlencoding::encode;

/// Browse categories and market listing.
pub struct BrowseClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> BrowseClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn category(&self, id: &str, locale: Option<&str>) -> Result<Category> {
        self.engine
            .execute_expect(
                ApiRequest::get(format!("browse/categories/{}", encode(id)))
                    .query_opt("locale", locale),
            )
            .await
    }

    pub async fn categories(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        locale: Option<&str>,
    ) -> Result<Paging<Category>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        let response: PagingResponse<Category> = self
            .engine
            .execute_expect(
                ApiRequest::get("browse/categories")
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("locale", locale),
            )
            .await?;
        Ok(response.into_page())
    }

    /// Country codes where the catalog is available.
    pub async fn markets(&self) -> Result<Vec<String>> {
        let markets: Markets = self.engine.execute_expect(ApiRequest::get("markets")).await?;
        Ok(markets.markets)
    }
}
