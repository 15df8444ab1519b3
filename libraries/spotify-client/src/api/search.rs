use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_PAGE_LIMIT, MAX_SEARCH_OFFSET};
use spotify_core::{Result, SearchResults, SearchType, SpotifyError};
use tracing::debug;

/// Catalog search.
pub struct SearchClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Search for `query` across `types`.
    ///
    /// Only the result groups matching `types` are populated.
    pub async fn search(
        &self,
        query: &str,
        types: &[SearchType],
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<SearchResults> {
        if query.trim().is_empty() {
            return Err(SpotifyError::validation("Search query cannot be empty"));
        }
        if types.is_empty() {
            return Err(SpotifyError::validation("At least one search type is required"));
        }
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        validate::opt_in_range("offset", offset, 0, MAX_SEARCH_OFFSET)?;

        let types = types
            .iter()
            .map(SearchType::as_str)
            .collect::<Vec<_>>()
            .join(",");
        debug!(types = %types, "Searching catalog");

        self.engine
            .execute_expect(
                ApiRequest::get("search")
                    .query("q", query)
                    .query("type", types)
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }
}
