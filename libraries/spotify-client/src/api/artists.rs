use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_PAGE_LIMIT, MAX_SEVERAL_ARTISTS};
use spotify_core::{Artist, IncludeGroup, ItemList, Paging, Result, SimplifiedAlbum, Track};
use urlencoding::encode;

/// Artist catalog endpoints.
pub struct ArtistsClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> ArtistsClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn get(&self, id: &str) -> Result<Artist> {
        self.engine
            .execute_expect(ApiRequest::get(format!("artists/{}", encode(id))))
            .await
    }

    pub async fn several(&self, ids: &[&str]) -> Result<Vec<Option<Artist>>> {
        let ids = validate::joined_ids("artist ids", ids, MAX_SEVERAL_ARTISTS)?;
        let list: ItemList<Artist> = self
            .engine
            .execute_expect(ApiRequest::get("artists").query("ids", ids))
            .await?;
        Ok(list.items)
    }

    /// An artist's releases, optionally narrowed to some groups.
    pub async fn albums(
        &self,
        id: &str,
        include_groups: &[IncludeGroup],
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Paging<SimplifiedAlbum>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        let groups = (!include_groups.is_empty()).then(|| {
            include_groups
                .iter()
                .map(IncludeGroup::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });
        self.engine
            .execute_expect(
                ApiRequest::get(format!("artists/{}/albums", encode(id)))
                    .query_opt("include_groups", groups)
                    .query_opt("limit", limit)
                    .query_opt("offset", offset)
                    .query_opt("market", market),
            )
            .await
    }

    pub async fn top_tracks(&self, id: &str, market: Option<&str>) -> Result<Vec<Track>> {
        let list: ItemList<Track> = self
            .engine
            .execute_expect(
                ApiRequest::get(format!("artists/{}/top-tracks", encode(id)))
                    .query_opt("market", market),
            )
            .await?;
        Ok(list.into_present())
    }
}
