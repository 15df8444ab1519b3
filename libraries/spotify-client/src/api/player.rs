use crate::engine::{ApiRequest, RequestEngine};
use crate::validate::{self, MAX_PAGE_LIMIT};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use spotify_core::{
    CursorPaging, Device, PlayHistory, PlaybackQueue, PlaybackState, RepeatState, Result,
    SpotifyError,
};
use tracing::debug;

#[derive(Deserialize)]
struct DeviceList {
    devices: Vec<Device>,
}

/// Where to begin inside the context of a [`PlaybackStart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOffset {
    Position(u32),
    Uri(String),
}

/// What to play. An empty value resumes the current context.
#[derive(Debug, Clone, Default)]
pub struct PlaybackStart {
    pub context_uri: Option<String>,
    pub uris: Vec<String>,
    pub offset: Option<StartOffset>,
    pub position_ms: Option<u64>,
}

impl PlaybackStart {
    fn into_body(self) -> Result<Option<Value>> {
        if self.context_uri.is_some() && !self.uris.is_empty() {
            return Err(SpotifyError::validation(
                "Give either a context URI or track URIs, not both",
            ));
        }
        let mut body = Map::new();
        if let Some(context_uri) = self.context_uri {
            body.insert("context_uri".into(), Value::String(context_uri));
        }
        if !self.uris.is_empty() {
            body.insert("uris".into(), json!(self.uris));
        }
        match self.offset {
            Some(StartOffset::Position(position)) => {
                body.insert("offset".into(), json!({ "position": position }));
            }
            Some(StartOffset::Uri(uri)) => {
                body.insert("offset".into(), json!({ "uri": uri }));
            }
            None => {}
        }
        if let Some(position_ms) = self.position_ms {
            body.insert("position_ms".into(), position_ms.into());
        }
        Ok((!body.is_empty()).then_some(Value::Object(body)))
    }
}

/// Playback control. Most calls need an active device and Premium.
pub struct PlayerClient<'a> {
    engine: &'a RequestEngine,
}

impl<'a> PlayerClient<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Current playback, or `None` when nothing is playing.
    pub async fn playback_state(&self, market: Option<&str>) -> Result<Option<PlaybackState>> {
        self.engine
            .execute(ApiRequest::get("me/player").query_opt("market", market))
            .await
    }

    /// The item currently playing, or `None` when nothing is.
    pub async fn currently_playing(&self, market: Option<&str>) -> Result<Option<PlaybackState>> {
        self.engine
            .execute(ApiRequest::get("me/player/currently-playing").query_opt("market", market))
            .await
    }

    /// Recently played tracks. `after` and `before` are Unix timestamps in
    /// milliseconds; at most one may be given.
    pub async fn recently_played(
        &self,
        limit: Option<u32>,
        after: Option<i64>,
        before: Option<i64>,
    ) -> Result<CursorPaging<PlayHistory>> {
        validate::opt_in_range("limit", limit, 1, MAX_PAGE_LIMIT)?;
        if after.is_some() && before.is_some() {
            return Err(SpotifyError::validation(
                "Only one of after and before may be given",
            ));
        }
        self.engine
            .execute_expect(
                ApiRequest::get("me/player/recently-played")
                    .query_opt("limit", limit)
                    .query_opt("after", after)
                    .query_opt("before", before),
            )
            .await
    }

    pub async fn queue(&self) -> Result<PlaybackQueue> {
        self.engine
            .execute_expect(ApiRequest::get("me/player/queue"))
            .await
    }

    pub async fn devices(&self) -> Result<Vec<Device>> {
        let list: DeviceList = self
            .engine
            .execute_expect(ApiRequest::get("me/player/devices"))
            .await?;
        Ok(list.devices)
    }

    /// Move playback to `device_id`; `play` forces playback to start there.
    pub async fn transfer(&self, device_id: &str, play: Option<bool>) -> Result<()> {
        let mut body = json!({ "device_ids": [device_id] });
        if let Some(play) = play {
            body["play"] = play.into();
        }
        debug!(device_id, "Transferring playback");
        self.engine
            .execute_unit(ApiRequest::put("me/player").json(body))
            .await
    }

    /// Start or resume playback.
    pub async fn start(&self, start: PlaybackStart, device_id: Option<&str>) -> Result<()> {
        let mut request = ApiRequest::put("me/player/play").query_opt("device_id", device_id);
        if let Some(body) = start.into_body()? {
            request = request.json(body);
        }
        self.engine.execute_unit(request).await
    }

    pub async fn pause(&self, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(ApiRequest::put("me/player/pause").query_opt("device_id", device_id))
            .await
    }

    pub async fn next(&self, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(ApiRequest::post("me/player/next").query_opt("device_id", device_id))
            .await
    }

    pub async fn previous(&self, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(ApiRequest::post("me/player/previous").query_opt("device_id", device_id))
            .await
    }

    pub async fn seek(&self, position_ms: u64, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(
                ApiRequest::put("me/player/seek")
                    .query("position_ms", position_ms)
                    .query_opt("device_id", device_id),
            )
            .await
    }

    pub async fn set_repeat(&self, state: RepeatState, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(
                ApiRequest::put("me/player/repeat")
                    .query("state", state)
                    .query_opt("device_id", device_id),
            )
            .await
    }

    pub async fn set_shuffle(&self, state: bool, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(
                ApiRequest::put("me/player/shuffle")
                    .query("state", state)
                    .query_opt("device_id", device_id),
            )
            .await
    }

    pub async fn set_volume(&self, percent: u32, device_id: Option<&str>) -> Result<()> {
        validate::in_range("volume_percent", percent, 0, 100)?;
        debug!(percent, "Setting volume");
        self.engine
            .execute_unit(
                ApiRequest::put("me/player/volume")
                    .query("volume_percent", percent)
                    .query_opt("device_id", device_id),
            )
            .await
    }

    /// Queue a track or episode URI after the current item.
    pub async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<()> {
        self.engine
            .execute_unit(
                ApiRequest::post("me/player/queue")
                    .query("uri", uri)
                    .query_opt("device_id", device_id),
            )
            .await
    }
}
