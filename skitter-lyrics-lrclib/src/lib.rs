//! LRCLIB.net backed [`LyricsSource`].

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use skitter_core::{CoreError, LyricsSource, Timeline, TrackId};
use std::time::Duration;
use tracing::{debug, info, warn};

const LRCLIB_API_URL: &str = "https://lrclib.net/api";

/// Default timeout for HTTP requests (10 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default number of retry attempts
const DEFAULT_MAX_RETRIES: u32 = 3;

const SOURCE_NAME: &str = "lrclib";

/// Synced-lyrics source backed by the LRCLIB public API.
///
/// Tries an exact `/get` lookup by artist and track first, then falls back
/// to `/search`. Instrumental tracks and unsynced-only hits resolve to an
/// empty timeline.
pub struct LrclibSource {
    client: ClientWithMiddleware,
}

impl LrclibSource {
    /// Create a new LRCLIB source with the default timeout and retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, CoreError> {
        let base_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("skitter/0.1 (https://github.com/skitter-rs/skitter)")
            .build()?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(DEFAULT_MAX_RETRIES);
        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }

    /// Exact match by artist and track name; `None` on a clean 404.
    async fn get_exact(&self, track: &TrackId) -> Result<Option<LrclibResponse>, CoreError> {
        let url = format!(
            "{}/get?artist_name={}&track_name={}",
            LRCLIB_API_URL,
            urlencoding::encode(&track.artist),
            urlencoding::encode(&track.title)
        );
        debug!("lrclib GET (exact): {url}");

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            warn!("lrclib returned status {}", response.status());
            return Err(CoreError::LyricsSourceFailed {
                name: SOURCE_NAME.to_string(),
                reason: format!("status {}", response.status()),
            });
        }
        Ok(Some(response.json().await?))
    }

    /// Free-text search over artist and track name.
    async fn search(&self, track: &TrackId) -> Result<Vec<LrclibResponse>, CoreError> {
        let query = format!("{} {}", track.artist, track.title);
        let url = format!(
            "{}/search?q={}",
            LRCLIB_API_URL,
            urlencoding::encode(&query)
        );
        debug!("lrclib GET (search): {url}");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("lrclib search returned status {}", response.status());
            return Err(CoreError::LyricsSourceFailed {
                name: SOURCE_NAME.to_string(),
                reason: format!("search status {}", response.status()),
            });
        }
        Ok(response.json().await?)
    }
}

/// Response from the LRCLIB API. The API also returns trackName, artistName
/// and duration fields we don't use; serde ignores unknown fields.
#[derive(Debug, Deserialize)]
struct LrclibResponse {
    id: i64,
    instrumental: bool,
    #[serde(rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
}

impl LrclibResponse {
    fn has_synced_lyrics(&self) -> bool {
        !self.instrumental
            && self
                .synced_lyrics
                .as_ref()
                .is_some_and(|s| !s.trim().is_empty())
    }
}

/// First search hit with usable synced lyrics, in API ranking order.
fn best_match(results: Vec<LrclibResponse>) -> Option<LrclibResponse> {
    results.into_iter().find(LrclibResponse::has_synced_lyrics)
}

fn to_timeline(result: &LrclibResponse) -> Timeline {
    if !result.has_synced_lyrics() {
        return Timeline::default();
    }
    match &result.synced_lyrics {
        Some(synced) => {
            let timeline = Timeline::from_lrc(synced);
            debug!("lrclib id {}: {} synced lines", result.id, timeline.len());
            timeline
        }
        None => Timeline::default(),
    }
}

#[async_trait]
impl LyricsSource for LrclibSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, track: &TrackId) -> Result<Timeline, CoreError> {
        info!("looking up lyrics for {track}");

        if let Some(hit) = self.get_exact(track).await? {
            let timeline = to_timeline(&hit);
            if !timeline.is_empty() {
                return Ok(timeline);
            }
        }

        debug!("no exact lrclib match for {track}, searching");
        let results = self.search(track).await?;
        match best_match(results) {
            Some(hit) => Ok(to_timeline(&hit)),
            None => {
                info!("lrclib: nothing usable for {track}");
                Ok(Timeline::default())
            }
        }
    }
}
