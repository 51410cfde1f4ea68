//! Playback and lyrics source seams.

use crate::error::Result;
use crate::timeline::Timeline;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Identity of a playing song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackId {
    pub title: String,
    pub artist: String,
}

impl TrackId {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// Live playback state supplier (a streaming service client, an MPRIS
/// bridge, or similar).
///
/// Both calls may fail transiently. Callers recover with retry and backoff;
/// a source error must never escape a polling loop.
#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// The currently playing track, or `None` when nothing is playing.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is unreachable or refuses the
    /// request.
    async fn now_playing(&self) -> Result<Option<TrackId>>;

    /// Current playback position, or `None` while playback is inactive.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is unreachable or refuses the
    /// request.
    async fn position(&self) -> Result<Option<Duration>>;
}

/// Synced-lyrics lookup for a track.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &'static str;

    /// Look up a timeline for `track`. A clean "nothing found" is an empty
    /// timeline, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup itself failed (network, protocol).
    async fn lookup(&self, track: &TrackId) -> Result<Timeline>;
}
