//! Song identity polling and timeline loading.

use crate::engine::EngineMessage;
use crate::source::{LyricsSource, PlaybackSource, TrackId};
use crate::timeline::Timeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Extra delay after a failed identity poll.
const ERROR_BACKOFF: Duration = Duration::from_secs(2);

/// Watches the playback source for song changes and loads the matching
/// lyric timeline.
pub struct SongWatcher {
    playback: Arc<dyn PlaybackSource>,
    lyrics: Arc<dyn LyricsSource>,
    tx: mpsc::Sender<EngineMessage>,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl SongWatcher {
    pub fn new(
        playback: Arc<dyn PlaybackSource>,
        lyrics: Arc<dyn LyricsSource>,
        tx: mpsc::Sender<EngineMessage>,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            playback,
            lyrics,
            tx,
            poll_interval,
            cancel,
        }
    }

    /// Start watching in a background task.
    #[must_use]
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Poll until cancelled or the engine goes away. Fetch failures degrade
    /// to a warning and a backoff; they never end the loop.
    pub async fn run(self) {
        let mut last: Option<TrackId> = None;
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(self.poll_interval) => {
                    match self.playback.now_playing().await {
                        Ok(Some(track)) if last.as_ref() != Some(&track) => {
                            info!("now playing: {track}");
                            let timeline = self.load_timeline(&track).await;
                            last = Some(track.clone());
                            let msg = EngineMessage::TimelineLoaded { track, timeline };
                            if self.tx.send(msg).await.is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!("track poll failed: {e}");
                            tokio::time::sleep(ERROR_BACKOFF).await;
                        }
                    }
                }
            }
        }
    }

    /// A failed or empty lookup yields an empty timeline; the display stays
    /// blank until the next song change.
    async fn load_timeline(&self, track: &TrackId) -> Timeline {
        match self.lyrics.lookup(track).await {
            Ok(timeline) => {
                if timeline.is_empty() {
                    info!("no synced lyrics for {track}");
                } else {
                    info!(
                        "loaded {} lyric lines from {}",
                        timeline.len(),
                        self.lyrics.name()
                    );
                }
                timeline
            }
            Err(e) => {
                warn!("lyrics lookup failed for {track}: {e}");
                Timeline::default()
            }
        }
    }
}
