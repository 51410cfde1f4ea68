//! Playback position polling.

use crate::engine::EngineMessage;
use crate::source::PlaybackSource;
use crate::time::DurationExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Extra delay after a failed poll before the next attempt.
const ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Polls the playback source for the current position and publishes
/// latency-compensated samples to the engine.
pub struct PositionTracker {
    source: Arc<dyn PlaybackSource>,
    tx: mpsc::Sender<EngineMessage>,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl PositionTracker {
    pub fn new(
        source: Arc<dyn PlaybackSource>,
        tx: mpsc::Sender<EngineMessage>,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            tx,
            poll_interval,
            cancel,
        }
    }

    /// Start polling in a background task.
    #[must_use]
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Poll until cancelled or the engine goes away. A source failure
    /// degrades to a warning and a short backoff; it never ends the loop.
    pub async fn run(self) {
        let mut consecutive_errors = 0_u32;
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(self.poll_interval) => {
                    let started = Instant::now();
                    match self.source.position().await {
                        Ok(sample) => {
                            consecutive_errors = 0;
                            // The source call itself took wall-clock time;
                            // fold that staleness into the estimate.
                            let estimated = sample.map(|p| p + started.elapsed());
                            if let Some(p) = estimated {
                                debug!("estimated position {}ms", p.as_millis_u64());
                            }
                            if self.tx.send(EngineMessage::Position(estimated)).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            consecutive_errors += 1;
                            warn!("position poll failed (attempt {consecutive_errors}): {e}");
                            tokio::time::sleep(ERROR_BACKOFF).await;
                        }
                    }
                }
            }
        }
    }
}
