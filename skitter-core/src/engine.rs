//! The engine actor that coordinates resolution, animation, and placement.

use crate::config::Config;
use crate::palette;
use crate::placement::Corner;
use crate::random::Randomness;
use crate::resolver;
use crate::reveal::RevealSession;
use crate::shake::{ShakeSession, ShakeStep};
use crate::source::TrackId;
use crate::surface::{Rect, RenderSurface, Size};
use crate::timeline::Timeline;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Snapshot handed from a polling task to the engine actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    /// Latest latency-compensated playback position. `None` while playback
    /// is inactive, which suppresses line matching.
    Position(Option<Duration>),
    /// A new track's timeline, replacing the previous one wholesale.
    TimelineLoaded { track: TrackId, timeline: Timeline },
}

const CHANNEL_CAPACITY: usize = 64;

/// Coordinates the line resolver, both animators, and the placement
/// selector over a single rendering surface.
///
/// The engine is the sole consumer of [`EngineMessage`] and the only code
/// that touches the surface or the committed display text. Reveal steps and
/// shake ticks run as deadline branches inside the actor loop, so one line
/// change is always applied in full (cancel, color, reveal, placement,
/// shake) before the next polling result is looked at, and dropping a
/// session guarantees its pending step never fires.
pub struct Engine {
    surface: Box<dyn RenderSurface>,
    rng: Box<dyn Randomness>,
    config: Config,
    timeline: Timeline,
    committed: Option<String>,
    corner: Corner,
    reveal: Option<RevealSession>,
    shake: Option<ShakeSession>,
    rx: mpsc::Receiver<EngineMessage>,
    cancel: CancellationToken,
}

impl Engine {
    /// Build an engine and the sender half its polling tasks publish to.
    pub fn new(
        surface: Box<dyn RenderSurface>,
        rng: Box<dyn Randomness>,
        config: Config,
        cancel: CancellationToken,
    ) -> (Self, mpsc::Sender<EngineMessage>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (
            Self {
                surface,
                rng,
                config,
                timeline: Timeline::default(),
                committed: None,
                corner: Corner::BottomCenter,
                reveal: None,
                shake: None,
                rx,
                cancel,
            },
            tx,
        )
    }

    /// Run until cancelled or every sender is dropped.
    pub async fn run(mut self) {
        loop {
            let reveal_at = self.reveal.as_ref().map(RevealSession::next_at);
            let shake_at = self.shake.as_ref().map(ShakeSession::next_at);
            tokio::select! {
                () = self.cancel.cancelled() => break,
                msg = self.rx.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                () = sleep_until_opt(reveal_at), if reveal_at.is_some() => self.reveal_step(),
                () = sleep_until_opt(shake_at), if shake_at.is_some() => self.shake_tick(),
            }
        }
    }

    fn handle(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::Position(Some(position)) => self.on_position(position),
            EngineMessage::Position(None) => {}
            EngineMessage::TimelineLoaded { track, timeline } => {
                self.on_timeline(&track, timeline);
            }
        }
    }

    /// Install a new timeline. Every piece of state derived from the old
    /// one is reset first, so no stale animation frame can reach the
    /// surface afterwards.
    fn on_timeline(&mut self, track: &TrackId, timeline: Timeline) {
        self.reveal = None;
        self.shake = None;
        self.committed = None;
        self.surface.set_text("");
        debug!("timeline replaced for {track} ({} lines)", timeline.len());
        self.timeline = timeline;
    }

    fn on_position(&mut self, position: Duration) {
        let active = resolver::resolve(&self.timeline, position);
        if active.display_text.is_empty() {
            return;
        }
        if self.committed.as_deref() == Some(active.display_text.as_str()) {
            return;
        }
        self.commit_line(active.display_text, active.line_duration);
    }

    /// Apply one line change: commit the text, pick a readable color,
    /// restart the reveal, maybe hop corners, restart the shake.
    fn commit_line(&mut self, text: String, duration: Option<Duration>) {
        let now = Instant::now();
        debug!("line committed: {text:?}");
        self.committed = Some(text.clone());

        let color = palette::readable_color(self.config.ui.background, self.rng.as_mut());
        self.surface.set_foreground(color);

        self.reveal = Some(RevealSession::begin(text, duration, now));
        self.reveal_step();

        if self.rng.unit_f64() < self.config.animation.corner_change_probability {
            self.corner = self.corner.random_other(self.rng.as_mut());
            debug!("corner changed to {:?}", self.corner);
        }

        let anchor = self.surface.geometry();
        self.shake = Some(ShakeSession::begin(
            anchor,
            Duration::from_millis(self.config.animation.shake_tick_ms),
            now,
            self.rng.as_mut(),
        ));
        self.shake_tick();
    }

    /// Reveal one more character and re-fit the surface around it.
    fn reveal_step(&mut self) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        let prefix = reveal.advance().to_string();
        let finished = reveal.finished();
        self.apply_reveal_frame(&prefix);
        if finished {
            self.reveal = None;
        }
    }

    fn apply_reveal_frame(&mut self, text: &str) {
        self.surface.set_text(text);
        let measured = self.surface.measure(text);
        let width = (measured.width + self.config.ui.width_padding).max(self.config.ui.min_width);
        let height = measured.height + self.config.ui.height_padding;
        let (x, y) = self
            .corner
            .anchor(Size::new(width, height), self.surface.screen());
        self.request_geometry(Rect::new(x, y, width, height));
    }

    fn shake_tick(&mut self) {
        let Some(shake) = self.shake.as_mut() else {
            return;
        };
        match shake.tick(Instant::now(), self.rng.as_mut()) {
            ShakeStep::Jolt(rect) => self.request_geometry(rect),
            ShakeStep::Settle(anchor) => {
                self.shake = None;
                self.request_geometry(anchor);
            }
        }
    }

    fn request_geometry(&mut self, rect: Rect) {
        if !self.surface.set_geometry(rect) {
            debug!("surface rejected geometry {rect:?}");
        }
    }
}

/// A sleep bound to `deadline` when present, pending forever otherwise.
/// Callers gate the branch with an `if` guard, so the pending arm is never
/// polled.
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
