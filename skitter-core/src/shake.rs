//! Randomized spatial perturbation around an anchor geometry.

use crate::random::Randomness;
use crate::surface::Rect;
use std::time::Duration;
use tokio::time::Instant;

/// Jitter patterns a shake session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakePattern {
    Random,
    Horizontal,
    Vertical,
    Pulse,
    Circular,
    Wave,
    Bounce,
}

impl ShakePattern {
    pub const ALL: [Self; 7] = [
        Self::Random,
        Self::Horizontal,
        Self::Vertical,
        Self::Pulse,
        Self::Circular,
        Self::Wave,
        Self::Bounce,
    ];

    /// Pulse and bounce run at double intensity.
    #[must_use]
    pub const fn amplified(self) -> bool {
        matches!(self, Self::Pulse | Self::Bounce)
    }
}

/// Position and size deltas for one shake tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Perturbation {
    pub dx: i32,
    pub dy: i32,
    pub dw: i32,
    pub dh: i32,
}

/// Compute the perturbation for tick number `tick` at `intensity`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn perturbation(
    pattern: ShakePattern,
    intensity: i32,
    tick: u32,
    rng: &mut dyn Randomness,
) -> Perturbation {
    let t = f64::from(tick);
    let amp = f64::from(intensity);
    match pattern {
        ShakePattern::Random => Perturbation {
            dx: rng.pick_i32(-intensity, intensity),
            dy: rng.pick_i32(-intensity, intensity),
            ..Perturbation::default()
        },
        ShakePattern::Horizontal => Perturbation {
            dx: rng.pick_i32(-intensity, intensity),
            ..Perturbation::default()
        },
        ShakePattern::Vertical => Perturbation {
            dy: rng.pick_i32(-intensity, intensity),
            ..Perturbation::default()
        },
        ShakePattern::Pulse => {
            // Expand and contract: the window grows while sliding up-left,
            // shrinks while sliding back, so the visual center holds.
            let modifier = if tick % 2 == 0 { 1 } else { -1 };
            Perturbation {
                dx: -(modifier * intensity) / 2,
                dy: -(modifier * intensity) / 2,
                dw: modifier * intensity,
                dh: modifier * intensity,
            }
        }
        ShakePattern::Circular => {
            let angle = t * 0.5;
            Perturbation {
                dx: (amp * 0.8 * angle.cos()) as i32,
                dy: (amp * 0.8 * angle.sin()) as i32,
                ..Perturbation::default()
            }
        }
        ShakePattern::Wave => Perturbation {
            dx: (amp * (t * 0.5).sin()) as i32,
            ..Perturbation::default()
        },
        ShakePattern::Bounce => {
            // Decaying bounce, biased upward.
            let height = amp * (1.0 - (t / 10.0).powi(2));
            Perturbation {
                dy: -(height.max(0.0) as i32),
                ..Perturbation::default()
            }
        }
    }
}

/// Base intensity bounds; pulse and bounce double the draw.
const INTENSITY_RANGE: (i32, i32) = (3, 7);
/// Bounds for the randomized stop delay, in milliseconds.
const STOP_DELAY_MS_RANGE: (i32, i32) = (200, 400);

/// What the engine should do on a shake deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStep {
    /// Apply this geometry and keep going.
    Jolt(Rect),
    /// Restore this geometry (the anchor) and end the session.
    Settle(Rect),
}

/// One in-flight shake around a captured anchor geometry.
///
/// The session perturbs the anchor every tick until its randomized stop
/// deadline passes; the first tick at or past the deadline restores the
/// anchor exactly, position and size both.
#[derive(Debug)]
pub struct ShakeSession {
    pattern: ShakePattern,
    intensity: i32,
    anchor: Rect,
    ticks: u32,
    tick_interval: Duration,
    stop_at: Instant,
    next_at: Instant,
}

impl ShakeSession {
    /// Start a session around `anchor`. The first tick is due immediately.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn begin(
        anchor: Rect,
        tick_interval: Duration,
        now: Instant,
        rng: &mut dyn Randomness,
    ) -> Self {
        let pattern = ShakePattern::ALL[rng.pick_index(ShakePattern::ALL.len())];
        let base = rng.pick_i32(INTENSITY_RANGE.0, INTENSITY_RANGE.1);
        let intensity = if pattern.amplified() { base * 2 } else { base };
        let stop_delay = rng.pick_i32(STOP_DELAY_MS_RANGE.0, STOP_DELAY_MS_RANGE.1);
        Self {
            pattern,
            intensity,
            anchor,
            ticks: 0,
            tick_interval,
            stop_at: now + Duration::from_millis(stop_delay as u64),
            next_at: now,
        }
    }

    #[must_use]
    pub fn next_at(&self) -> Instant {
        self.next_at
    }

    #[must_use]
    pub fn pattern(&self) -> ShakePattern {
        self.pattern
    }

    #[must_use]
    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Advance one tick.
    pub fn tick(&mut self, now: Instant, rng: &mut dyn Randomness) -> ShakeStep {
        if now >= self.stop_at {
            return ShakeStep::Settle(self.anchor);
        }
        let p = perturbation(self.pattern, self.intensity, self.ticks, rng);
        self.ticks += 1;
        self.next_at += self.tick_interval;
        ShakeStep::Jolt(offset_rect(self.anchor, p))
    }
}

fn offset_rect(anchor: Rect, p: Perturbation) -> Rect {
    Rect {
        x: anchor.x + p.dx,
        y: anchor.y + p.dy,
        width: anchor.width.saturating_add_signed(p.dw),
        height: anchor.height.saturating_add_signed(p.dh),
    }
}
