//! Character-by-character text reveal.

use crate::time::DurationExt;
use std::time::Duration;
use tokio::time::Instant;

/// Step interval when the line duration is unknown or the text is empty.
const FALLBACK_STEP_MS: u64 = 50;

/// Step interval for a line lasting `duration` with `chars` characters.
///
/// The target pace spreads the reveal over 80% of the line, clamped to
/// 10..=200ms per character, then compressed by 1.5x. The result always
/// leaves slack before the next line boundary and runs faster than linear
/// pacing across the interval.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn step_interval(duration: Option<Duration>, chars: usize) -> Duration {
    match duration {
        Some(d) if !d.is_zero() && chars > 0 => {
            let raw = (d.as_millis_u64() as f64 * 0.8 / chars as f64) as u64;
            let clamped = raw.clamp(10, 200);
            Duration::from_millis((clamped as f64 / 1.5) as u64)
        }
        _ => Duration::from_millis(FALLBACK_STEP_MS),
    }
}

/// One in-flight character reveal.
///
/// The session is a passive state machine: the engine fires [`advance`]
/// when the [`next_at`] deadline passes and drops the whole session to
/// cancel it, so a superseded session can never produce another frame.
///
/// [`advance`]: RevealSession::advance
/// [`next_at`]: RevealSession::next_at
#[derive(Debug)]
pub struct RevealSession {
    full: String,
    total: usize,
    revealed: usize,
    interval: Duration,
    next_at: Instant,
}

impl RevealSession {
    /// Start a session over `text`. The first step is due immediately.
    #[must_use]
    pub fn begin(text: String, duration: Option<Duration>, now: Instant) -> Self {
        let total = text.chars().count();
        let interval = step_interval(duration, total);
        Self {
            full: text,
            total,
            revealed: 0,
            interval,
            next_at: now,
        }
    }

    /// Deadline of the next step.
    #[must_use]
    pub fn next_at(&self) -> Instant {
        self.next_at
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Whether every character has been revealed.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.revealed >= self.total
    }

    /// Reveal one more character, schedule the next step, and return the
    /// visible prefix.
    pub fn advance(&mut self) -> &str {
        if self.revealed < self.total {
            self.revealed += 1;
        }
        self.next_at += self.interval;
        self.revealed_prefix()
    }

    /// The currently revealed prefix, always on a character boundary.
    #[must_use]
    pub fn revealed_prefix(&self) -> &str {
        match self.full.char_indices().nth(self.revealed) {
            Some((idx, _)) => &self.full[..idx],
            None => &self.full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_reproduces_the_pacing_formula() {
        // 2.5s over 11 characters: 2500 * 0.8 / 11 = 181ms, then / 1.5.
        assert_eq!(
            step_interval(Some(Duration::from_millis(2500)), 11),
            Duration::from_millis(120)
        );
    }

    #[test]
    fn test_interval_clamps_slow_pacing() {
        // 10s over one character clamps to 200ms before compression.
        assert_eq!(
            step_interval(Some(Duration::from_secs(10)), 1),
            Duration::from_millis(133)
        );
    }

    #[test]
    fn test_interval_clamps_fast_pacing() {
        // 10ms over 100 characters clamps up to 10ms before compression.
        assert_eq!(
            step_interval(Some(Duration::from_millis(10)), 100),
            Duration::from_millis(6)
        );
    }

    #[test]
    fn test_interval_bounds_hold_for_any_positive_duration() {
        for ms in [1u64, 50, 500, 2500, 60_000] {
            for chars in [1usize, 7, 40, 300] {
                let interval = step_interval(Some(Duration::from_millis(ms)), chars);
                assert!(
                    (6..=133).contains(&interval.as_millis_u64()),
                    "interval {interval:?} for {ms}ms / {chars} chars"
                );
            }
        }
    }

    #[test]
    fn test_interval_falls_back_without_duration() {
        assert_eq!(step_interval(None, 12), Duration::from_millis(50));
        assert_eq!(step_interval(Some(Duration::ZERO), 12), Duration::from_millis(50));
        assert_eq!(
            step_interval(Some(Duration::from_secs(3)), 0),
            Duration::from_millis(50)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_reveals_one_character_at_a_time() {
        let mut session = RevealSession::begin("Hi\nyo".to_string(), None, Instant::now());
        assert_eq!(session.revealed_prefix(), "");
        let mut seen = Vec::new();
        while !session.finished() {
            seen.push(session.advance().to_string());
        }
        assert_eq!(seen, ["H", "Hi", "Hi\n", "Hi\ny", "Hi\nyo"]);
        assert_eq!(session.revealed(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_respects_char_boundaries() {
        let mut session = RevealSession::begin("h\u{e9}llo".to_string(), None, Instant::now());
        assert_eq!(session.advance(), "h");
        assert_eq!(session.advance(), "h\u{e9}");
        assert_eq!(session.advance(), "h\u{e9}l");
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_past_the_end_is_stable() {
        let mut session = RevealSession::begin("ab".to_string(), None, Instant::now());
        session.advance();
        session.advance();
        assert!(session.finished());
        assert_eq!(session.advance(), "ab");
        assert_eq!(session.revealed(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_step_is_due_immediately_then_spaced_by_interval() {
        let now = Instant::now();
        let mut session =
            RevealSession::begin("abcd".to_string(), Some(Duration::from_secs(1)), now);
        assert_eq!(session.next_at(), now);
        let interval = session.interval();
        session.advance();
        assert_eq!(session.next_at(), now + interval);
        session.advance();
        assert_eq!(session.next_at(), now + interval * 2);
    }
}
