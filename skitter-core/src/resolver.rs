//! Active-line resolution against a timeline.

use crate::timeline::Timeline;
use std::time::Duration;

/// The line currently under the playback position, paired with the
/// following line for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveLine {
    /// Index of the matched line, or `None` when the position lies before
    /// the first line or the timeline is empty.
    pub index: Option<usize>,
    /// The matched line's text, joined with the next line's text on a new
    /// line when a successor exists. Empty when nothing matched.
    pub display_text: String,
    /// Full length of the matched line's interval (next start minus own
    /// start), or `None` for the last line.
    pub line_duration: Option<Duration>,
}

/// Resolve the active line for `position`.
///
/// Membership is half-open: a line is active while
/// `start <= position < next_start`, with the last line open-ended. The
/// scan walks the timeline in source order and stops at the first interval
/// that contains the position; a duplicated start time leaves the earlier
/// entry with an empty interval, so it is never active.
#[must_use]
pub fn resolve(timeline: &Timeline, position: Duration) -> ActiveLine {
    let lines = timeline.lines();
    for (i, line) in lines.iter().enumerate() {
        let next = lines.get(i + 1);
        let within = position >= line.start && next.map_or(true, |n| position < n.start);
        if !within {
            continue;
        }

        let mut display_text = line.text.clone();
        if let Some(next) = next {
            display_text.push('\n');
            display_text.push_str(&next.text);
        }
        return ActiveLine {
            index: Some(i),
            display_text,
            line_duration: next.map(|n| n.start.saturating_sub(line.start)),
        };
    }
    ActiveLine::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::LyricLine;

    fn secs_f64(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn sample_timeline() -> Timeline {
        Timeline::new(vec![
            LyricLine::new(secs_f64(0.0), "Hello"),
            LyricLine::new(secs_f64(2.5), "World"),
            LyricLine::new(secs_f64(5.0), "End"),
        ])
    }

    #[test]
    fn test_position_before_first_line() {
        let timeline = Timeline::new(vec![LyricLine::new(secs_f64(3.0), "Late start")]);
        let active = resolve(&timeline, secs_f64(1.0));
        assert_eq!(active, ActiveLine::default());
    }

    #[test]
    fn test_empty_timeline_never_matches() {
        let timeline = Timeline::default();
        for tenths in 0..100 {
            let active = resolve(&timeline, Duration::from_millis(tenths * 100));
            assert_eq!(active.index, None);
            assert!(active.display_text.is_empty());
        }
    }

    #[test]
    fn test_display_pairs_current_with_next_line() {
        let active = resolve(&sample_timeline(), secs_f64(0.1));
        assert_eq!(active.index, Some(0));
        assert_eq!(active.display_text, "Hello\nWorld");
        assert_eq!(active.line_duration, Some(secs_f64(2.5)));
    }

    #[test]
    fn test_last_line_has_no_pair_and_no_duration() {
        let active = resolve(&sample_timeline(), secs_f64(7.0));
        assert_eq!(active.index, Some(2));
        assert_eq!(active.display_text, "End");
        assert_eq!(active.line_duration, None);
    }

    #[test]
    fn test_interval_is_half_open() {
        let timeline = sample_timeline();
        // Exactly on a boundary belongs to the later line.
        assert_eq!(resolve(&timeline, secs_f64(2.5)).index, Some(1));
        assert_eq!(resolve(&timeline, secs_f64(0.0)).index, Some(0));
    }

    #[test]
    fn test_at_most_one_match_over_a_position_sweep() {
        let timeline = sample_timeline();
        for tenths in 0..=100 {
            let position = Duration::from_millis(tenths * 100);
            let active = resolve(&timeline, position);
            if let Some(index) = active.index {
                let lines = timeline.lines();
                assert!(position >= lines[index].start);
                if let Some(next) = lines.get(index + 1) {
                    assert!(position < next.start);
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let timeline = sample_timeline();
        let position = secs_f64(3.3);
        assert_eq!(resolve(&timeline, position), resolve(&timeline, position));
    }

    #[test]
    fn test_duplicate_start_times_leave_earlier_entry_inactive() {
        let timeline = Timeline::new(vec![
            LyricLine::new(secs_f64(1.0), "first"),
            LyricLine::new(secs_f64(1.0), "second"),
            LyricLine::new(secs_f64(2.0), "third"),
        ]);
        let active = resolve(&timeline, secs_f64(1.5));
        assert_eq!(active.index, Some(1));
        assert_eq!(active.display_text, "second\nthird");
    }

    #[test]
    fn test_duration_is_the_full_interval_length() {
        // Duration is next start minus own start, not remaining time.
        let active = resolve(&sample_timeline(), secs_f64(4.9));
        assert_eq!(active.line_duration, Some(secs_f64(2.5)));
    }

    #[test]
    fn test_scenario_display_sequence() {
        let timeline = sample_timeline();
        let mut committed = String::new();
        let mut changes = 0;
        for position in [0.1, 1.0, 2.6, 5.2] {
            let active = resolve(&timeline, secs_f64(position));
            if !active.display_text.is_empty() && active.display_text != committed {
                committed = active.display_text;
                changes += 1;
            }
        }
        assert_eq!(committed, "End");
        // One initial commit plus exactly two subsequent changes.
        assert_eq!(changes, 3);
    }
}
