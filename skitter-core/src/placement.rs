//! Anchor corner selection for the display surface.

use crate::random::Randomness;
use crate::surface::Size;

/// The nine anchor positions a surface can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
    CenterLeft,
    CenterRight,
    Center,
}

impl Corner {
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopCenter,
        Self::BottomCenter,
        Self::CenterLeft,
        Self::CenterRight,
        Self::Center,
    ];

    /// Top-left coordinate that pins a window of size `window` to this
    /// corner of `screen`. Margins are uneven on purpose so the window
    /// clears taskbars and rounded screen corners.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn anchor(self, window: Size, screen: Size) -> (i32, i32) {
        let (sw, sh) = (screen.width as i32, screen.height as i32);
        let (w, h) = (window.width as i32, window.height as i32);
        match self {
            Self::TopLeft => (20, 20),
            Self::TopRight => (sw - w - 20, 40),
            Self::BottomLeft => (20, sh - h - 60),
            Self::BottomRight => (sw - w - 25, sh - h - 60),
            Self::TopCenter => ((sw - w) / 2, 20),
            Self::BottomCenter => ((sw - w) / 2, sh - h - 60),
            Self::CenterLeft => (20, (sh - h) / 2),
            Self::CenterRight => (sw - w - 20, (sh - h) / 2),
            Self::Center => ((sw - w) / 2, (sh - h) / 2),
        }
    }

    /// Pick a different corner uniformly at random.
    #[must_use]
    pub fn random_other(self, rng: &mut dyn Randomness) -> Self {
        let others: Vec<Self> = Self::ALL.iter().copied().filter(|c| *c != self).collect();
        others[rng.pick_index(others.len())]
    }
}
