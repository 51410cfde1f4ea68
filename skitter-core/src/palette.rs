//! Foreground color selection for readable text over a known background.

use crate::random::Randomness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color value handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Background class the surface renders over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    #[default]
    Dark,
    Light,
}

/// Colors that stay readable over a dark background.
const ON_DARK: [Color; 11] = [
    Color::new(0xFF, 0xFF, 0xFF), // white
    Color::new(0xE0, 0xE0, 0xE0), // light gray
    Color::new(0xFF, 0xDD, 0x00), // yellow
    Color::new(0x00, 0xAA, 0xFF), // light blue
    Color::new(0x00, 0xDD, 0xDD), // teal
    Color::new(0xAA, 0xFF, 0x00), // lime
    Color::new(0xFF, 0x88, 0x00), // orange
    Color::new(0xFF, 0x88, 0xFF), // pink
    Color::new(0x99, 0xFF, 0x99), // light green
    Color::new(0xFF, 0xFF, 0xDD), // cream
    Color::new(0xDD, 0xBB, 0xFF), // lavender
];

/// Colors that stay readable over a light background.
const ON_LIGHT: [Color; 3] = [
    Color::new(0x00, 0x00, 0x00), // black
    Color::new(0x40, 0x40, 0x40), // dark gray
    Color::new(0x80, 0x80, 0x80), // gray
];

/// Pick a uniformly random color readable over `background`.
pub fn readable_color(background: Background, rng: &mut dyn Randomness) -> Color {
    let pool: &[Color] = match background {
        Background::Dark => &ON_DARK,
        Background::Light => &ON_LIGHT,
    };
    pool[rng.pick_index(pool.len())]
}
