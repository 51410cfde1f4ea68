//! Configuration loading and defaults.

use crate::error::{CoreError, Result};
use crate::palette::Background;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Playback position poll cadence in milliseconds.
    #[serde(default = "default_position_poll_ms")]
    pub position_poll_ms: u64,
    /// Track identity poll cadence in milliseconds.
    #[serde(default = "default_track_poll_ms")]
    pub track_poll_ms: u64,
}

const fn default_position_poll_ms() -> u64 {
    50
}

const fn default_track_poll_ms() -> u64 {
    2000
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            position_poll_ms: default_position_poll_ms(),
            track_poll_ms: default_track_poll_ms(),
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub const fn position_poll_interval(&self) -> Duration {
        Duration::from_millis(self.position_poll_ms)
    }

    #[must_use]
    pub const fn track_poll_interval(&self) -> Duration {
        Duration::from_millis(self.track_poll_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Background class the surface renders over.
    #[serde(default)]
    pub background: Background,
    /// Minimum window width while revealing, in pixels.
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    /// Horizontal padding added around the measured text, in pixels.
    #[serde(default = "default_width_padding")]
    pub width_padding: u32,
    /// Vertical padding added around the measured text, in pixels.
    #[serde(default = "default_height_padding")]
    pub height_padding: u32,
}

const fn default_min_width() -> u32 {
    400
}

const fn default_width_padding() -> u32 {
    40
}

const fn default_height_padding() -> u32 {
    20
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            background: Background::default(),
            min_width: default_min_width(),
            width_padding: default_width_padding(),
            height_padding: default_height_padding(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Shake tick cadence in milliseconds.
    #[serde(default = "default_shake_tick_ms")]
    pub shake_tick_ms: u64,
    /// Probability of hopping to a new corner on a line change.
    #[serde(default = "default_corner_change_probability")]
    pub corner_change_probability: f64,
}

const fn default_shake_tick_ms() -> u64 {
    30
}

const fn default_corner_change_probability() -> f64 {
    0.2
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            shake_tick_ms: default_shake_tick_ms(),
            corner_change_probability: default_corner_change_probability(),
        }
    }
}

impl Config {
    /// Get the config file path (`~/.config/skitter/config.toml`).
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file, or write a template on first run.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template on
    /// first run, and parse/validation errors otherwise.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&config_path, CONFIG_TEMPLATE)?;
            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.animation.corner_change_probability) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "animation.corner_change_probability must be within 0.0..=1.0, got {}",
                    self.animation.corner_change_probability
                ),
            });
        }
        if self.playback.position_poll_ms == 0 || self.playback.track_poll_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "playback poll cadences must be non-zero".into(),
            });
        }
        if self.animation.shake_tick_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "animation.shake_tick_ms must be non-zero".into(),
            });
        }
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"# Skitter configuration
# ~/.config/skitter/config.toml

[playback]
# Playback position poll cadence (milliseconds)
position_poll_ms = 50
# Track identity poll cadence (milliseconds)
track_poll_ms = 2000

[ui]
# Background class the surface renders over: "dark" or "light"
background = "dark"
# Minimum window width while revealing (pixels)
min_width = 400
# Padding added around the measured text (pixels)
width_padding = 40
height_padding = 20

[animation]
# Shake tick cadence (milliseconds)
shake_tick_ms = 30
# Probability of hopping to a new corner on a line change (0.0 - 1.0)
corner_change_probability = 0.2
"#;
