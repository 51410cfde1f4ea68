//! Playback-synchronized kinetic lyrics engine.
//!
//! The core continuously re-derives "what line is playing now" from a
//! polled playback position and drives two independently timed animations
//! over an opaque rendering surface: a character-by-character reveal paced
//! to the line's duration, and a short randomized shake around the window's
//! anchor corner.
//!
//! Playback sources, lyrics sources, and the rendering surface are traits;
//! the embedding application supplies implementations and wires the pieces
//! together:
//!
//! ```ignore
//! let config = Config::load_or_create()?;
//! let cancel = CancellationToken::new();
//! let (engine, tx) = Engine::new(surface, default_randomness(), config.clone(), cancel.clone());
//!
//! PositionTracker::new(
//!     playback.clone(),
//!     tx.clone(),
//!     config.playback.position_poll_interval(),
//!     cancel.clone(),
//! )
//! .start();
//! SongWatcher::new(
//!     playback,
//!     lyrics,
//!     tx,
//!     config.playback.track_poll_interval(),
//!     cancel.clone(),
//! )
//! .start();
//!
//! engine.run().await;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod palette;
pub mod paths;
pub mod placement;
pub mod position;
pub mod random;
pub mod resolver;
pub mod reveal;
pub mod shake;
pub mod source;
pub mod surface;
pub mod time;
pub mod timeline;
pub mod watcher;

pub use config::{AnimationConfig, Config, PlaybackConfig, UiConfig};
pub use engine::{Engine, EngineMessage};
pub use error::{CoreError, Result};
pub use palette::{readable_color, Background, Color};
pub use placement::Corner;
pub use position::PositionTracker;
pub use random::{default_randomness, seeded_randomness, Randomness};
pub use resolver::{resolve, ActiveLine};
pub use reveal::RevealSession;
pub use shake::{ShakePattern, ShakeSession, ShakeStep};
pub use source::{LyricsSource, PlaybackSource, TrackId};
pub use surface::{Rect, RenderSurface, Size};
pub use time::DurationExt;
pub use timeline::{LyricLine, Timeline};
pub use watcher::SongWatcher;
