use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("config file not found at {path}. A template has been created - edit it and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Playback source errors
    #[error("playback source unavailable: {reason}")]
    PlaybackUnavailable { reason: String },

    // Lyrics source errors
    #[error("lyrics source {name} failed: {reason}")]
    LyricsSourceFailed { name: String, reason: String },

    #[error("no lyrics found for {title} by {artist}")]
    LyricsNotFound { title: String, artist: String },

    // Network errors
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("network request failed: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
