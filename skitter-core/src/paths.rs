//! Filesystem locations for skitter configuration.

use std::path::PathBuf;

pub const CONFIG_DIR_NAME: &str = "skitter";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory (`~/.config/skitter` on Linux).
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Configuration file path (`~/.config/skitter/config.toml`).
#[must_use]
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
