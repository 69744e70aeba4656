//! XDG Base Directory locations for config and data files.

use crate::error::BookmarkError;
use std::path::PathBuf;

/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Returns `$XDG_DATA_HOME` if set, otherwise `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg_data_home));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// `$XDG_CONFIG_HOME/tabfile/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|dir| dir.join("tabfile").join("config.toml"))
}

/// `$XDG_DATA_HOME/tabfile/bookmarks.json`
pub fn default_store_path() -> Result<PathBuf, BookmarkError> {
    data_home()
        .map(|dir| dir.join("tabfile").join("bookmarks.json"))
        .ok_or_else(|| {
            BookmarkError::ConfigError(
                "Could not determine XDG data home directory (HOME not set)".to_string(),
            )
        })
}
