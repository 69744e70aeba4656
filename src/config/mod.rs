//! Configuration
//!
//! Layered settings for the store location, search limits, folder creation
//! and logging. See `ConfigLoader` for source precedence.

mod loader;
pub mod paths;

pub use loader::ConfigLoader;

use crate::error::BookmarkError;
use crate::logging::LoggingConfig;
use crate::session::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabfileConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub folders: FolderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the bookmark file lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bookmark JSON file; None means `<data dir>/tabfile/bookmarks.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> Result<PathBuf, BookmarkError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => paths::default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Cap on folder search results shown at once
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Parent id for new folders; unset leaves the choice to the store
    #[serde(default)]
    pub default_parent: Option<String>,
}

impl TabfileConfig {
    pub fn validate(&self) -> Result<(), BookmarkError> {
        if self.search.max_results == 0 {
            return Err(BookmarkError::ConfigError(
                "search.max_results must be greater than 0".to_string(),
            ));
        }
        if matches!(&self.folders.default_parent, Some(parent) if parent.is_empty()) {
            return Err(BookmarkError::ConfigError(
                "folders.default_parent must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}
