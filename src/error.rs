//! Error types
//!
//! `StoreError` is what a host adapter reports through its error channel.
//! `BookmarkError` is what the index, coordinator and session surface to callers.

use crate::types::BookmarkId;
use thiserror::Error;

/// Failure reported by a bookmark store or tab source adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// The host refused the call (the host's own error message)
    #[error("{0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected(message.into())
    }
}

/// Errors surfaced by the bookmark index and sync workflows
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// A store or tab call signalled its error channel
    #[error("Bookmark host unavailable: {0}")]
    HostUnavailable(#[from] StoreError),

    /// A lookup the workflow depends on returned no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// The move half of a move-then-update succeeded, the update did not.
    /// The bookmark stays in its new folder with its previous title and url.
    #[error("Partial failure: bookmark {bookmark_id} moved to {parent_id} but update failed: {source}")]
    PartialFailure {
        bookmark_id: BookmarkId,
        parent_id: BookmarkId,
        #[source]
        source: StoreError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for BookmarkError {
    fn from(err: config::ConfigError) -> Self {
        BookmarkError::ConfigError(err.to_string())
    }
}
