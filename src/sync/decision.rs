//! Upsert decision policy
//!
//! Pure functions that pick which store mutations a workflow should issue.
//! They read a snapshot and never touch the store, so the executor in
//! `coordinator` is the only place mutations happen.

use crate::index::{IndexedNode, Snapshot};
use crate::types::BookmarkId;

/// Request to file `url` under `folder_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkUpsert {
    pub url: String,
    pub title: String,
    pub folder_id: BookmarkId,
}

/// What to do with a bookmark upsert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertDecision {
    /// No bookmark has this url yet
    Create {
        parent_id: BookmarkId,
        title: String,
        url: String,
    },
    /// A bookmark with this url exists somewhere: relocate it, then retitle it
    MoveAndUpdate {
        existing_id: BookmarkId,
        parent_id: BookmarkId,
        title: String,
        url: String,
    },
}

/// Dedupe by url: an existing bookmark with the same url is reused wherever it lives
pub fn decide_bookmark_upsert(snapshot: &Snapshot, request: &BookmarkUpsert) -> UpsertDecision {
    match snapshot.find_bookmark_by_url(&request.url) {
        Some(existing) => UpsertDecision::MoveAndUpdate {
            existing_id: existing.id.clone(),
            parent_id: request.folder_id.clone(),
            title: request.title.clone(),
            url: request.url.clone(),
        },
        None => UpsertDecision::Create {
            parent_id: request.folder_id.clone(),
            title: request.title.clone(),
            url: request.url.clone(),
        },
    }
}

/// What to do with a folder upsert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderDecision {
    /// `parent_id: None` leaves the choice of parent to the host
    Create {
        parent_id: Option<BookmarkId>,
        title: String,
    },
    /// Retitle in place; folders are never moved by an upsert
    Rename { folder_id: BookmarkId, title: String },
}

/// Folders are not deduplicated by title: without an existing folder a new one is always created
pub fn decide_folder_upsert(
    title: &str,
    existing: Option<&IndexedNode>,
    default_parent: Option<&str>,
) -> FolderDecision {
    match existing {
        Some(folder) => FolderDecision::Rename {
            folder_id: folder.id.clone(),
            title: title.to_string(),
        },
        None => FolderDecision::Create {
            parent_id: default_parent.map(str::to_string),
            title: title.to_string(),
        },
    }
}
