//! Bookmark synchronization
//!
//! Decides and executes mutations against the authoritative store, then
//! re-derives the index.

pub mod coordinator;
pub mod decision;

pub use coordinator::SyncCoordinator;
pub use decision::{BookmarkUpsert, FolderDecision, UpsertDecision};
