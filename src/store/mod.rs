//! Bookmark Store
//!
//! Port to the host's authoritative bookmark tree. The index never writes
//! here; only the sync coordinator issues mutations, and every call may fail
//! through `StoreError`.

pub mod memory;
pub mod persistence;

use crate::error::StoreError;
use crate::tree::BookmarkNode;
use crate::types::BookmarkId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryBookmarkStore;
pub use persistence::JsonFileBookmarkStore;

/// Arguments for `BookmarkStore::create`
///
/// `url: None` creates a folder. `parent_id: None` lets the host pick its
/// default parent. `index: None` appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDetails {
    pub parent_id: Option<BookmarkId>,
    pub title: String,
    pub url: Option<String>,
    pub index: Option<usize>,
}

/// Arguments for `BookmarkStore::move_node`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDestination {
    pub parent_id: Option<BookmarkId>,
    pub index: Option<usize>,
}

/// Arguments for `BookmarkStore::update`; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChanges {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Authoritative bookmark store interface
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Fetch the whole tree as a single root node
    async fn get_tree(&self) -> Result<BookmarkNode, StoreError>;

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, StoreError>;

    async fn move_node(
        &self,
        id: &str,
        destination: MoveDestination,
    ) -> Result<BookmarkNode, StoreError>;

    async fn update(&self, id: &str, changes: UpdateChanges) -> Result<BookmarkNode, StoreError>;

    /// Remove a bookmark or an empty folder
    async fn remove(&self, id: &str) -> Result<(), StoreError>;

    /// Remove a folder and everything under it
    async fn remove_subtree(&self, id: &str) -> Result<(), StoreError>;
}
