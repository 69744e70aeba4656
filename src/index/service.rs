//! Index Service
//!
//! Owns the snapshot currently in effect. Rebuilds publish a fully built
//! snapshot through a single swap, so readers see either the old snapshot or
//! the new one and never a partial one. A failed rebuild leaves the previous
//! snapshot in effect.

use super::builder;
use super::snapshot::{ChildRef, IndexedNode, Snapshot};
use crate::error::BookmarkError;
use crate::store::BookmarkStore;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Holder of the current bookmark snapshot
pub struct IndexService {
    store: Arc<dyn BookmarkStore>,
    current: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
}

impl IndexService {
    /// Create a service with an empty snapshot; call `rebuild_index` to populate it
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Arc::new(Snapshot::empty())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStore> {
        &self.store
    }

    /// The snapshot in effect right now
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Fetch the tree and replace the current snapshot
    pub async fn rebuild_index(&self) -> Result<Arc<Snapshot>, BookmarkError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = match builder::rebuild(self.store.as_ref(), generation).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                warn!(error = %err, "index rebuild failed, keeping previous snapshot");
                return Err(err);
            }
        };
        // A slower rebuild started earlier must not replace a newer snapshot.
        let mut current = self.current.write();
        if snapshot.generation() > current.generation() {
            *current = snapshot;
        }
        Ok(current.clone())
    }

    pub fn search_folders_by_title(&self, text: &str) -> Vec<IndexedNode> {
        self.snapshot()
            .find_folders_by_title_substring(text)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Zero or one node with this id
    pub fn search_folder_by_id(&self, id: &str) -> Vec<IndexedNode> {
        self.snapshot().find_folder_by_id(id).cloned().into_iter().collect()
    }

    /// Zero or one node with this id
    pub fn search_bookmark_by_id(&self, id: &str) -> Vec<IndexedNode> {
        self.snapshot().find_bookmark_by_id(id).cloned().into_iter().collect()
    }

    /// Zero or one bookmark with this url
    pub fn search_bookmark_by_url(&self, url: &str) -> Vec<IndexedNode> {
        self.snapshot()
            .find_bookmark_by_url(url)
            .cloned()
            .into_iter()
            .collect()
    }

    pub fn folder_bookmarks(&self, folder_id: &str) -> Vec<ChildRef> {
        self.snapshot()
            .folder_bookmarks(folder_id)
            .into_iter()
            .cloned()
            .collect()
    }
}
