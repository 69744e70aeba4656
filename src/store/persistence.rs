//! JSON file persistence for the bookmark store
//!
//! The whole tree lives in a single JSON document. Reads are served from
//! memory. A mutation becomes visible only after the file holding its
//! result has been written.

use super::memory::{default_tree, remove_op, InMemoryBookmarkStore, StoreOp};
use super::{BookmarkStore, CreateDetails, MoveDestination, UpdateChanges};
use crate::error::StoreError;
use crate::tree::BookmarkNode;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bookmark store persisted to a JSON file
pub struct JsonFileBookmarkStore {
    path: PathBuf,
    inner: InMemoryBookmarkStore,
}

impl JsonFileBookmarkStore {
    /// Open the store at `path`, creating a file with the default containers if absent
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let root = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str::<BookmarkNode>(&content)?
        } else {
            info!(path = %path.display(), "creating new bookmark file");
            default_tree()
        };

        let store = Self {
            path,
            inner: InMemoryBookmarkStore::from_tree(root),
        };
        store.save(&store.inner.tree())?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, root: &BookmarkNode) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(root)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "saved bookmark file");
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for JsonFileBookmarkStore {
    async fn get_tree(&self) -> Result<BookmarkNode, StoreError> {
        self.inner.get_tree_sync()
    }

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, StoreError> {
        self.inner
            .mutate(StoreOp::Create, |tree| tree.create(details), |root| self.save(root))
    }

    async fn move_node(
        &self,
        id: &str,
        destination: MoveDestination,
    ) -> Result<BookmarkNode, StoreError> {
        self.inner.mutate(
            StoreOp::Move,
            |tree| tree.move_node(id, destination),
            |root| self.save(root),
        )
    }

    async fn update(&self, id: &str, changes: UpdateChanges) -> Result<BookmarkNode, StoreError> {
        self.inner
            .mutate(StoreOp::Update, |tree| tree.update(id, changes), |root| self.save(root))
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.inner
            .mutate(remove_op(false), |tree| tree.remove(id, false), |root| self.save(root))
    }

    async fn remove_subtree(&self, id: &str) -> Result<(), StoreError> {
        self.inner
            .mutate(remove_op(true), |tree| tree.remove(id, true), |root| self.save(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BOOKMARKS_BAR_ID;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_file_with_default_tree() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("bookmarks.json");
        let store = JsonFileBookmarkStore::open(&path).unwrap();
        assert!(path.exists());
        let root = store.get_tree().await.unwrap();
        assert_eq!(root.children.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookmarks.json");
        {
            let store = JsonFileBookmarkStore::open(&path).unwrap();
            store
                .create(CreateDetails {
                    parent_id: Some(BOOKMARKS_BAR_ID.to_string()),
                    title: "Rust".to_string(),
                    url: Some("https://www.rust-lang.org".to_string()),
                    index: None,
                })
                .await
                .unwrap();
        }

        let reopened = JsonFileBookmarkStore::open(&path).unwrap();
        let root = reopened.get_tree().await.unwrap();
        let bar = &root.children.unwrap()[0];
        let leaf = &bar.children.as_ref().unwrap()[0];
        assert_eq!(leaf.url.as_deref(), Some("https://www.rust-lang.org"));
        assert_eq!(leaf.parent_id.as_deref(), Some(BOOKMARKS_BAR_ID));
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookmarks.json");
        let store = JsonFileBookmarkStore::open(&path).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        assert!(store.remove("999").await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_write_discards_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("profile");
        let store = JsonFileBookmarkStore::open(dir.join("bookmarks.json")).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        let result = store
            .create(CreateDetails {
                parent_id: Some(BOOKMARKS_BAR_ID.to_string()),
                title: "Rust".to_string(),
                url: Some("https://www.rust-lang.org".to_string()),
                index: None,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Io(_))));

        let root = store.get_tree().await.unwrap();
        let bar = &root.children.unwrap()[0];
        assert!(bar.children.as_ref().unwrap().is_empty());
        assert_eq!(store.path(), dir.join("bookmarks.json"));
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookmarks.json");
        std::fs::write(&path, "not json").unwrap();
        let result = JsonFileBookmarkStore::open(&path);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
