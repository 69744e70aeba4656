//! Shared fixtures for integration tests

use std::sync::Arc;
use tabfile::index::IndexService;
use tabfile::store::{BookmarkStore, CreateDetails, InMemoryBookmarkStore};
use tabfile::sync::SyncCoordinator;

pub fn coordinator_over(store: Arc<InMemoryBookmarkStore>) -> SyncCoordinator {
    SyncCoordinator::new(Arc::new(IndexService::new(store)))
}

pub async fn create_folder(store: &InMemoryBookmarkStore, parent: &str, title: &str) -> String {
    store
        .create(CreateDetails {
            parent_id: Some(parent.to_string()),
            title: title.to_string(),
            url: None,
            index: None,
        })
        .await
        .unwrap()
        .id
}

pub async fn create_bookmark(
    store: &InMemoryBookmarkStore,
    parent: &str,
    title: &str,
    url: &str,
) -> String {
    store
        .create(CreateDetails {
            parent_id: Some(parent.to_string()),
            title: title.to_string(),
            url: Some(url.to_string()),
            index: None,
        })
        .await
        .unwrap()
        .id
}
