use std::sync::Arc;
use tabfile::store::InMemoryBookmarkStore;
use tabfile::types::{BOOKMARKS_BAR_ID, OTHER_BOOKMARKS_ID};

use crate::integration::support::{coordinator_over, create_bookmark, create_folder};

#[tokio::test]
async fn upsert_of_new_url_creates_exactly_one_bookmark_in_folder() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let folder = create_folder(&store, BOOKMARKS_BAR_ID, "Reading").await;
    let coordinator = coordinator_over(store.clone());

    coordinator
        .upsert_bookmark("https://example.com/post", "A post", &folder)
        .await
        .unwrap();

    let snapshot = coordinator.index().rebuild_index().await.unwrap();
    let matches: Vec<_> = snapshot
        .iter()
        .filter(|n| n.url.as_deref() == Some("https://example.com/post"))
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].parent_id.as_deref(), Some(folder.as_str()));
    assert_eq!(matches[0].title, "A post");
}

#[tokio::test]
async fn upsert_of_known_url_relocates_without_duplicating() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let folder_a = create_folder(&store, BOOKMARKS_BAR_ID, "A").await;
    let folder_b = create_folder(&store, OTHER_BOOKMARKS_ID, "B").await;
    let original = create_bookmark(&store, &folder_a, "Old", "https://example.com").await;
    let coordinator = coordinator_over(store.clone());

    let id = coordinator
        .upsert_bookmark("https://example.com", "New", &folder_b)
        .await
        .unwrap();
    assert_eq!(id, original);

    let snapshot = coordinator.index().rebuild_index().await.unwrap();
    let matches: Vec<_> = snapshot
        .iter()
        .filter(|n| n.url.as_deref() == Some("https://example.com"))
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].parent_id.as_deref(), Some(folder_b.as_str()));
    assert_eq!(matches[0].title, "New");
    assert!(snapshot.folder_bookmarks(&folder_a).is_empty());
}

#[tokio::test]
async fn index_reflects_upsert_without_explicit_rebuild() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let coordinator = coordinator_over(store);

    coordinator
        .upsert_bookmark("https://example.com", "Example", BOOKMARKS_BAR_ID)
        .await
        .unwrap();
    assert_eq!(
        coordinator
            .index()
            .search_bookmark_by_url("https://example.com")
            .len(),
        1
    );
}

#[tokio::test]
async fn concurrent_upserts_of_same_url_never_duplicate() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let coordinator = Arc::new(coordinator_over(store));

    let mut handles = Vec::new();
    for n in 0..8 {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            coordinator
                .upsert_bookmark("https://example.com", &format!("Title {n}"), BOOKMARKS_BAR_ID)
                .await
                .unwrap()
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let snapshot = coordinator.index().snapshot();
    let count = snapshot
        .iter()
        .filter(|n| n.url.as_deref() == Some("https://example.com"))
        .count();
    assert_eq!(count, 1);
}
