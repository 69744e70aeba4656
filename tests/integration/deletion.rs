use std::sync::Arc;
use tabfile::store::InMemoryBookmarkStore;
use tabfile::types::BOOKMARKS_BAR_ID;

use crate::integration::support::{coordinator_over, create_bookmark, create_folder};

#[tokio::test]
async fn deleting_bookmark_leaves_folder_and_siblings() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let folder = create_folder(&store, BOOKMARKS_BAR_ID, "F").await;
    create_bookmark(&store, &folder, "Example", "https://example.com").await;
    let sibling = create_bookmark(&store, &folder, "Sibling", "https://sibling.example").await;
    let coordinator = coordinator_over(store);

    let before = coordinator.index().rebuild_index().await.unwrap();
    let folder_before = before.find_folder_by_id(&folder).unwrap().clone();

    let removed = coordinator
        .delete_bookmark("https://example.com")
        .await
        .unwrap();
    assert!(removed.is_some());

    let after = coordinator.index().rebuild_index().await.unwrap();
    assert!(after.find_bookmark_by_url("https://example.com").is_none());
    let folder_after = after.find_folder_by_id(&folder).unwrap();
    assert_eq!(folder_after.title, folder_before.title);
    assert_eq!(folder_after.parent_id, folder_before.parent_id);
    let remaining: Vec<_> = after
        .folder_bookmarks(&folder)
        .into_iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(remaining, vec![sibling]);
}

#[tokio::test]
async fn deleting_folder_removes_whole_subtree() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let folder = create_folder(&store, BOOKMARKS_BAR_ID, "F").await;
    let b1 = create_bookmark(&store, &folder, "one", "https://one.example").await;
    let b2 = create_bookmark(&store, &folder, "two", "https://two.example").await;
    let coordinator = coordinator_over(store);

    coordinator.delete_folder(&folder).await.unwrap();

    let snapshot = coordinator.index().snapshot();
    for id in [&folder, &b1, &b2] {
        assert!(snapshot.find_bookmark_by_id(id).is_none(), "{id} survived");
    }
    assert!(snapshot.find_folder_by_id(BOOKMARKS_BAR_ID).is_some());
}

#[tokio::test]
async fn deleting_unknown_folder_surfaces_host_error_and_refreshes() {
    let store = Arc::new(InMemoryBookmarkStore::new());
    let coordinator = coordinator_over(store);

    let err = coordinator.delete_folder("404").await.unwrap_err();
    assert!(matches!(err, tabfile::error::BookmarkError::HostUnavailable(_)));
    assert!(!coordinator.index().snapshot().is_empty());
}
