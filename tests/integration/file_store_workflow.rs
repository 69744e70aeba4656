use std::sync::Arc;
use tabfile::config::TabfileConfig;
use tabfile::store::{BookmarkStore, JsonFileBookmarkStore};
use tabfile::tooling::{CliContext, Commands};
use tabfile::types::BOOKMARKS_BAR_ID;
use tempfile::TempDir;

fn open_context(temp_dir: &TempDir) -> CliContext {
    let store = JsonFileBookmarkStore::open(temp_dir.path().join("bookmarks.json")).unwrap();
    let store: Arc<dyn BookmarkStore> = Arc::new(store);
    CliContext::from_parts(TabfileConfig::default(), store)
}

#[tokio::test]
async fn commands_persist_across_contexts() {
    let temp_dir = TempDir::new().unwrap();
    {
        let context = open_context(&temp_dir);
        let output = context
            .execute(&Commands::UpsertFolder {
                title: "Reading".to_string(),
                folder: None,
            })
            .await
            .unwrap();
        assert!(output.success, "{}", output.text);
    }

    let context = open_context(&temp_dir);
    let output = context
        .execute(&Commands::Search {
            text: "read".to_string(),
            format: "json".to_string(),
        })
        .await
        .unwrap();
    let results: Vec<tabfile::index::IndexedNode> = serde_json::from_str(&output.text).unwrap();
    assert_eq!(results.len(), 1);
    let reading = results[0].id.clone();

    let output = context
        .execute(&Commands::Upsert {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            folder: reading.clone(),
        })
        .await
        .unwrap();
    assert!(output.success);

    let output = context
        .execute(&Commands::Folder { id: reading })
        .await
        .unwrap();
    assert!(output.text.contains("https://example.com"));
}

#[tokio::test]
async fn refusing_to_upsert_into_a_bookmark() {
    let temp_dir = TempDir::new().unwrap();
    let context = open_context(&temp_dir);
    context
        .execute(&Commands::Upsert {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            folder: BOOKMARKS_BAR_ID.to_string(),
        })
        .await
        .unwrap();

    let store = JsonFileBookmarkStore::open(temp_dir.path().join("bookmarks.json")).unwrap();
    let root = store.get_tree().await.unwrap();
    let bookmark_id = root.children.unwrap()[0].children.as_ref().unwrap()[0].id.clone();

    let err = context
        .execute(&Commands::Upsert {
            url: "https://other.example".to_string(),
            title: "Other".to_string(),
            folder: bookmark_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, tabfile::error::BookmarkError::InvalidInput(_)));
}
