use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tabfile::index::IndexService;
use tabfile::store::InMemoryBookmarkStore;
use tabfile::tree::BookmarkNode;

fn leaf() -> impl Strategy<Value = BookmarkNode> {
    prop_oneof![
        ("[a-zA-Z ]{0,8}", "[a-c]{1,2}").prop_map(|(title, host)| {
            BookmarkNode::bookmark("", title, format!("https://{host}.example"))
        }),
        "[a-zA-Z ]{0,8}".prop_map(|title| BookmarkNode::folder("", title)),
    ]
}

fn tree() -> impl Strategy<Value = BookmarkNode> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        ("[a-zA-Z ]{0,8}", prop::collection::vec(inner, 0..6)).prop_map(|(title, children)| {
            let mut folder = BookmarkNode::folder("", title);
            folder.children = Some(children);
            folder
        })
    })
}

fn assign_ids(node: &mut BookmarkNode, next: &mut u64) {
    node.id = next.to_string();
    *next += 1;
    for child in node.children.iter_mut().flatten() {
        assign_ids(child, next);
    }
}

fn rooted(subtree: BookmarkNode) -> BookmarkNode {
    let mut root = BookmarkNode::folder("", "");
    root.children = Some(vec![subtree]);
    let mut next = 0;
    assign_ids(&mut root, &mut next);
    root
}

fn service_over(root: BookmarkNode) -> IndexService {
    IndexService::new(Arc::new(InMemoryBookmarkStore::from_tree(root)))
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn rebuild_is_idempotent(subtree in tree()) {
        let service = service_over(rooted(subtree));
        let (first, second) = block_on(async {
            let first = service.rebuild_index().await.unwrap();
            let second = service.rebuild_index().await.unwrap();
            (first, second)
        });
        prop_assert!(first.same_content(&second));
        prop_assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn snapshot_covers_tree_with_present_parents(subtree in tree()) {
        let root = rooted(subtree);
        let expected = root.subtree_len();
        let service = service_over(root);
        let snapshot = block_on(service.rebuild_index()).unwrap();

        prop_assert_eq!(snapshot.len(), expected);
        let ids: HashSet<&str> = snapshot.iter().map(|n| n.id.as_str()).collect();
        prop_assert_eq!(ids.len(), expected);
        for node in snapshot.iter().skip(1) {
            let parent = node.parent_id.as_deref().unwrap();
            prop_assert!(ids.contains(parent));
        }
        prop_assert!(snapshot.root().unwrap().parent_id.is_none());
    }

    #[test]
    fn folder_search_returns_only_titled_folders(subtree in tree(), text in "[a-zA-Z]{0,2}") {
        let service = service_over(rooted(subtree));
        block_on(service.rebuild_index()).unwrap();
        let results = service.search_folders_by_title(&text);
        if text.is_empty() {
            prop_assert!(results.is_empty());
        }
        for node in results {
            prop_assert!(node.url.is_none());
            prop_assert!(!node.title.is_empty());
            prop_assert!(node.title.to_lowercase().contains(&text.to_lowercase()));
        }
    }

    #[test]
    fn url_lookup_returns_first_match_in_traversal_order(subtree in tree(), host in "[a-c]{1,2}") {
        let service = service_over(rooted(subtree));
        let snapshot = block_on(service.rebuild_index()).unwrap();
        let url = format!("https://{host}.example");
        let expected = snapshot.iter().find(|n| n.url.as_deref() == Some(url.as_str()));
        let found = snapshot.find_bookmark_by_url(&url);
        prop_assert_eq!(found.map(|n| &n.id), expected.map(|n| &n.id));
        prop_assert!(service.search_bookmark_by_url("").is_empty());
    }
}
