//! Index Builder
//!
//! Fetches the host tree and flattens it into a new `Snapshot`.

use super::snapshot::{IndexedNode, Snapshot};
use crate::error::BookmarkError;
use crate::store::BookmarkStore;
use crate::tree::BookmarkNode;
use std::time::Instant;
use tracing::debug;

/// Flatten a tree in depth-first pre-order: a node before its children,
/// children in sibling order.
pub fn flatten(root: &BookmarkNode) -> Vec<IndexedNode> {
    let mut nodes = Vec::with_capacity(root.subtree_len());
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        nodes.push(IndexedNode::from_node(node));
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        }
    }
    nodes
}

/// Build a snapshot from an already-fetched tree
pub fn build(root: &BookmarkNode, generation: u64) -> Snapshot {
    Snapshot::from_nodes(flatten(root), generation)
}

/// Fetch the tree from the store and build a snapshot from it.
///
/// Nothing is published here; the caller decides when the result takes effect.
pub async fn rebuild(store: &dyn BookmarkStore, generation: u64) -> Result<Snapshot, BookmarkError> {
    let start = Instant::now();
    let root = store.get_tree().await?;
    let snapshot = build(&root, generation);
    debug!(
        generation,
        nodes = snapshot.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "rebuilt bookmark snapshot"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> BookmarkNode {
        let mut rust = BookmarkNode::folder("4", "Rust");
        rust.children = Some(vec![
            BookmarkNode::bookmark("5", "Book", "https://doc.rust-lang.org/book"),
            BookmarkNode::bookmark("6", "Std", "https://doc.rust-lang.org/std"),
        ]);
        let mut bar = BookmarkNode::folder("1", "Bookmarks bar");
        bar.children = Some(vec![rust, BookmarkNode::bookmark("7", "News", "https://news.example")]);
        let other = BookmarkNode::folder("2", "Other bookmarks");
        let mut root = BookmarkNode::folder("0", "");
        root.children = Some(vec![bar, other]);
        root
    }

    #[test]
    fn test_flatten_is_preorder_in_sibling_order() {
        let ids: Vec<_> = flatten(&sample_tree()).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["0", "1", "4", "5", "6", "7", "2"]);
    }

    #[test]
    fn test_flatten_keeps_shallow_children() {
        let nodes = flatten(&sample_tree());
        let rust = nodes.iter().find(|n| n.id == "4").unwrap();
        let children = rust.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].url.as_deref(), Some("https://doc.rust-lang.org/std"));

        let leaf = nodes.iter().find(|n| n.id == "5").unwrap();
        assert!(leaf.children.is_none());
    }

    #[test]
    fn test_build_twice_yields_same_content() {
        let tree = sample_tree();
        let first = build(&tree, 1);
        let second = build(&tree, 2);
        assert!(first.same_content(&second));
        assert_ne!(first.generation(), second.generation());
    }
}
