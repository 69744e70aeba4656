//! Host bookmark node as returned by the authoritative store

use crate::types::BookmarkId;
use serde::{Deserialize, Serialize};

/// A bookmark or folder in the host tree.
///
/// `url` is present iff the node is a bookmark leaf; `children` is present
/// only on folders (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: BookmarkId,
    /// Position among siblings; absent on the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BookmarkId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    /// Create an empty folder node
    pub fn folder(id: impl Into<BookmarkId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index: None,
            parent_id: None,
            title: title.into(),
            url: None,
            date_added: None,
            children: Some(Vec::new()),
        }
    }

    /// Create a bookmark leaf
    pub fn bookmark(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            index: None,
            parent_id: None,
            title: title.into(),
            url: Some(url.into()),
            date_added: None,
            children: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    /// Copy of this node without its children
    pub fn detached(&self) -> Self {
        Self {
            children: self.children.as_ref().map(|_| Vec::new()),
            ..self.clone()
        }
    }

    /// Number of nodes in this subtree, this node included
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(BookmarkNode::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_and_bookmark_shape() {
        let folder = BookmarkNode::folder("5", "Rust");
        assert!(folder.is_folder());
        assert_eq!(folder.children.as_deref(), Some(&[][..]));

        let leaf = BookmarkNode::bookmark("6", "Docs", "https://doc.rust-lang.org");
        assert!(!leaf.is_folder());
        assert!(leaf.children.is_none());
    }

    #[test]
    fn test_host_json_uses_camel_case() {
        let json = r#"{"id":"6","index":0,"parentId":"1","title":"Docs","url":"https://doc.rust-lang.org","dateAdded":1700000000000}"#;
        let node: BookmarkNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.parent_id.as_deref(), Some("1"));
        assert_eq!(node.date_added, Some(1_700_000_000_000));
        assert!(!node.is_folder());
    }

    #[test]
    fn test_subtree_len_counts_all_descendants() {
        let mut inner = BookmarkNode::folder("2", "inner");
        inner.children = Some(vec![BookmarkNode::bookmark("3", "a", "https://a")]);
        let mut root = BookmarkNode::folder("0", "");
        root.children = Some(vec![inner, BookmarkNode::bookmark("4", "b", "https://b")]);
        assert_eq!(root.subtree_len(), 4);
        assert_eq!(root.detached().subtree_len(), 1);
    }
}
