//! Bookmark tree snapshot
//!
//! A flattened, point-in-time copy of the host tree. Snapshots are immutable
//! once built; staleness is resolved by building a new one, never by patching.

use crate::tree::BookmarkNode;
use crate::types::BookmarkId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shallow record of a folder's child, kept for structural lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub id: BookmarkId,
    pub index: Option<usize>,
    pub title: String,
    pub url: Option<String>,
}

impl ChildRef {
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }
}

/// One flat record per visited node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedNode {
    pub id: BookmarkId,
    pub index: Option<usize>,
    pub parent_id: Option<BookmarkId>,
    pub title: String,
    pub url: Option<String>,
    pub date_added: Option<i64>,
    /// Present only on folders
    pub children: Option<Vec<ChildRef>>,
}

impl IndexedNode {
    pub(crate) fn from_node(node: &BookmarkNode) -> Self {
        Self {
            id: node.id.clone(),
            index: node.index,
            parent_id: node.parent_id.clone(),
            title: node.title.clone(),
            url: node.url.clone(),
            date_added: node.date_added,
            children: node.children.as_ref().map(|children| {
                children
                    .iter()
                    .map(|child| ChildRef {
                        id: child.id.clone(),
                        index: child.index,
                        title: child.title.clone(),
                        url: child.url.clone(),
                    })
                    .collect()
            }),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }
}

/// Flattened, indexed copy of the bookmark tree in pre-order
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    nodes: Vec<IndexedNode>,
    by_id: HashMap<BookmarkId, usize>,
    by_url: HashMap<String, usize>,
    generation: u64,
}

impl Snapshot {
    /// The snapshot in effect before the first rebuild
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build lookup tables over nodes in traversal order.
    ///
    /// On duplicate ids or urls the earliest node in traversal order wins.
    pub(crate) fn from_nodes(nodes: Vec<IndexedNode>, generation: u64) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut by_url = HashMap::new();
        for (position, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.clone()).or_insert(position);
            if let Some(url) = &node.url {
                by_url.entry(url.clone()).or_insert(position);
            }
        }
        Self {
            nodes,
            by_id,
            by_url,
            generation,
        }
    }

    /// Rebuild counter; 0 means never built
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.iter()
    }

    pub fn root(&self) -> Option<&IndexedNode> {
        self.nodes.first()
    }

    pub(crate) fn position_of_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn position_of_url(&self, url: &str) -> Option<usize> {
        self.by_url.get(url).copied()
    }

    pub(crate) fn node_at(&self, position: usize) -> Option<&IndexedNode> {
        self.nodes.get(position)
    }

    /// Same node set and fields, ignoring the rebuild counter
    pub fn same_content(&self, other: &Snapshot) -> bool {
        self.nodes == other.nodes
    }
}
