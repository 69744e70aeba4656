//! Query Engine
//!
//! Read-only lookups over a single `Snapshot`. Results keep traversal order.

use super::snapshot::{ChildRef, IndexedNode, Snapshot};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Case-insensitive pattern for a folder search.
///
/// Text that does not parse as a regex is matched literally.
fn title_pattern(text: &str) -> Option<Regex> {
    let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
    match build(text) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            debug!(text, error = %err, "search text is not a regex, matching literally");
            build(&regex::escape(text)).ok()
        }
    }
}

impl Snapshot {
    /// Folders whose title matches `text` as a case-insensitive regex.
    ///
    /// An empty `text` matches nothing. Bookmarks and untitled folders never match.
    pub fn find_folders_by_title_substring(&self, text: &str) -> Vec<&IndexedNode> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(pattern) = title_pattern(text) else {
            return Vec::new();
        };
        self.iter()
            .filter(|node| node.is_folder())
            .filter(|node| !node.title.is_empty())
            .filter(|node| pattern.is_match(&node.title))
            .collect()
    }

    /// Exact id lookup. Does not check that the node is a folder.
    pub fn find_folder_by_id(&self, id: &str) -> Option<&IndexedNode> {
        self.find_by_id(id)
    }

    /// Exact id lookup. Does not check that the node is a bookmark.
    pub fn find_bookmark_by_id(&self, id: &str) -> Option<&IndexedNode> {
        self.find_by_id(id)
    }

    /// Exact url lookup; an empty `url` matches nothing
    pub fn find_bookmark_by_url(&self, url: &str) -> Option<&IndexedNode> {
        if url.is_empty() {
            return None;
        }
        self.position_of_url(url)
            .and_then(|position| self.node_at(position))
    }

    /// Bookmark leaves directly inside a folder, in sibling order
    pub fn folder_bookmarks(&self, folder_id: &str) -> Vec<&ChildRef> {
        self.find_by_id(folder_id)
            .and_then(|folder| folder.children.as_ref())
            .map(|children| children.iter().filter(|child| !child.is_folder()).collect())
            .unwrap_or_default()
    }

    /// The folder that directly contains `node`
    pub fn parent_folder_of(&self, node: &IndexedNode) -> Option<&IndexedNode> {
        node.parent_id
            .as_deref()
            .and_then(|parent_id| self.find_by_id(parent_id))
    }

    fn find_by_id(&self, id: &str) -> Option<&IndexedNode> {
        self.position_of_id(id)
            .and_then(|position| self.node_at(position))
    }
}
