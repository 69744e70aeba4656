//! In-memory bookmark store
//!
//! Holds the tree in process memory and enforces the host rules the core
//! depends on: permanent root containers, non-empty folder protection,
//! no folder moved under itself, sibling index renumbering.

use super::{BookmarkStore, CreateDetails, MoveDestination, UpdateChanges};
use crate::error::StoreError;
use crate::tree::BookmarkNode;
use crate::types::{BOOKMARKS_BAR_ID, MOBILE_BOOKMARKS_ID, OTHER_BOOKMARKS_ID, ROOT_ID};
use async_trait::async_trait;
use parking_lot::RwLock;
#[cfg(test)]
use std::collections::HashMap;
use tracing::{debug, trace};

const ERR_NOT_FOUND: &str = "Can't find bookmark for id.";
const ERR_PARENT_NOT_FOUND: &str = "Can't find parent bookmark for id.";
const ERR_PARENT_NOT_FOLDER: &str = "Parameter 'parentId' does not specify a folder.";
const ERR_MODIFY_ROOT: &str = "Can't modify the root bookmark folders.";
const ERR_NON_EMPTY: &str = "Can't remove non-empty folder (use recursive to force).";
const ERR_FOLDER_URL: &str = "Can't set URL of a bookmark folder.";
const ERR_INTO_DESCENDANT: &str = "Can't move a folder into itself or one of its descendants.";

/// Store operation kinds, for call tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    GetTree,
    Create,
    Move,
    Update,
    Remove,
    RemoveSubtree,
}

/// The tree plus the id counter. Mutations either fail without touching
/// the state or apply completely.
#[derive(Debug, Clone)]
pub(crate) struct TreeState {
    root: BookmarkNode,
    next_id: u64,
}

impl TreeState {
    pub(crate) fn create(&mut self, details: CreateDetails) -> Result<BookmarkNode, StoreError> {
        let parent_id = details
            .parent_id
            .unwrap_or_else(|| OTHER_BOOKMARKS_ID.to_string());
        if parent_id == ROOT_ID {
            return Err(StoreError::rejected(ERR_MODIFY_ROOT));
        }

        let id = self.next_id.to_string();
        let node = BookmarkNode {
            id: id.clone(),
            index: None,
            parent_id: Some(parent_id.clone()),
            title: details.title,
            children: match details.url {
                Some(_) => None,
                None => Some(Vec::new()),
            },
            url: details.url,
            date_added: Some(chrono::Utc::now().timestamp_millis()),
        };

        let parent = find_mut(&mut self.root, &parent_id)
            .ok_or_else(|| StoreError::rejected(ERR_PARENT_NOT_FOUND))?;
        let created = insert_child(parent, node, details.index)?;
        self.next_id += 1;
        debug!(id = %id, parent_id = %parent_id, "created node");
        Ok(created)
    }

    pub(crate) fn move_node(
        &mut self,
        id: &str,
        destination: MoveDestination,
    ) -> Result<BookmarkNode, StoreError> {
        let current = find(&self.root, id).ok_or_else(|| StoreError::rejected(ERR_NOT_FOUND))?;
        if is_permanent(id) {
            return Err(StoreError::rejected(ERR_MODIFY_ROOT));
        }
        let parent_id = match destination.parent_id {
            Some(parent_id) => parent_id,
            None => current
                .parent_id
                .clone()
                .ok_or_else(|| StoreError::rejected(ERR_MODIFY_ROOT))?,
        };
        if parent_id == ROOT_ID {
            return Err(StoreError::rejected(ERR_MODIFY_ROOT));
        }
        let parent =
            find(&self.root, &parent_id).ok_or_else(|| StoreError::rejected(ERR_PARENT_NOT_FOUND))?;
        if !parent.is_folder() {
            return Err(StoreError::rejected(ERR_PARENT_NOT_FOLDER));
        }
        if find(current, &parent_id).is_some() {
            return Err(StoreError::rejected(ERR_INTO_DESCENDANT));
        }

        let node = detach(&mut self.root, id).ok_or_else(|| StoreError::rejected(ERR_NOT_FOUND))?;
        let parent = find_mut(&mut self.root, &parent_id)
            .ok_or_else(|| StoreError::rejected(ERR_PARENT_NOT_FOUND))?;
        let moved = insert_child(parent, node, destination.index)?;
        debug!(id = %id, parent_id = %parent_id, "moved node");
        Ok(moved)
    }

    pub(crate) fn update(
        &mut self,
        id: &str,
        changes: UpdateChanges,
    ) -> Result<BookmarkNode, StoreError> {
        if is_permanent(id) {
            return Err(StoreError::rejected(ERR_MODIFY_ROOT));
        }
        let node = find_mut(&mut self.root, id).ok_or_else(|| StoreError::rejected(ERR_NOT_FOUND))?;
        if changes.url.is_some() && node.is_folder() {
            return Err(StoreError::rejected(ERR_FOLDER_URL));
        }
        if let Some(title) = changes.title {
            node.title = title;
        }
        if let Some(url) = changes.url {
            node.url = Some(url);
        }
        Ok(node.detached())
    }

    pub(crate) fn remove(&mut self, id: &str, recursive: bool) -> Result<(), StoreError> {
        if is_permanent(id) {
            return Err(StoreError::rejected(ERR_MODIFY_ROOT));
        }
        let node = find(&self.root, id).ok_or_else(|| StoreError::rejected(ERR_NOT_FOUND))?;
        let has_children = node.children.as_ref().is_some_and(|c| !c.is_empty());
        if has_children && !recursive {
            return Err(StoreError::rejected(ERR_NON_EMPTY));
        }
        detach(&mut self.root, id);
        debug!(id = %id, recursive, "removed node");
        Ok(())
    }
}

/// Bookmark store backed by an in-memory tree
pub struct InMemoryBookmarkStore {
    state: RwLock<TreeState>,
    #[cfg(test)]
    failures: RwLock<HashMap<StoreOp, String>>,
    #[cfg(test)]
    calls: RwLock<Vec<StoreOp>>,
}

impl Default for InMemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookmarkStore {
    /// Create a store holding only the root and its permanent containers
    pub fn new() -> Self {
        Self::from_tree(default_tree())
    }

    /// Create a store from an existing tree. Missing indices and parent ids
    /// are filled in; new ids continue after the largest numeric id present.
    pub fn from_tree(mut root: BookmarkNode) -> Self {
        root.parent_id = None;
        root.index = None;
        normalize(&mut root);
        let next_id = max_numeric_id(&root) + 1;
        Self {
            state: RwLock::new(TreeState { root, next_id }),
            #[cfg(test)]
            failures: RwLock::new(HashMap::new()),
            #[cfg(test)]
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Copy of the current tree
    pub fn tree(&self) -> BookmarkNode {
        self.state.read().root.clone()
    }

    fn begin(&self, op: StoreOp) -> Result<(), StoreError> {
        trace!(?op, "store call");
        #[cfg(test)]
        {
            self.calls.write().push(op);
            if let Some(message) = self.failures.write().remove(&op) {
                return Err(StoreError::Rejected(message));
            }
        }
        Ok(())
    }

    pub(crate) fn get_tree_sync(&self) -> Result<BookmarkNode, StoreError> {
        self.begin(StoreOp::GetTree)?;
        Ok(self.tree())
    }

    /// Apply `mutation` to a copy of the tree and install the copy only once
    /// `commit` has accepted the new root. Either failure leaves the current
    /// tree as it was.
    pub(crate) fn mutate<T>(
        &self,
        op: StoreOp,
        mutation: impl FnOnce(&mut TreeState) -> Result<T, StoreError>,
        commit: impl FnOnce(&BookmarkNode) -> Result<(), StoreError>,
    ) -> Result<T, StoreError> {
        self.begin(op)?;
        let mut state = self.state.write();
        let mut next = state.clone();
        let value = mutation(&mut next)?;
        commit(&next.root)?;
        *state = next;
        Ok(value)
    }

    pub(crate) fn create_sync(&self, details: CreateDetails) -> Result<BookmarkNode, StoreError> {
        self.mutate(StoreOp::Create, |tree| tree.create(details), |_| Ok(()))
    }

    pub(crate) fn move_sync(
        &self,
        id: &str,
        destination: MoveDestination,
    ) -> Result<BookmarkNode, StoreError> {
        self.mutate(StoreOp::Move, |tree| tree.move_node(id, destination), |_| Ok(()))
    }

    pub(crate) fn update_sync(
        &self,
        id: &str,
        changes: UpdateChanges,
    ) -> Result<BookmarkNode, StoreError> {
        self.mutate(StoreOp::Update, |tree| tree.update(id, changes), |_| Ok(()))
    }

    pub(crate) fn remove_sync(&self, id: &str, recursive: bool) -> Result<(), StoreError> {
        self.mutate(remove_op(recursive), |tree| tree.remove(id, recursive), |_| Ok(()))
    }
}

#[cfg(test)]
impl InMemoryBookmarkStore {
    /// Make the next call of `op` fail with `message`
    pub fn inject_failure(&self, op: StoreOp, message: impl Into<String>) {
        self.failures.write().insert(op, message.into());
    }

    /// Operations issued so far, in call order
    pub fn calls(&self) -> Vec<StoreOp> {
        self.calls.read().clone()
    }

    /// Mutating operations issued so far, in call order
    pub fn mutations(&self) -> Vec<StoreOp> {
        self.calls
            .read()
            .iter()
            .copied()
            .filter(|op| *op != StoreOp::GetTree)
            .collect()
    }
}

pub(crate) fn remove_op(recursive: bool) -> StoreOp {
    if recursive {
        StoreOp::RemoveSubtree
    } else {
        StoreOp::Remove
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn get_tree(&self) -> Result<BookmarkNode, StoreError> {
        self.get_tree_sync()
    }

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, StoreError> {
        self.create_sync(details)
    }

    async fn move_node(
        &self,
        id: &str,
        destination: MoveDestination,
    ) -> Result<BookmarkNode, StoreError> {
        self.move_sync(id, destination)
    }

    async fn update(&self, id: &str, changes: UpdateChanges) -> Result<BookmarkNode, StoreError> {
        self.update_sync(id, changes)
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.remove_sync(id, false)
    }

    async fn remove_subtree(&self, id: &str) -> Result<(), StoreError> {
        self.remove_sync(id, true)
    }
}

/// Root plus the three permanent containers, all empty
pub fn default_tree() -> BookmarkNode {
    let mut root = BookmarkNode::folder(ROOT_ID, "");
    root.children = Some(vec![
        BookmarkNode::folder(BOOKMARKS_BAR_ID, "Bookmarks bar"),
        BookmarkNode::folder(OTHER_BOOKMARKS_ID, "Other bookmarks"),
        BookmarkNode::folder(MOBILE_BOOKMARKS_ID, "Mobile bookmarks"),
    ]);
    normalize(&mut root);
    root
}

fn is_permanent(id: &str) -> bool {
    matches!(
        id,
        ROOT_ID | BOOKMARKS_BAR_ID | OTHER_BOOKMARKS_ID | MOBILE_BOOKMARKS_ID
    )
}

fn normalize(node: &mut BookmarkNode) {
    let parent_id = node.id.clone();
    if let Some(children) = node.children.as_mut() {
        for (position, child) in children.iter_mut().enumerate() {
            child.index = Some(position);
            child.parent_id = Some(parent_id.clone());
            normalize(child);
        }
    }
}

fn max_numeric_id(node: &BookmarkNode) -> u64 {
    let own = node.id.parse::<u64>().unwrap_or(0);
    node.children
        .iter()
        .flatten()
        .map(max_numeric_id)
        .fold(own, u64::max)
}

fn find<'a>(node: &'a BookmarkNode, id: &str) -> Option<&'a BookmarkNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter()
        .flatten()
        .find_map(|child| find(child, id))
}

fn find_mut<'a>(node: &'a mut BookmarkNode, id: &str) -> Option<&'a mut BookmarkNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter_mut()
        .flatten()
        .find_map(|child| find_mut(child, id))
}

/// Remove the node with `id` from wherever it sits, renumbering its former siblings
fn detach(node: &mut BookmarkNode, id: &str) -> Option<BookmarkNode> {
    let children = node.children.as_mut()?;
    if let Some(position) = children.iter().position(|child| child.id == id) {
        let removed = children.remove(position);
        for (index, sibling) in children.iter_mut().enumerate() {
            sibling.index = Some(index);
        }
        return Some(removed);
    }
    children.iter_mut().find_map(|child| detach(child, id))
}

fn insert_child(
    parent: &mut BookmarkNode,
    mut node: BookmarkNode,
    index: Option<usize>,
) -> Result<BookmarkNode, StoreError> {
    let parent_id = parent.id.clone();
    let children = parent
        .children
        .as_mut()
        .ok_or_else(|| StoreError::rejected(ERR_PARENT_NOT_FOLDER))?;
    let position = index.unwrap_or(children.len()).min(children.len());
    node.parent_id = Some(parent_id);
    children.insert(position, node);
    for (index, sibling) in children.iter_mut().enumerate() {
        sibling.index = Some(index);
    }
    Ok(children[position].detached())
}
