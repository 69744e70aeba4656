//! Upsert Coordinator
//!
//! Executes bookmark and folder workflows against the authoritative store.
//! Each workflow holds the workflow gate for its whole run, so store
//! mutations from two workflows never interleave. Once a workflow has issued
//! (or decided not to issue) its mutations, the index is rebuilt on every
//! exit path, success or failure.

use super::decision::{
    decide_bookmark_upsert, decide_folder_upsert, BookmarkUpsert, FolderDecision, UpsertDecision,
};
use crate::error::BookmarkError;
use crate::index::{IndexService, IndexedNode};
use crate::store::{CreateDetails, MoveDestination, UpdateChanges};
use crate::types::BookmarkId;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Runs upsert and delete workflows and keeps the index fresh after each one
pub struct SyncCoordinator {
    index: Arc<IndexService>,
    folder_parent: Option<BookmarkId>,
    gate: Mutex<()>,
}

impl SyncCoordinator {
    pub fn new(index: Arc<IndexService>) -> Self {
        Self {
            index,
            folder_parent: None,
            gate: Mutex::new(()),
        }
    }

    /// Parent for folders created by `upsert_folder`; `None` uses the host default
    pub fn with_folder_parent(mut self, parent_id: Option<BookmarkId>) -> Self {
        self.folder_parent = parent_id;
        self
    }

    pub fn index(&self) -> &Arc<IndexService> {
        &self.index
    }

    /// Create a bookmark for `url` in `folder_id`, or move and retitle the
    /// bookmark that already has this url.
    ///
    /// The index is rebuilt before deciding. If that rebuild fails nothing is
    /// issued and no trailing rebuild happens.
    pub async fn upsert_bookmark(
        &self,
        url: &str,
        title: &str,
        folder_id: &str,
    ) -> Result<BookmarkId, BookmarkError> {
        if url.is_empty() {
            return Err(BookmarkError::InvalidInput("bookmark url is empty".to_string()));
        }
        let _gate = self.gate.lock().await;
        let snapshot = self.index.rebuild_index().await?;
        let request = BookmarkUpsert {
            url: url.to_string(),
            title: title.to_string(),
            folder_id: folder_id.to_string(),
        };
        let decision = decide_bookmark_upsert(&snapshot, &request);
        debug!(?decision, "bookmark upsert decided");
        self.with_refresh(self.apply_bookmark(decision)).await
    }

    /// Retitle `existing` in place, or create a new folder titled `title`
    pub async fn upsert_folder(
        &self,
        title: &str,
        existing: Option<&IndexedNode>,
    ) -> Result<BookmarkId, BookmarkError> {
        if title.is_empty() {
            return Err(BookmarkError::InvalidInput("folder title is empty".to_string()));
        }
        let _gate = self.gate.lock().await;
        let decision = decide_folder_upsert(title, existing, self.folder_parent.as_deref());
        debug!(?decision, "folder upsert decided");
        self.with_refresh(self.apply_folder(decision)).await
    }

    /// Remove the bookmark with this url.
    ///
    /// Returns `Ok(None)` when no bookmark has the url; nothing is removed then.
    pub async fn delete_bookmark(&self, url: &str) -> Result<Option<BookmarkId>, BookmarkError> {
        let _gate = self.gate.lock().await;
        let snapshot = self.index.rebuild_index().await?;
        let existing = snapshot.find_bookmark_by_url(url).map(|node| node.id.clone());
        self.with_refresh(async move {
            let Some(bookmark_id) = existing else {
                debug!(url = %url, "no bookmark to delete");
                return Ok(None);
            };
            self.index.store().remove(&bookmark_id).await?;
            info!(bookmark_id = %bookmark_id, "deleted bookmark");
            Ok::<_, BookmarkError>(Some(bookmark_id))
        })
        .await
    }

    /// Remove a folder and its whole subtree
    pub async fn delete_folder(&self, folder_id: &str) -> Result<(), BookmarkError> {
        let _gate = self.gate.lock().await;
        self.with_refresh(async move {
            self.index.store().remove_subtree(folder_id).await?;
            info!(folder_id = %folder_id, "deleted folder subtree");
            Ok::<_, BookmarkError>(())
        })
        .await
    }

    async fn apply_bookmark(&self, decision: UpsertDecision) -> Result<BookmarkId, BookmarkError> {
        let store = self.index.store();
        match decision {
            UpsertDecision::Create {
                parent_id,
                title,
                url,
            } => {
                let created = store
                    .create(CreateDetails {
                        parent_id: Some(parent_id),
                        title,
                        url: Some(url),
                        index: None,
                    })
                    .await?;
                info!(bookmark_id = %created.id, "created bookmark");
                Ok(created.id)
            }
            UpsertDecision::MoveAndUpdate {
                existing_id,
                parent_id,
                title,
                url,
            } => {
                store
                    .move_node(
                        &existing_id,
                        MoveDestination {
                            parent_id: Some(parent_id.clone()),
                            index: None,
                        },
                    )
                    .await?;
                // No rollback of the move: the bookmark stays in its new folder.
                store
                    .update(
                        &existing_id,
                        UpdateChanges {
                            title: Some(title),
                            url: Some(url),
                        },
                    )
                    .await
                    .map_err(|source| BookmarkError::PartialFailure {
                        bookmark_id: existing_id.clone(),
                        parent_id,
                        source,
                    })?;
                info!(bookmark_id = %existing_id, "moved and updated bookmark");
                Ok(existing_id)
            }
        }
    }

    async fn apply_folder(&self, decision: FolderDecision) -> Result<BookmarkId, BookmarkError> {
        let store = self.index.store();
        match decision {
            FolderDecision::Create { parent_id, title } => {
                let created = store
                    .create(CreateDetails {
                        parent_id,
                        title,
                        url: None,
                        index: None,
                    })
                    .await?;
                info!(folder_id = %created.id, "created folder");
                Ok(created.id)
            }
            FolderDecision::Rename { folder_id, title } => {
                store
                    .update(
                        &folder_id,
                        UpdateChanges {
                            title: Some(title),
                            url: None,
                        },
                    )
                    .await?;
                info!(folder_id = %folder_id, "renamed folder");
                Ok(folder_id)
            }
        }
    }

    /// Run `workflow`, then rebuild the index whatever its outcome.
    ///
    /// The workflow's result is returned as-is. A failed trailing rebuild is
    /// logged and leaves the previous snapshot in effect.
    async fn with_refresh<T, F>(&self, workflow: F) -> Result<T, BookmarkError>
    where
        F: Future<Output = Result<T, BookmarkError>>,
    {
        let result = workflow.await;
        if let Err(err) = self.index.rebuild_index().await {
            warn!(error = %err, "index refresh after workflow failed");
        }
        result
    }
}
