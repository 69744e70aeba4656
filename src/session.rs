//! Popup Session
//!
//! Workflow layer driven by the UI: form state (url, title, folder title),
//! the currently selected folder, and one method per user action. Every
//! action catches its own errors and reports an `Outcome` for the progress
//! indicator instead of returning them.

use crate::error::BookmarkError;
use crate::index::{ChildRef, IndexedNode};
use crate::sync::SyncCoordinator;
use crate::tab::TabSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default cap on folder search results shown to the user
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Result of a user action, as shown by the progress indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    /// Nothing to do; neither success nor failure is shown
    Skipped(String),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    fn from_result<T>(action: &str, result: Result<T, BookmarkError>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(err) => {
                error!(action, error = %err, "workflow failed");
                Outcome::Failure(err.to_string())
            }
        }
    }
}

/// State behind one popup instance
pub struct PopupSession {
    coordinator: Arc<SyncCoordinator>,
    max_results: usize,
    url: String,
    title: String,
    folder_title: String,
    folder: Option<IndexedNode>,
}

impl PopupSession {
    pub fn new(coordinator: Arc<SyncCoordinator>, max_results: usize) -> Self {
        Self {
            coordinator,
            max_results,
            url: String::new(),
            title: String::new(),
            folder_title: String::new(),
            folder: None,
        }
    }

    /// Prefill the form from the active tab.
    ///
    /// When the tab's url is already bookmarked, its folder becomes the
    /// selected folder. Errors here are returned: there is no form to show yet.
    pub async fn open(&mut self, tabs: &dyn TabSource) -> Result<(), BookmarkError> {
        let tab = tabs.current_tab().await?;
        self.url = tab.url;
        self.title = tab.title;

        let snapshot = self.coordinator.index().rebuild_index().await?;
        if let Some(bookmark) = snapshot.find_bookmark_by_url(&self.url) {
            if let Some(folder) = snapshot.parent_folder_of(bookmark) {
                info!(folder_id = %folder.id, "tab already bookmarked");
                self.folder_title = folder.title.clone();
                self.folder = Some(folder.clone());
            }
        }
        Ok(())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn folder_title(&self) -> &str {
        &self.folder_title
    }

    pub fn set_folder_title(&mut self, title: impl Into<String>) {
        self.folder_title = title.into();
    }

    pub fn folder(&self) -> Option<&IndexedNode> {
        self.folder.as_ref()
    }

    /// Folders matching `text`, capped at the configured result count.
    ///
    /// Typing into the search box deselects the current folder, and the
    /// index is refreshed afterwards for the next keystroke.
    pub async fn search(&mut self, text: &str) -> Vec<IndexedNode> {
        let mut results = self.coordinator.index().search_folders_by_title(text);
        results.truncate(self.max_results);
        self.folder = None;
        if let Err(err) = self.coordinator.index().rebuild_index().await {
            warn!(error = %err, "index refresh after search failed");
        }
        results
    }

    /// Make `folder` the current folder, as when a search result is picked
    pub fn select_folder(&mut self, folder: IndexedNode) {
        self.folder_title = folder.title.clone();
        self.folder = Some(folder);
        self.sync_folder();
    }

    /// Bookmarks directly inside the current folder
    pub fn folder_contents(&self) -> Vec<ChildRef> {
        match &self.folder {
            Some(folder) => self.coordinator.index().folder_bookmarks(&folder.id),
            None => Vec::new(),
        }
    }

    /// File the form's url and title into the current folder
    pub async fn upsert_bookmark(&mut self) -> Outcome {
        let result = match &self.folder {
            Some(folder) => self
                .coordinator
                .upsert_bookmark(&self.url, &self.title, &folder.id)
                .await,
            None => Err(BookmarkError::NotFound("no folder selected".to_string())),
        };
        self.sync_folder();
        Outcome::from_result("upsert_bookmark", result)
    }

    /// Remove the bookmark for the form's url, if there is one
    pub async fn delete_bookmark(&mut self) -> Outcome {
        let result = self.coordinator.delete_bookmark(&self.url).await;
        self.sync_folder();
        match result {
            Ok(None) => Outcome::Skipped(format!("no bookmark for {}", self.url)),
            other => Outcome::from_result("delete_bookmark", other),
        }
    }

    /// Remove the current folder with everything in it
    pub async fn delete_folder(&mut self) -> Outcome {
        let result = match &self.folder {
            Some(folder) => self.coordinator.delete_folder(&folder.id).await,
            None => Err(BookmarkError::NotFound("no folder selected".to_string())),
        };
        self.sync_folder();
        Outcome::from_result("delete_folder", result)
    }

    /// Rename the current folder to the folder title, or create a folder
    /// with that title when none is selected
    pub async fn upsert_folder(&mut self) -> Outcome {
        if self.folder_title.is_empty() {
            return Outcome::Skipped("folder title is empty".to_string());
        }
        let result = self
            .coordinator
            .upsert_folder(&self.folder_title, self.folder.as_ref())
            .await;
        if let Ok(folder_id) = &result {
            if self.folder.is_none() {
                self.folder = self
                    .coordinator
                    .index()
                    .search_folder_by_id(folder_id)
                    .into_iter()
                    .next();
            }
        }
        self.sync_folder();
        Outcome::from_result("upsert_folder", result)
    }

    /// Re-read the current folder from the latest snapshot; it is dropped
    /// when it no longer exists.
    fn sync_folder(&mut self) {
        if let Some(folder) = &self.folder {
            self.folder = self
                .coordinator
                .index()
                .search_folder_by_id(&folder.id)
                .into_iter()
                .next();
        }
    }
}
