//! Tab source
//!
//! Port to the host's tab-query service: the url and title of the active tab.

use crate::error::{BookmarkError, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The active tab as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

#[async_trait]
pub trait TabSource: Send + Sync {
    /// The active tab of the current window.
    ///
    /// Host failures are `HostUnavailable`; no active tab is `NotFound`.
    async fn current_tab(&self) -> Result<TabInfo, BookmarkError>;
}

/// Tab source that always reports the same tab, or none
#[derive(Debug, Clone, Default)]
pub struct StaticTabSource {
    tab: Option<TabInfo>,
    failure: Option<String>,
}

impl StaticTabSource {
    pub fn new(tab: TabInfo) -> Self {
        Self {
            tab: Some(tab),
            failure: None,
        }
    }

    /// A source with no active tab
    pub fn empty() -> Self {
        Self::default()
    }

    /// A source whose host query always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            tab: None,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl TabSource for StaticTabSource {
    async fn current_tab(&self) -> Result<TabInfo, BookmarkError> {
        if let Some(message) = &self.failure {
            return Err(StoreError::rejected(message.clone()).into());
        }
        self.tab
            .clone()
            .ok_or_else(|| BookmarkError::NotFound("current tab not found".to_string()))
    }
}
