//! Core types shared across the bookmark index and sync layers.

/// BookmarkId: host-assigned identifier of a bookmark or folder, stable until deletion
pub type BookmarkId = String;

/// Id of the root node of the host tree
pub const ROOT_ID: &str = "0";

/// Id of the permanent "Bookmarks bar" container
pub const BOOKMARKS_BAR_ID: &str = "1";

/// Id of the permanent "Other bookmarks" container
pub const OTHER_BOOKMARKS_ID: &str = "2";

/// Id of the permanent "Mobile bookmarks" container
pub const MOBILE_BOOKMARKS_ID: &str = "3";
