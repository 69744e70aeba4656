//! Bookmark Index
//!
//! Derived, queryable copy of the host bookmark tree. The index is a cache:
//! it is rebuilt in full from the store and never written back.

pub mod builder;
pub mod query;
pub mod service;
pub mod snapshot;

pub use service::IndexService;
pub use snapshot::{ChildRef, IndexedNode, Snapshot};
