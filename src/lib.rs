//! Tabfile: bookmark index and synchronization
//!
//! Keeps a derived, queryable snapshot of the host bookmark tree and uses it
//! to decide whether a url becomes a new bookmark or moves an existing one.

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod session;
pub mod store;
pub mod sync;
pub mod tab;
pub mod tooling;
pub mod tree;
pub mod types;
