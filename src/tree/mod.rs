//! Host bookmark tree types

pub mod node;

pub use node::BookmarkNode;
