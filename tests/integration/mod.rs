//! Integration tests for the bookmark index and sync workflows

mod deletion;
mod file_store_workflow;
mod rebuild_properties;
mod support;
mod upsert_workflow;
