//! Tooling Layer
//!
//! Command-line driver and text formatting for the bookmark workflows.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, CommandOutput, Commands};
