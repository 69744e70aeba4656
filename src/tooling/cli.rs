//! CLI Tooling
//!
//! Command-line driver for the popup workflows: every command opens a
//! session against the configured bookmark file, runs one action and
//! prints the result.

use super::format::{format_folder_contents, format_folder_results, format_outcome, format_tree};
use crate::config::{ConfigLoader, TabfileConfig};
use crate::error::BookmarkError;
use crate::index::{IndexService, IndexedNode};
use crate::logging::init_logging;
use crate::session::PopupSession;
use crate::store::{BookmarkStore, JsonFileBookmarkStore};
use crate::sync::SyncCoordinator;
use crate::tab::{StaticTabSource, TabInfo};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// tabfile - file the current tab into your bookmark folders
#[derive(Parser)]
#[command(name = "tabfile")]
#[command(about = "File the current browser tab into a bookmark folder hierarchy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bookmark file (overrides store.path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the whole bookmark tree
    Tree,
    /// Search folders by title
    Search {
        text: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the bookmarks inside a folder
    Folder { id: String },
    /// Show what the popup would prefill for a tab
    Open {
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Create a bookmark, or move and retitle the one with the same url
    Upsert {
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "")]
        title: String,
        /// Target folder id
        #[arg(long)]
        folder: String,
    },
    /// Rename a folder, or create one when no folder is given
    UpsertFolder {
        #[arg(long)]
        title: String,
        /// Folder to rename
        #[arg(long)]
        folder: Option<String>,
    },
    /// Delete the bookmark with this url
    DeleteBookmark {
        #[arg(long)]
        url: String,
    },
    /// Delete a folder and everything in it
    DeleteFolder {
        #[arg(long)]
        folder: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Text to print and whether the command succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Configuration plus the services a command runs against
pub struct CliContext {
    config: TabfileConfig,
    coordinator: Arc<SyncCoordinator>,
}

impl CliContext {
    /// Load configuration, install logging, and open the bookmark file
    pub fn new(cli: &Cli) -> Result<Self, BookmarkError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(store) = &cli.store {
            config.store.path = Some(store.clone());
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        init_logging(Some(&config.logging))?;

        let store = JsonFileBookmarkStore::open(config.store.resolved_path()?)?;
        info!(path = %store.path().display(), "opened bookmark file");
        Ok(Self::from_parts(config, Arc::new(store)))
    }

    /// Build a context over an already-open store
    pub fn from_parts(config: TabfileConfig, store: Arc<dyn BookmarkStore>) -> Self {
        let index = Arc::new(IndexService::new(store));
        let coordinator = SyncCoordinator::new(index)
            .with_folder_parent(config.folders.default_parent.clone());
        Self {
            config,
            coordinator: Arc::new(coordinator),
        }
    }

    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, BookmarkError> {
        match command {
            Commands::Tree => {
                let snapshot = self.coordinator.index().rebuild_index().await?;
                Ok(CommandOutput::ok(format_tree(&snapshot)))
            }
            Commands::Search { text, format } => {
                let mut session = self.session().await?;
                let results = session.search(text).await;
                let text = match format.as_str() {
                    "json" => serde_json::to_string_pretty(&results).map_err(|e| {
                        BookmarkError::InvalidInput(format!("Failed to render results: {}", e))
                    })?,
                    "text" => {
                        format_folder_results(&results, &self.coordinator.index().snapshot())
                    }
                    other => {
                        return Err(BookmarkError::InvalidInput(format!(
                            "Invalid format: {} (must be 'text' or 'json')",
                            other
                        )))
                    }
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Folder { id } => {
                let mut session = self.session().await?;
                let folder = self.lookup_folder(id)?;
                session.select_folder(folder.clone());
                Ok(CommandOutput::ok(format_folder_contents(
                    &folder,
                    &session.folder_contents(),
                )))
            }
            Commands::Open { url, title } => {
                let mut session = self.new_session();
                let tab = StaticTabSource::new(TabInfo {
                    url: url.clone(),
                    title: title.clone(),
                    fav_icon_url: None,
                });
                session.open(&tab).await?;
                let mut text = format!("Url:    {}\nTitle:  {}\n", session.url(), session.title());
                match session.folder() {
                    Some(folder) => {
                        text.push_str(&format!("Folder: {} [{}]\n\n", folder.title, folder.id));
                        text.push_str(&format_folder_contents(folder, &session.folder_contents()));
                    }
                    None => text.push_str("Folder: (none)\n"),
                }
                Ok(CommandOutput::ok(text))
            }
            Commands::Upsert { url, title, folder } => {
                let mut session = self.session().await?;
                session.set_url(url.clone());
                session.set_title(title.clone());
                session.select_folder(self.lookup_folder(folder)?);
                let outcome = session.upsert_bookmark().await;
                Ok(CommandOutput {
                    success: !matches!(outcome, crate::session::Outcome::Failure(_)),
                    text: format_outcome(&outcome, &format!("filed {} into folder {}", url, folder)),
                })
            }
            Commands::UpsertFolder { title, folder } => {
                let mut session = self.session().await?;
                if let Some(id) = folder {
                    session.select_folder(self.lookup_folder(id)?);
                }
                session.set_folder_title(title.clone());
                let outcome = session.upsert_folder().await;
                let message = match session.folder() {
                    Some(folder) => format!("folder {} is now \"{}\"", folder.id, folder.title),
                    None => format!("folder \"{}\"", title),
                };
                Ok(CommandOutput {
                    success: !matches!(outcome, crate::session::Outcome::Failure(_)),
                    text: format_outcome(&outcome, &message),
                })
            }
            Commands::DeleteBookmark { url } => {
                let mut session = self.session().await?;
                session.set_url(url.clone());
                let outcome = session.delete_bookmark().await;
                Ok(CommandOutput {
                    success: !matches!(outcome, crate::session::Outcome::Failure(_)),
                    text: format_outcome(&outcome, &format!("deleted bookmark {}", url)),
                })
            }
            Commands::DeleteFolder { folder } => {
                let mut session = self.session().await?;
                session.select_folder(self.lookup_folder(folder)?);
                let outcome = session.delete_folder().await;
                Ok(CommandOutput {
                    success: !matches!(outcome, crate::session::Outcome::Failure(_)),
                    text: format_outcome(&outcome, &format!("deleted folder {}", folder)),
                })
            }
            Commands::Config => {
                let text = toml::to_string_pretty(&self.config).map_err(|e| {
                    BookmarkError::ConfigError(format!("Failed to render config: {}", e))
                })?;
                Ok(CommandOutput::ok(text))
            }
        }
    }

    fn new_session(&self) -> PopupSession {
        PopupSession::new(self.coordinator.clone(), self.config.search.max_results)
    }

    /// A session over a freshly built index
    async fn session(&self) -> Result<PopupSession, BookmarkError> {
        self.coordinator.index().rebuild_index().await?;
        Ok(self.new_session())
    }

    /// Resolve a folder id in the current snapshot; bookmarks are refused
    fn lookup_folder(&self, id: &str) -> Result<IndexedNode, BookmarkError> {
        let folder = self
            .coordinator
            .index()
            .search_folder_by_id(id)
            .into_iter()
            .next()
            .ok_or_else(|| BookmarkError::NotFound(format!("folder {}", id)))?;
        if !folder.is_folder() {
            return Err(BookmarkError::InvalidInput(format!(
                "{} is a bookmark, not a folder",
                id
            )));
        }
        Ok(folder)
    }
}
