//! Config loading with the `config` crate.
//!
//! Precedence, lowest first: built-in defaults, global file
//! (`$XDG_CONFIG_HOME/tabfile/config.toml`), explicit file, environment
//! (`TABFILE__` prefix, `__` between nested keys).

use super::{paths, TabfileConfig};
use crate::error::BookmarkError;
use crate::session::DEFAULT_MAX_RESULTS;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global file, an optional explicit file, and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<TabfileConfig, BookmarkError> {
        let mut builder = Self::builder_with_defaults()?;

        if let Some(global) = paths::global_config_path() {
            debug!(path = %global.display(), "global config source");
            builder = builder.add_source(File::from(global).required(false));
        }
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(BookmarkError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Self::environment());

        Self::finish(builder)
    }

    /// Load from a single file plus the environment, ignoring the global file.
    pub fn load_from_file(path: &Path) -> Result<TabfileConfig, BookmarkError> {
        let builder = Self::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(Self::environment());
        Self::finish(builder)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, BookmarkError> {
        Ok(Config::builder().set_default("search.max_results", DEFAULT_MAX_RESULTS as u64)?)
    }

    fn environment() -> Environment {
        Environment::with_prefix("TABFILE")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<TabfileConfig, BookmarkError> {
        let config: TabfileConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
