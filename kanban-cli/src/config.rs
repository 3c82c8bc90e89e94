//! Configuration for the kanban CLI using Figment
//!
//! Sources are merged in order, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `kanban.toml` in the working directory
//! 3. `<config dir>/kanban/config.toml`
//! 4. `KANBAN_*` environment variables
//!
//! `--data-dir` on the command line wins over all of them.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use kanban_engine::types::DEFAULT_CATEGORY;
use kanban_engine::ActivityLog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "kanban.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "KANBAN_";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: figment::Error },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError { source: error }
    }
}

/// Settings for a CLI run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Where `kanban-boards.json` and `kanban-tags.json` live
    pub data_dir: PathBuf,
    /// How many activity entries to keep in memory
    pub activity_limit: usize,
    /// Category given to new boards that do not name one
    pub default_category: String,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            activity_limit: ActivityLog::DEFAULT_LIMIT,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("kanban"))
        .unwrap_or_else(|| PathBuf::from(".kanban"))
}

impl KanbanConfig {
    /// Load configuration from the standard locations
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Replace the data directory when one was given on the command line
    pub fn with_data_dir(mut self, data_dir: Option<&Path>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir.to_path_buf();
        }
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.activity_limit == 0 {
            return Err(ConfigError::ValidationError {
                message: "activity_limit must be at least 1".to_string(),
            });
        }
        if self.default_category.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "default_category must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}

/// Builds the layered figment for [`KanbanConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    project_file: Option<PathBuf>,
    user_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            project_file: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            user_file: dirs::config_dir().map(|dir| dir.join("kanban").join("config.toml")),
        }
    }

    /// Use a specific project file instead of `./kanban.toml`
    pub fn with_project_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_file = Some(path.into());
        self
    }

    /// Use a specific user file instead of the one under the config dir
    pub fn with_user_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<KanbanConfig, ConfigError> {
        let config: KanbanConfig = self.build_figment().extract()?;
        debug!(data_dir = %config.data_dir.display(), "loaded configuration");
        config.validate()
    }

    fn build_figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(KanbanConfig::default()));

        // Missing files are skipped by the Toml provider
        for path in [&self.project_file, &self.user_file].into_iter().flatten() {
            trace!("Loading config file: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
