//! # Configuration
//!
//! Loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `TAGZ_DB_NAME`, `TAGZ_LOG`
//! 2. **User config file**: `tagz.toml` in the OS config directory
//!    (located with the `directories` crate)
//! 3. **Compiled defaults**: `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `db_name` | `.tagz.db` | File name looked for when discovering the database |
//! | `log` | `warn` | Log filter, in `tracing_subscriber::EnvFilter` syntax |

use crate::error::{Result, TagzError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "tagz.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagzConfig {
    /// Database file name, searched for in the working directory and its ancestors
    #[config(env = "TAGZ_DB_NAME", default = ".tagz.db")]
    pub db_name: String,

    /// Log filter (e.g. "warn", "tagz=debug")
    #[config(env = "TAGZ_LOG", default = "warn")]
    pub log: String,
}

impl Default for TagzConfig {
    fn default() -> Self {
        Self {
            db_name: ".tagz.db".to_string(),
            log: "warn".to_string(),
        }
    }
}

impl TagzConfig {
    /// `<config_dir>/tagz/tagz.toml`, if the platform has a config directory.
    pub fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tagz").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::user_config_file().as_deref())
    }

    /// Environment first, then `file` if it exists, then defaults.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| TagzError::Config(e.to_string()))
    }
}
