use crate::api::TagzApi;
use crate::config::TagzConfig;
use crate::error::{Result, TagzError};
use crate::fs::LocalFs;
use crate::paths::normalize;
use crate::store::Database;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct TagzContext {
    pub api: TagzApi<LocalFs>,
    pub config: TagzConfig,
}

/// Walks up from `start` looking for a file called `db_name`.
/// Returns None if none is found before the filesystem root.
pub fn find_database(start: &Path, db_name: &str) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(db_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// The database an existing-database command should open: the explicit path
/// if one was given, otherwise the nearest one found by walking up.
pub fn locate_database(cwd: &Path, explicit: Option<&Path>, db_name: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(normalize(path, cwd));
    }
    find_database(cwd, db_name).ok_or_else(|| TagzError::NoDatabase(cwd.to_path_buf()))
}

/// Where `tagz init` creates the database: the explicit path, or `db_name` in `cwd`.
pub fn init_target(cwd: &Path, explicit: Option<&Path>, db_name: &str) -> PathBuf {
    match explicit {
        Some(path) => normalize(path, cwd),
        None => cwd.join(db_name),
    }
}

pub fn initialize(cwd: &Path, explicit: Option<&Path>, config: TagzConfig) -> Result<TagzContext> {
    let path = locate_database(cwd, explicit, &config.db_name)?;
    debug!("Using database {}", path.display());
    let db = Database::open(&path)?;
    let api = TagzApi::new(db, LocalFs, cwd.to_path_buf());
    Ok(TagzContext { api, config })
}
