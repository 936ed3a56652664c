//! Filesystem access for file metadata.
//!
//! The file store never calls `std::fs` directly; it asks a [`FileSystem`]
//! for `(size, mtime, is_dir)`. [`LocalFs`] is the real implementation,
//! [`MemFs`] a fixed table used in tests.
//!
//! [`FileSystem::exists`] only answers `false` when the path is really gone.
//! A path that cannot be inspected (permission denied and the like) is an
//! error, never "missing".

use crate::error::{Result, TagzError};
use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Metadata captured when a file is first tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub size: i64,
    pub mod_time: NaiveDateTime,
    pub is_dir: bool,
}

pub trait FileSystem {
    /// Returns the metadata for `path`, or `TagzError::NotFound` if it does not exist.
    fn stat(&self, path: &Path) -> Result<FileStat>;

    fn exists(&self, path: &Path) -> Result<bool> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(TagzError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> Result<FileStat> {
        let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TagzError::NotFound(path.to_path_buf()),
            _ => TagzError::Io(e),
        })?;
        let modified: DateTime<Local> = meta.modified()?.into();
        Ok(FileStat {
            size: i64::try_from(meta.len()).unwrap_or(i64::MAX),
            mod_time: modified.naive_local(),
            is_dir: meta.is_dir(),
        })
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        match std::fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TagzError::Io(e)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemFs {
    entries: HashMap<PathBuf, FileStat>,
    denied: HashSet<PathBuf>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, stat: FileStat) {
        self.entries.insert(path.into(), stat);
    }

    pub fn remove(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Makes `path` fail every lookup with a permission error.
    pub fn deny(&mut self, path: impl Into<PathBuf>) {
        self.denied.insert(path.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, size: i64) -> Self {
        let stat = FileStat {
            size,
            mod_time: Local::now().naive_local(),
            is_dir: false,
        };
        self.insert(path, stat);
        self
    }
}

impl FileSystem for MemFs {
    fn stat(&self, path: &Path) -> Result<FileStat> {
        if self.denied.contains(path) {
            return Err(TagzError::Io(io::Error::new(
                ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            )));
        }
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| TagzError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_local_stat_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "hello").unwrap();

        let stat = LocalFs.stat(&path).unwrap();
        assert_eq!(stat.size, 5);
        assert!(!stat.is_dir);
    }

    #[test]
    fn test_local_stat_dir() {
        let temp = TempDir::new().unwrap();
        let stat = LocalFs.stat(temp.path()).unwrap();
        assert!(stat.is_dir);
    }

    #[test]
    fn test_local_stat_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing");
        let err = LocalFs.stat(&path).unwrap_err();
        assert!(matches!(err, TagzError::NotFound(p) if p == path));
        assert!(!LocalFs.exists(&path).unwrap());
        assert!(LocalFs.exists(temp.path()).unwrap());
    }

    #[test]
    fn test_mem_fs() {
        let mut mem = MemFs::new().with_file("/docs/a.txt", 12);
        assert_eq!(mem.stat(Path::new("/docs/a.txt")).unwrap().size, 12);
        mem.remove(Path::new("/docs/a.txt"));
        assert!(!mem.exists(Path::new("/docs/a.txt")).unwrap());
    }

    #[test]
    fn test_unreadable_path_is_not_missing() {
        let mut mem = MemFs::new().with_file("/secret/a.txt", 1);
        mem.deny("/secret/a.txt");
        let err = mem.exists(Path::new("/secret/a.txt")).unwrap_err();
        assert!(matches!(err, TagzError::Io(e) if e.kind() == ErrorKind::PermissionDenied));
    }
}
