//! # Storage Layer
//!
//! Tags, files and the relation between them live in one SQLite file.
//! [`Database`] owns the connection; every higher layer borrows it, so there is
//! no process-wide handle and the connection's lifetime is exactly that of the
//! value the CLI opens.
//!
//! ## Schema
//!
//! ```text
//! files(id PK, directory, name, size, mod_time, is_dir)   UNIQUE(directory, name)
//! tags(id PK, key DEFAULT '', value)                      UNIQUE(key, value)
//! filetag_junction(file_id -> files.id, tag_id -> tags.id) PK(file_id, tag_id)
//! ```
//!
//! The table and column names are kept as-is so existing databases open
//! unchanged.
//!
//! ## Modules
//!
//! - [`tags`]: the tag store (insert, exists, get-or-add, delete)
//! - [`files`]: the file store (insert with metadata capture, projections, delete)
//!
//! Neither store knows about the junction table. Only [`crate::filetags`] touches it.
//!
//! ## Transactions
//!
//! Store functions take a plain `&Connection`. A `rusqlite::Transaction` derefs
//! to one, so the API layer opens a transaction with [`Database::transaction`],
//! runs a whole operation through it and commits at the end. Dropping the
//! transaction on any error path rolls everything back.

use crate::error::{Result, TagzError};
use rusqlite::{Connection, Transaction};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod files;
pub mod tags;

const SCHEMA: &str = "
CREATE TABLE files (
    id integer PRIMARY KEY,
    directory text NOT NULL,
    name text NOT NULL,
    size integer,
    mod_time timestamp,
    is_dir boolean,
    CONSTRAINT path UNIQUE (directory, name)
);

CREATE TABLE tags (
    id integer PRIMARY KEY,
    key text DEFAULT '' NOT NULL,
    value text NOT NULL,
    CONSTRAINT tag_pk UNIQUE (key, value)
);

CREATE TABLE filetag_junction (
    file_id int, tag_id int,
    CONSTRAINT file_tag_pk PRIMARY KEY (file_id, tag_id),
    CONSTRAINT FK_files
    FOREIGN KEY (file_id) REFERENCES files (id),
    CONSTRAINT FK_tags
    FOREIGN KEY (tag_id) REFERENCES tags (id)
);";

const DROP_TABLES: &str = "
DROP TABLE IF EXISTS filetag_junction;
DROP TABLE IF EXISTS files;
DROP TABLE IF EXISTS tags;";

const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Row counts, for `tagz info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub files: usize,
    pub tags: usize,
    pub associations: usize,
}

pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens an existing, initialized database.
    ///
    /// Fails with `NoDatabase` if the file is missing or has no schema, rather
    /// than silently creating an empty one.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TagzError::NoDatabase(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;
        if !has_schema(&conn)? {
            return Err(TagzError::NoDatabase(path.to_path_buf()));
        }
        debug!("Opened database at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates the database file and its tables.
    ///
    /// With `force`, existing tables are dropped first and all tags are lost.
    pub fn create(path: &Path, force: bool) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;

        if has_schema(&conn)? {
            if !force {
                return Err(TagzError::AlreadyInitialized(path.to_path_buf()));
            }
            info!("Recreating database at {}", path.display());
            conn.execute_batch(DROP_TABLES)?;
        }
        conn.execute_batch(SCHEMA)?;
        info!("Initialized database at {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// A private, initialized database that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure_connection(&conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let count = |table: &str| -> Result<usize> {
            // rusqlite range-checks the i64 count into usize
            let n: usize = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };
        Ok(StoreStats {
            files: count("files")?,
            tags: count("tags")?,
            associations: count("filetag_junction")?,
        })
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| TagzError::Database(e))
    }
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys=ON;\n\
         PRAGMA busy_timeout={};",
        BUSY_TIMEOUT_MS
    ))?;
    Ok(())
}

fn has_schema(conn: &Connection) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('files', 'tags', 'filetag_junction')",
        [],
        |row| row.get(0),
    )?;
    Ok(n == 3)
}
