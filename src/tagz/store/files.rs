//! The file store: one row per tracked path, unique on `(directory, name)`.
//!
//! Metadata (`size`, `mod_time`, `is_dir`) is read from the filesystem once,
//! when the row is inserted, and never refreshed.

use crate::error::{is_unique_violation, Result, TagzError};
use crate::fs::FileSystem;
use crate::model::{FileColumn, FileRecord, FileRow, FileValue};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

const RECORD_COLUMNS: &str = "id, directory, name, size, mod_time, is_dir";

/// Stats `directory/name` and inserts it.
///
/// Fails with `NotFound` if the path does not exist and with `DuplicateKey`
/// if the pair is already tracked.
pub fn add_file<F: FileSystem + ?Sized>(
    conn: &Connection,
    fs: &F,
    directory: &str,
    name: &str,
) -> Result<()> {
    let path = Path::new(directory).join(name);
    let stat = fs.stat(&path)?;
    debug!("-> add_file <{}> ({} bytes)", path.display(), stat.size);
    conn.execute(
        "INSERT INTO files (directory, name, size, mod_time, is_dir)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![directory, name, stat.size, stat.mod_time, stat.is_dir],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            TagzError::DuplicateKey(format!("file '{}'", path.display()))
        } else {
            TagzError::Database(e)
        }
    })?;
    Ok(())
}

/// Projects the requested columns of one file, in the requested order.
/// An empty column list selects every column.
pub fn get_file(
    conn: &Connection,
    directory: &str,
    name: &str,
    columns: &[FileColumn],
) -> Result<Option<FileRow>> {
    let columns: &[FileColumn] = if columns.is_empty() {
        &FileColumn::ALL
    } else {
        columns
    };
    let select = columns
        .iter()
        .map(|c| c.as_sql())
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM files WHERE directory = ?1 AND name = ?2 LIMIT 1",
        select
    );

    let row = conn
        .query_row(&sql, params![directory, name], |row| {
            let mut values = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = match column {
                    FileColumn::Id => FileValue::Id(row.get(i)?),
                    FileColumn::Directory => FileValue::Directory(row.get(i)?),
                    FileColumn::Name => FileValue::Name(row.get(i)?),
                    FileColumn::Size => FileValue::Size(row.get(i)?),
                    FileColumn::ModTime => FileValue::ModTime(row.get(i)?),
                    FileColumn::IsDir => FileValue::IsDir(row.get(i)?),
                };
                values.push((*column, value));
            }
            Ok(FileRow { values })
        })
        .optional()?;
    Ok(row)
}

pub fn get_file_record(
    conn: &Connection,
    directory: &str,
    name: &str,
) -> Result<Option<FileRecord>> {
    let record = conn
        .query_row(
            &format!(
                "SELECT {} FROM files WHERE directory = ?1 AND name = ?2 LIMIT 1",
                RECORD_COLUMNS
            ),
            params![directory, name],
            record_from_row,
        )
        .optional()?;
    Ok(record)
}

/// Idempotent insert. An already tracked file is returned as stored, without
/// touching the filesystem; a new one must exist on disk.
pub fn get_or_add_file<F: FileSystem + ?Sized>(
    conn: &Connection,
    fs: &F,
    directory: &str,
    name: &str,
) -> Result<FileRecord> {
    if let Some(record) = get_file_record(conn, directory, name)? {
        return Ok(record);
    }
    match add_file(conn, fs, directory, name) {
        Ok(()) => {}
        Err(TagzError::DuplicateKey(_)) => {}
        Err(e) => return Err(e),
    }
    get_file_record(conn, directory, name)?.ok_or_else(|| {
        TagzError::Api(format!(
            "file {} vanished after insert",
            Path::new(directory).join(name).display()
        ))
    })
}

/// Deletes by natural key. Deleting a missing file is not an error.
pub fn delete_file(conn: &Connection, directory: &str, name: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM files WHERE directory = ?1 AND name = ?2",
        params![directory, name],
    )?;
    debug!("-> delete_file <{}/{}> ({} row)", directory, name, n);
    Ok(())
}

pub fn list_files(conn: &Connection) -> Result<Vec<FileRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM files ORDER BY directory, name",
        RECORD_COLUMNS
    ))?;
    let rows = stmt.query_map([], record_from_row)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    Ok(FileRecord {
        id: row.get(0)?,
        directory: row.get(1)?,
        name: row.get(2)?,
        size: row.get(3)?,
        mod_time: row.get(4)?,
        is_dir: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{LocalFs, MemFs};
    use crate::store::Database;
    use std::fs;
    use tempfile::TempDir;

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM files", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_add_file_captures_metadata() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "12345").unwrap();
        let dir = temp.path().to_str().unwrap();
        let db = Database::open_in_memory().unwrap();

        add_file(db.conn(), &LocalFs, dir, "a.txt").unwrap();

        let record = get_file_record(db.conn(), dir, "a.txt").unwrap().unwrap();
        assert_eq!(record.size, 5);
        assert!(!record.is_dir);
        assert_eq!(record.name, "a.txt");
    }

    #[test]
    fn test_add_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let dir = temp.path().to_str().unwrap();
        let db = Database::open_in_memory().unwrap();

        add_file(db.conn(), &LocalFs, dir, "sub").unwrap();
        let record = get_file_record(db.conn(), dir, "sub").unwrap().unwrap();
        assert!(record.is_dir);
    }

    #[test]
    fn test_add_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_str().unwrap();
        let db = Database::open_in_memory().unwrap();

        let err = add_file(db.conn(), &LocalFs, dir, "ghost.txt").unwrap_err();
        assert!(matches!(err, TagzError::NotFound(_)));
        assert_eq!(count(db.conn()), 0);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let mem = MemFs::new().with_file("/docs/a.txt", 3);
        let db = Database::open_in_memory().unwrap();
        add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();
        let err = add_file(db.conn(), &mem, "/docs", "a.txt").unwrap_err();
        assert!(matches!(err, TagzError::DuplicateKey(_)));
        assert_eq!(count(db.conn()), 1);
    }

    #[test]
    fn test_get_or_add_twice_same_identity() {
        let mem = MemFs::new().with_file("/docs/a.txt", 3);
        let db = Database::open_in_memory().unwrap();

        let first = get_or_add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();
        let second = get_or_add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();
        assert_eq!(first, second);
        assert_eq!(count(db.conn()), 1);
    }

    #[test]
    fn test_get_or_add_missing_propagates_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = get_or_add_file(db.conn(), &MemFs::new(), "/docs", "a.txt").unwrap_err();
        assert!(matches!(err, TagzError::NotFound(_)));
    }

    #[test]
    fn test_get_file_projection_order() {
        let mem = MemFs::new().with_file("/docs/a.txt", 42);
        let db = Database::open_in_memory().unwrap();
        add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();

        let row = get_file(
            db.conn(),
            "/docs",
            "a.txt",
            &[FileColumn::Size, FileColumn::Name],
        )
        .unwrap()
        .unwrap();
        assert_eq!(row.values.len(), 2);
        assert_eq!(row.values[0], (FileColumn::Size, FileValue::Size(42)));
        assert_eq!(
            row.get(FileColumn::Name),
            Some(&FileValue::Name("a.txt".to_string()))
        );
        assert!(row.get(FileColumn::Id).is_none());
    }

    #[test]
    fn test_get_file_all_columns() {
        let mem = MemFs::new().with_file("/docs/a.txt", 1);
        let db = Database::open_in_memory().unwrap();
        add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();

        let row = get_file(db.conn(), "/docs", "a.txt", &[]).unwrap().unwrap();
        assert_eq!(row.values.len(), FileColumn::ALL.len());
        assert!(row.id().is_some());
        assert!(get_file(db.conn(), "/docs", "b.txt", &[]).unwrap().is_none());
    }

    #[test]
    fn test_get_file_with_unknown_column_name() {
        let err = FileColumn::parse_list(&["directory", "owner"]).unwrap_err();
        assert!(matches!(err, TagzError::InvalidColumn(c) if c == "owner"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mem = MemFs::new().with_file("/docs/a.txt", 1);
        let db = Database::open_in_memory().unwrap();
        add_file(db.conn(), &mem, "/docs", "a.txt").unwrap();
        delete_file(db.conn(), "/docs", "a.txt").unwrap();
        delete_file(db.conn(), "/docs", "a.txt").unwrap();
        assert_eq!(count(db.conn()), 0);
    }
}
