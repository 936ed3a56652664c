//! The tag store: rows of `(key, value)`, unique together.

use crate::error::{is_unique_violation, Result, TagzError};
use crate::model::Tag;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Inserts a new tag. Fails with `DuplicateKey` if the pair already exists
/// and with `InvalidTag` if `value` is empty.
pub fn add_tag(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let tag = Tag::new(key, value)?;
    debug!("-> add_tag <{}:{}>", tag.key, tag.value);
    conn.execute(
        "INSERT INTO tags (key, value) VALUES (?1, ?2)",
        params![tag.key, tag.value],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            TagzError::DuplicateKey(format!("tag '{}'", tag))
        } else {
            TagzError::Database(e)
        }
    })?;
    Ok(())
}

pub fn tag_exists(conn: &Connection, key: &str, value: &str) -> Result<bool> {
    Ok(tag_id(conn, key, value)?.is_some())
}

pub fn tag_id(conn: &Connection, key: &str, value: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM tags WHERE key = ?1 AND value = ?2 LIMIT 1",
            params![key, value],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Idempotent insert: an existing pair is returned unchanged.
pub fn get_or_add_tag(conn: &Connection, key: &str, value: &str) -> Result<Tag> {
    match add_tag(conn, key, value) {
        Ok(()) => {}
        Err(TagzError::DuplicateKey(_)) => debug!("tag <{}:{}> already exists", key, value),
        Err(e) => return Err(e),
    }
    Tag::new(key, value)
}

/// Deletes by natural key. Deleting a missing tag is not an error.
pub fn delete_tag(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM tags WHERE key = ?1 AND value = ?2",
        params![key, value],
    )?;
    debug!("-> delete_tag <{}:{}> ({} row)", key, value, n);
    Ok(())
}

/// Every tag, bare labels first, then by key and value.
pub fn list_tags(conn: &Connection) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare("SELECT key, value FROM tags ORDER BY key, value")?;
    let rows = stmt.query_map([], |row| {
        Ok(Tag {
            key: row.get(0)?,
            value: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}
