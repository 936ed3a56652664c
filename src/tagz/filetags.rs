//! # Association Engine
//!
//! The only module that reads or writes `filetag_junction`. Everything here
//! works on natural keys ([`FileRef`] and [`Tag`]); row ids never leave SQL.
//!
//! Two layers of operations live here:
//!
//! - **Primitives**: [`relate`], [`unrelate`], [`tags_of_file`], [`files_of_tag`].
//!   They do not create or delete files and tags.
//! - **Composites**: [`tag_file`] and [`untag_file`]. They bring the endpoints
//!   into existence before relating and remove orphans after unrelating, so a
//!   file or tag row exists exactly as long as it has at least one association.
//!
//! All functions take a `&Connection` and never commit. The caller decides the
//! transaction boundary.

use crate::error::{is_unique_violation, Result, TagzError};
use crate::fs::FileSystem;
use crate::model::{FileRef, Tag};
use crate::store::{files, tags};
use rusqlite::{params, Connection};
use tracing::debug;

/// Inserts the association resolved by natural keys.
///
/// Neither endpoint is checked beforehand. If one is missing the join selects
/// nothing, no row is written and the call fails with `MissingEndpoint`.
pub fn relate(conn: &Connection, file: &FileRef, tag: &Tag) -> Result<()> {
    let inserted = conn
        .execute(
            "INSERT INTO filetag_junction (file_id, tag_id)
             SELECT F.id, T.id FROM files F, tags T
             WHERE F.directory = ?1 AND F.name = ?2 AND T.key = ?3 AND T.value = ?4",
            params![file.directory, file.name, tag.key, tag.value],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                TagzError::DuplicateAssociation {
                    file: file.to_string(),
                    tag: tag.to_string(),
                }
            } else {
                TagzError::Database(e)
            }
        })?;

    if inserted == 0 {
        return Err(TagzError::MissingEndpoint {
            file: file.to_string(),
            tag: tag.to_string(),
        });
    }
    debug!("-> relate <{}> <{}>", file, tag);
    Ok(())
}

/// Deletes the association if present.
pub fn unrelate(conn: &Connection, file: &FileRef, tag: &Tag) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM filetag_junction
         WHERE file_id = (SELECT id FROM files WHERE directory = ?1 AND name = ?2)
           AND tag_id = (SELECT id FROM tags WHERE key = ?3 AND value = ?4)",
        params![file.directory, file.name, tag.key, tag.value],
    )?;
    debug!("-> unrelate <{}> <{}> ({} row)", file, tag, n);
    Ok(())
}

/// Tags of a file in the order they were applied.
pub fn tags_of_file(conn: &Connection, file: &FileRef) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT T.key, T.value
         FROM filetag_junction J
         JOIN files F ON F.id = J.file_id
         JOIN tags T ON T.id = J.tag_id
         WHERE F.directory = ?1 AND F.name = ?2
         ORDER BY J.rowid",
    )?;
    let rows = stmt.query_map(params![file.directory, file.name], |row| {
        Ok(Tag {
            key: row.get(0)?,
            value: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Files carrying a tag, ordered by path.
pub fn files_of_tag(conn: &Connection, tag: &Tag) -> Result<Vec<FileRef>> {
    let mut stmt = conn.prepare(
        "SELECT F.directory, F.name
         FROM filetag_junction J
         JOIN files F ON F.id = J.file_id
         JOIN tags T ON T.id = J.tag_id
         WHERE T.key = ?1 AND T.value = ?2
         ORDER BY F.directory, F.name",
    )?;
    let rows = stmt.query_map(params![tag.key, tag.value], |row| {
        Ok(FileRef {
            directory: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn is_tagged(conn: &Connection, file: &FileRef, tag: &Tag) -> Result<bool> {
    Ok(tags_of_file(conn, file)?.contains(tag))
}

/// Makes sure `file` carries `tag`, creating either endpoint as needed.
///
/// An association that already exists is reported as `DuplicateAssociation`
/// even though the endpoints themselves are get-or-create.
pub fn tag_file<F: FileSystem + ?Sized>(
    conn: &Connection,
    fs: &F,
    file: &FileRef,
    tag: &Tag,
) -> Result<()> {
    files::get_or_add_file(conn, fs, &file.directory, &file.name)?;
    tags::get_or_add_tag(conn, &tag.key, &tag.value)?;
    relate(conn, file, tag)
}

/// Removes `tag` from `file`, then drops whichever endpoint became an orphan.
///
/// Fails with `NotTagged`, without touching anything, if the file does not
/// carry the tag.
pub fn untag_file(conn: &Connection, file: &FileRef, tag: &Tag) -> Result<()> {
    if !is_tagged(conn, file, tag)? {
        return Err(TagzError::NotTagged {
            file: file.to_string(),
            tag: tag.to_string(),
        });
    }
    unrelate(conn, file, tag)?;
    clean_orphans(conn, file, tag)
}

/// Deletes the tag if no file carries it and the file if it carries no tag.
/// The two checks are independent.
pub fn clean_orphans(conn: &Connection, file: &FileRef, tag: &Tag) -> Result<()> {
    if files_of_tag(conn, tag)?.is_empty() {
        debug!("tag <{}> is orphaned", tag);
        tags::delete_tag(conn, &tag.key, &tag.value)?;
    }
    if tags_of_file(conn, file)?.is_empty() {
        debug!("file <{}> is orphaned", file);
        files::delete_file(conn, &file.directory, &file.name)?;
    }
    Ok(())
}

/// Untags every tag of `file`, which removes the file itself and any tag left
/// without files. Returns the tags that were removed.
pub fn forget_file(conn: &Connection, file: &FileRef) -> Result<Vec<Tag>> {
    let tags = tags_of_file(conn, file)?;
    for tag in &tags {
        untag_file(conn, file, tag)?;
    }
    // a row with no associations would otherwise survive
    files::delete_file(conn, &file.directory, &file.name)?;
    Ok(tags)
}
