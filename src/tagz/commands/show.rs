use crate::commands::{CmdMessage, CmdResult, FileTags};
use crate::error::Result;
use crate::filetags;
use crate::model::{FileRef, Tag};
use crate::store::tags;
use rusqlite::Connection;
use std::collections::BTreeSet;

/// Tags of each file. With no files, every tag in the database.
pub fn show_tags(conn: &Connection, files: &[FileRef]) -> Result<CmdResult> {
    if files.is_empty() {
        let all = tags::list_tags(conn)?;
        let mut result = CmdResult::default();
        if all.is_empty() {
            result.add_message(CmdMessage::info("No tags yet"));
        }
        return Ok(result.with_listed_tags(all));
    }

    let mut listed = Vec::with_capacity(files.len());
    for file in files {
        listed.push(FileTags {
            file: file.clone(),
            tags: filetags::tags_of_file(conn, file)?,
        });
    }
    Ok(CmdResult::default().with_listed_files(listed))
}

/// Files carrying every one of `tags`.
pub fn show_files(conn: &Connection, tags: &[Tag]) -> Result<CmdResult> {
    let mut matching: Option<BTreeSet<FileRef>> = None;
    for tag in tags {
        let found: BTreeSet<FileRef> = filetags::files_of_tag(conn, tag)?.into_iter().collect();
        matching = Some(match matching {
            None => found,
            Some(prev) => prev.intersection(&found).cloned().collect(),
        });
    }

    let mut listed = Vec::new();
    for file in matching.unwrap_or_default() {
        let tags = filetags::tags_of_file(conn, &file)?;
        listed.push(FileTags { file, tags });
    }
    Ok(CmdResult::default().with_listed_files(listed))
}
