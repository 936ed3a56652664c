use crate::commands::{CmdMessage, CmdResult, FileTags};
use crate::error::Result;
use crate::filetags;
use crate::store::files;
use rusqlite::Connection;

/// Every tracked file with its tags, ordered by path.
pub fn run(conn: &Connection) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let records = files::list_files(conn)?;
    if records.is_empty() {
        result.add_message(CmdMessage::info("No tagged files"));
        return Ok(result);
    }

    let mut listed = Vec::with_capacity(records.len());
    for record in records {
        let file = record.file_ref();
        let tags = filetags::tags_of_file(conn, &file)?;
        listed.push(FileTags { file, tags });
    }
    Ok(result.with_listed_files(listed))
}
