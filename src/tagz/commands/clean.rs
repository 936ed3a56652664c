//! Drops entries for files that no longer exist on disk.
//!
//! Without `apply` this is a dry run that only lists what would go. A file
//! whose existence cannot be checked is kept and reported.

use crate::commands::{CmdMessage, CmdResult, FileTags};
use crate::error::Result;
use crate::filetags;
use crate::fs::FileSystem;
use crate::store::{files, Database};
use tracing::{info, warn};

pub fn run<F: FileSystem + ?Sized>(db: &mut Database, fs: &F, apply: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut stale = Vec::new();
    for record in files::list_files(db.conn())? {
        let file = record.file_ref();
        match fs.exists(&file.path()) {
            Ok(true) => {}
            Ok(false) => {
                let tags = filetags::tags_of_file(db.conn(), &file)?;
                stale.push(FileTags { file, tags });
            }
            Err(e) => {
                warn!("cannot check <{}>: {}", file, e);
                result.add_message(CmdMessage::error(format!(
                    "Cannot check {}, keeping it: {}",
                    file, e
                )));
            }
        }
    }

    if stale.is_empty() {
        result.add_message(CmdMessage::info("Nothing to clean"));
        return Ok(result);
    }

    if !apply {
        for entry in &stale {
            result.add_message(CmdMessage::info(format!("Would remove {}", entry.file)));
        }
        result.add_message(CmdMessage::warning("Dry run, pass --yes to remove"));
        return Ok(result.with_listed_files(stale));
    }

    for entry in &stale {
        let tx = db.transaction()?;
        filetags::forget_file(&tx, &entry.file)?;
        tx.commit()?;
        info!("removed stale entry <{}>", entry.file);
        result.add_message(CmdMessage::success(format!("Removed {}", entry.file)));
    }
    Ok(result.with_listed_files(stale))
}
