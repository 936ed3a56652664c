//! Folds one tag into another.
//!
//! Every file carrying `secondary` ends up carrying `primary` instead, and
//! `secondary` disappears with its last association. The merge is one
//! transaction: if any file fails, nothing is merged.

use crate::commands::{CmdMessage, CmdResult, TagOutcome};
use crate::error::{Result, TagzError};
use crate::filetags;
use crate::fs::FileSystem;
use crate::model::Tag;
use crate::store::Database;
use tracing::info;

pub fn run<F: FileSystem + ?Sized>(
    db: &mut Database,
    fs: &F,
    primary: &Tag,
    secondary: &Tag,
) -> Result<CmdResult> {
    if primary == secondary {
        return Err(TagzError::SelfMerge(primary.to_string()));
    }

    let mut result = CmdResult::default();
    let tx = db.transaction()?;
    let files = filetags::files_of_tag(&tx, secondary)?;

    if files.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No files are tagged with '{}', nothing to merge",
            secondary
        )));
        return Ok(result);
    }

    for file in &files {
        match filetags::tag_file(&tx, fs, file, primary) {
            Ok(()) => result.outcomes.push(TagOutcome::Applied {
                file: file.clone(),
                tag: primary.clone(),
            }),
            // already carrying the primary tag counts as merged
            Err(TagzError::DuplicateAssociation { .. }) => {}
            Err(e) => return Err(e),
        }
        filetags::untag_file(&tx, file, secondary)?;
        result.outcomes.push(TagOutcome::Removed {
            file: file.clone(),
            tag: secondary.clone(),
        });
    }
    tx.commit()?;

    info!("merged <{}> into <{}> on {} files", secondary, primary, files.len());
    result.add_message(CmdMessage::success(format!(
        "Merged '{}' into '{}' ({} file{})",
        secondary,
        primary,
        files.len(),
        if files.len() == 1 { "" } else { "s" }
    )));
    Ok(result)
}
