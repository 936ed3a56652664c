use crate::commands::{CmdResult, TagOutcome};
use crate::error::{Result, TagzError};
use crate::filetags;
use crate::model::{FileRef, Tag};
use crate::store::Database;

/// Removes each tag from `file`. Every removal commits on its own, so one
/// "not tagged" pair does not undo the others.
pub fn run(db: &mut Database, file: &FileRef, tags: &[Tag]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for tag in tags {
        result.add_outcome(remove_one(db, file, tag)?);
    }
    Ok(result)
}

fn remove_one(db: &mut Database, file: &FileRef, tag: &Tag) -> Result<TagOutcome> {
    let tx = db.transaction()?;
    match filetags::untag_file(&tx, file, tag) {
        Ok(()) => {
            tx.commit()?;
            Ok(TagOutcome::Removed {
                file: file.clone(),
                tag: tag.clone(),
            })
        }
        Err(TagzError::NotTagged { .. }) => Ok(TagOutcome::NotTagged {
            file: file.clone(),
            tag: tag.clone(),
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::apply;
    use crate::fs::MemFs;
    use crate::store::StoreStats;

    fn label(v: &str) -> Tag {
        Tag::label(v).unwrap()
    }

    #[test]
    fn test_apply_then_remove_leaves_no_rows() {
        let fs = MemFs::new().with_file("/docs/a.txt", 1);
        let mut db = Database::open_in_memory().unwrap();
        let file = FileRef::new("/docs", "a.txt");
        let tag = Tag::new("status", "done").unwrap();

        apply::run(&mut db, &fs, &file, &[tag.clone()]).unwrap();
        let result = run(&mut db, &file, &[tag]).unwrap();

        assert!(!result.has_failures());
        assert_eq!(db.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_remove_untracked_file_is_not_tagged() {
        let mut db = Database::open_in_memory().unwrap();
        let file = FileRef::new("/docs", "a.txt");
        let result = run(&mut db, &file, &[label("x")]).unwrap();
        assert!(result.has_failures());
        assert!(matches!(result.outcomes[0], TagOutcome::NotTagged { .. }));
    }

    #[test]
    fn test_partial_failure_keeps_successful_removals() {
        let fs = MemFs::new().with_file("/docs/a.txt", 1);
        let mut db = Database::open_in_memory().unwrap();
        let file = FileRef::new("/docs", "a.txt");
        apply::run(&mut db, &fs, &file, &[label("one"), label("two")]).unwrap();

        let result = run(&mut db, &file, &[label("one"), label("missing")]).unwrap();
        assert!(result.has_failures());
        assert!(matches!(result.outcomes[0], TagOutcome::Removed { .. }));
        assert!(matches!(result.outcomes[1], TagOutcome::NotTagged { .. }));
        assert_eq!(
            filetags::tags_of_file(db.conn(), &file).unwrap(),
            vec![label("two")]
        );
    }

    #[test]
    fn test_remove_works_after_file_deleted_from_disk() {
        let mut fs = MemFs::new().with_file("/docs/a.txt", 1);
        let mut db = Database::open_in_memory().unwrap();
        let file = FileRef::new("/docs", "a.txt");
        apply::run(&mut db, &fs, &file, &[label("x")]).unwrap();
        fs.remove(&file.path());

        let result = run(&mut db, &file, &[label("x")]).unwrap();
        assert!(!result.has_failures());
        assert_eq!(db.stats().unwrap().files, 0);
    }
}
