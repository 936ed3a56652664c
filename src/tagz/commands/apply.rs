use crate::commands::{CmdResult, TagOutcome};
use crate::error::{Result, TagzError};
use crate::filetags;
use crate::fs::FileSystem;
use crate::model::{FileRef, Tag};
use crate::store::Database;

/// Applies each tag to `file`, one transaction per tag.
pub fn run<F: FileSystem + ?Sized>(
    db: &mut Database,
    fs: &F,
    file: &FileRef,
    tags: &[Tag],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for tag in tags {
        let tx = db.transaction()?;
        match filetags::tag_file(&tx, fs, file, tag) {
            Ok(()) => {
                tx.commit()?;
                result.add_outcome(TagOutcome::Applied {
                    file: file.clone(),
                    tag: tag.clone(),
                });
            }
            Err(TagzError::DuplicateAssociation { .. }) => {
                result.add_outcome(TagOutcome::AlreadyTagged {
                    file: file.clone(),
                    tag: tag.clone(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemFs;

    fn setup() -> (Database, MemFs, FileRef) {
        let fs = MemFs::new().with_file("/docs/a.txt", 1);
        let db = Database::open_in_memory().unwrap();
        (db, fs, FileRef::new("/docs", "a.txt"))
    }

    #[test]
    fn test_apply_tags() {
        let (mut db, fs, file) = setup();
        let tags = vec![Tag::label("urgent").unwrap(), Tag::new("status", "wip").unwrap()];

        let result = run(&mut db, &fs, &file, &tags).unwrap();
        assert_eq!(result.outcomes.len(), 2);
        assert!(!result.has_failures());
        assert_eq!(filetags::tags_of_file(db.conn(), &file).unwrap(), tags);
    }

    #[test]
    fn test_apply_existing_reports_already_tagged() {
        let (mut db, fs, file) = setup();
        let urgent = Tag::label("urgent").unwrap();
        run(&mut db, &fs, &file, &[urgent.clone()]).unwrap();

        let other = Tag::label("other").unwrap();
        let result = run(&mut db, &fs, &file, &[urgent.clone(), other.clone()]).unwrap();
        assert!(result.has_failures());
        assert!(matches!(result.outcomes[0], TagOutcome::AlreadyTagged { .. }));
        // the batch continues past the duplicate
        assert!(matches!(result.outcomes[1], TagOutcome::Applied { .. }));
        assert_eq!(
            filetags::tags_of_file(db.conn(), &file).unwrap(),
            vec![urgent, other]
        );
    }

    #[test]
    fn test_apply_missing_file_fails() {
        let (mut db, fs, _) = setup();
        let ghost = FileRef::new("/docs", "ghost.txt");
        let err = run(&mut db, &fs, &ghost, &[Tag::label("x").unwrap()]).unwrap_err();
        assert!(matches!(err, TagzError::NotFound(_)));
        assert_eq!(db.stats().unwrap().tags, 0);
    }
}
