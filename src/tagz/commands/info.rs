use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::Database;

/// Where the database lives and how much it holds.
pub fn run(db: &Database) -> Result<CmdResult> {
    Ok(CmdResult {
        stats: Some(db.stats()?),
        db_path: db.path().map(|p| p.to_path_buf()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::apply;
    use crate::fs::MemFs;
    use crate::model::{FileRef, Tag};

    #[test]
    fn test_info_counts() {
        let fs = MemFs::new().with_file("/p/a", 1).with_file("/p/b", 1);
        let mut db = Database::open_in_memory().unwrap();
        let tags = [Tag::label("x").unwrap(), Tag::label("y").unwrap()];
        apply::run(&mut db, &fs, &FileRef::new("/p", "a"), &tags).unwrap();
        apply::run(&mut db, &fs, &FileRef::new("/p", "b"), &tags[..1]).unwrap();

        let stats = run(&db).unwrap().stats.unwrap();
        assert_eq!((stats.files, stats.tags, stats.associations), (2, 2, 3));
    }
}
