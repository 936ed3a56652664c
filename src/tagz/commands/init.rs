use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Database;
use std::path::Path;

/// Creates the database at `path`. With `force`, an existing one is wiped.
pub fn run(path: &Path, force: bool) -> Result<CmdResult> {
    let db = Database::create(path, force)?;
    db.close()?;

    let mut result = CmdResult {
        db_path: Some(path.to_path_buf()),
        ..Default::default()
    };
    result.add_message(CmdMessage::success(format!(
        "Initialized tagz database at {}",
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagzError;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".tagz.db");
        let result = run(&path, false).unwrap();
        assert!(path.exists());
        assert_eq!(result.db_path, Some(path.clone()));
        assert!(Database::open(&path).is_ok());
    }

    #[test]
    fn test_init_twice_needs_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".tagz.db");
        run(&path, false).unwrap();
        assert!(matches!(
            run(&path, false),
            Err(TagzError::AlreadyInitialized(_))
        ));
        assert!(run(&path, true).is_ok());
    }
}
