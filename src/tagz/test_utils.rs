use crate::api::TagzApi;
use crate::fs::LocalFs;
use crate::store::Database;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp directory holding a fresh database, plus an API rooted there.
pub struct TestEnv {
    // keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub api: TagzApi<LocalFs>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let db = Database::create(&root.join(".tagz.db"), false).expect("failed to create db");
        let api = TagzApi::new(db, LocalFs, root.clone());
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    /// Creates a file (and its parent directories) under the root.
    pub fn touch(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent");
        }
        fs::write(&path, relative).expect("failed to write file");
        path
    }
}
