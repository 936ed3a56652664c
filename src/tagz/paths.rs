//! Path normalization.
//!
//! Every path that reaches the database goes through [`split_path`], so this is
//! the single place that decides whether two spellings name the same file.
//! Paths are made absolute against the working directory and `.`/`..`
//! components are resolved lexically. Symlinks are not followed, and paths that
//! no longer exist can still be normalized (needed to untag a deleted file).

use crate::error::{Result, TagzError};
use crate::model::FileRef;
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against `cwd` and resolves `.` and `..` lexically.
pub fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays at `/`
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Splits a path into the `(directory, name)` pair used as the file's identity.
pub fn split_path(path: &Path, cwd: &Path) -> Result<FileRef> {
    let normalized = normalize(path, cwd);

    let name = normalized
        .file_name()
        .ok_or_else(|| TagzError::Api(format!("Cannot tag '{}'", normalized.display())))?;
    let directory = normalized
        .parent()
        .ok_or_else(|| TagzError::Api(format!("Cannot tag '{}'", normalized.display())))?;

    let name = name
        .to_str()
        .ok_or_else(|| non_utf8(&normalized))?
        .to_string();
    let directory = directory
        .to_str()
        .ok_or_else(|| non_utf8(&normalized))?
        .to_string();

    Ok(FileRef { directory, name })
}

fn non_utf8(path: &Path) -> TagzError {
    TagzError::Api(format!("Path is not valid UTF-8: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_absolute() {
        let f = split_path(Path::new("/docs/a.txt"), Path::new("/elsewhere")).unwrap();
        assert_eq!(f, FileRef::new("/docs", "a.txt"));
    }

    #[test]
    fn test_split_relative_joins_cwd() {
        let f = split_path(Path::new("notes/a.txt"), Path::new("/home/me")).unwrap();
        assert_eq!(f, FileRef::new("/home/me/notes", "a.txt"));
    }

    #[test]
    fn test_split_resolves_dots() {
        let f = split_path(Path::new("./x/../b.txt"), Path::new("/home/me")).unwrap();
        assert_eq!(f, FileRef::new("/home/me", "b.txt"));

        let f = split_path(Path::new("../../../c"), Path::new("/a")).unwrap();
        assert_eq!(f, FileRef::new("/", "c"));
    }

    #[test]
    fn test_same_file_different_spellings() {
        let cwd = Path::new("/proj");
        let a = split_path(Path::new("src/main.rs"), cwd).unwrap();
        let b = split_path(Path::new("/proj/src/./main.rs"), cwd).unwrap();
        let c = split_path(Path::new("src/main.rs/"), cwd).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_split_directory_target() {
        let f = split_path(Path::new("/docs/reports"), Path::new("/")).unwrap();
        assert_eq!(f, FileRef::new("/docs", "reports"));
    }

    #[test]
    fn test_split_root_fails() {
        assert!(split_path(Path::new("/"), Path::new("/")).is_err());
    }
}
