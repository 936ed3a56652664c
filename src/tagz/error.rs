use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagzError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Already exists: {0}")]
    DuplicateKey(String),

    #[error("{file} is already tagged with '{tag}'")]
    DuplicateAssociation { file: String, tag: String },

    #[error("{file} is not tagged with '{tag}'")]
    NotTagged { file: String, tag: String },

    #[error("Invalid column: '{0}'")]
    InvalidColumn(String),

    #[error("Cannot merge tag '{0}' with itself")]
    SelfMerge(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Cannot relate {file} and '{tag}': one of them is not in the database")]
    MissingEndpoint { file: String, tag: String },

    #[error("No tagz database found from {} (run 'tagz init')", .0.display())]
    NoDatabase(PathBuf),

    #[error("Database already initialized at {} (use --force to recreate)", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

/// Whether a SQLite error is a UNIQUE / PRIMARY KEY violation.
///
/// Other constraint failures (NOT NULL, FOREIGN KEY) are left as plain database errors.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

pub type Result<T> = std::result::Result<T, TagzError>;
