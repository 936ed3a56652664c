//! Core data types: tags, file references, and typed file projections.
//!
//! A [`Tag`] is identified by its `(key, value)` pair. The empty key marks a
//! bare label (`urgent`), a non-empty key a keyed tag (`status=urgent`).
//!
//! A file is identified by its `(directory, name)` pair, carried around as a
//! [`FileRef`]. The full row, with the metadata snapshotted when the file was
//! first tagged, is a [`FileRecord`].

use crate::error::{Result, TagzError};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Builds a tag, rejecting an empty value. An empty key is a bare label.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            return Err(TagzError::InvalidTag(if key.is_empty() {
                "tag value cannot be empty".to_string()
            } else {
                format!("tag '{}=' has an empty value", key)
            }));
        }
        Ok(Self { key, value })
    }

    /// A bare label (`key = ""`).
    pub fn label(value: impl Into<String>) -> Result<Self> {
        Self::new("", value)
    }

    /// Parses the command-line shorthand: `key=value` splits on the first `=`,
    /// anything else is a bare label.
    pub fn parse(token: &str) -> Result<Self> {
        match token.split_once('=') {
            Some((key, value)) => Self::new(key, value),
            None => Self::label(token),
        }
    }

    /// Positional form: one token is always the value of a key-less tag,
    /// two tokens are `(key, value)`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args {
            [value] => Self::label(value.as_ref()),
            [key, value] => Self::new(key.as_ref(), value.as_ref()),
            _ => Err(TagzError::InvalidTag(format!(
                "expected a value or a key and a value, got {} arguments",
                args.len()
            ))),
        }
    }

    pub fn is_keyed(&self) -> bool {
        !self.key.is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}={}", self.key, self.value)
        }
    }
}

impl FromStr for Tag {
    type Err = TagzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Natural key of a tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileRef {
    pub directory: String,
    pub name: String,
}

impl FileRef {
    pub fn new(directory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.name)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// A full row of the `files` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub id: i64,
    pub directory: String,
    pub name: String,
    pub size: i64,
    pub mod_time: NaiveDateTime,
    pub is_dir: bool,
}

impl FileRecord {
    pub fn file_ref(&self) -> FileRef {
        FileRef::new(self.directory.clone(), self.name.clone())
    }
}

/// The closed set of columns a file projection may select.
///
/// Column names only ever reach SQL through [`FileColumn::as_sql`], so a caller
/// cannot smuggle arbitrary text into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileColumn {
    Id,
    Directory,
    Name,
    Size,
    ModTime,
    IsDir,
}

impl FileColumn {
    pub const ALL: [FileColumn; 6] = [
        FileColumn::Id,
        FileColumn::Directory,
        FileColumn::Name,
        FileColumn::Size,
        FileColumn::ModTime,
        FileColumn::IsDir,
    ];

    pub fn as_sql(self) -> &'static str {
        match self {
            FileColumn::Id => "id",
            FileColumn::Directory => "directory",
            FileColumn::Name => "name",
            FileColumn::Size => "size",
            FileColumn::ModTime => "mod_time",
            FileColumn::IsDir => "is_dir",
        }
    }

    /// Validates a list of caller-supplied column names before any query is built.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<FileColumn>> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for FileColumn {
    type Err = TagzError;

    fn from_str(s: &str) -> Result<Self> {
        FileColumn::ALL
            .iter()
            .copied()
            .find(|c| c.as_sql() == s)
            .ok_or_else(|| TagzError::InvalidColumn(s.to_string()))
    }
}

impl fmt::Display for FileColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileValue {
    Id(i64),
    Directory(String),
    Name(String),
    Size(i64),
    ModTime(NaiveDateTime),
    IsDir(bool),
}

/// Result of a projection query, in the order the columns were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub values: Vec<(FileColumn, FileValue)>,
}

impl FileRow {
    pub fn get(&self, column: FileColumn) -> Option<&FileValue> {
        self.values
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn id(&self) -> Option<i64> {
        match self.get(FileColumn::Id) {
            Some(FileValue::Id(id)) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_label() {
        let tag = Tag::parse("urgent").unwrap();
        assert_eq!(tag.key, "");
        assert_eq!(tag.value, "urgent");
        assert!(!tag.is_keyed());
    }

    #[test]
    fn test_parse_keyed_splits_on_first_equals() {
        let tag = Tag::parse("expr=a=b").unwrap();
        assert_eq!(tag.key, "expr");
        assert_eq!(tag.value, "a=b");
    }

    #[test]
    fn test_parse_empty_value_fails() {
        assert!(matches!(Tag::parse("status="), Err(TagzError::InvalidTag(_))));
        assert!(matches!(Tag::parse(""), Err(TagzError::InvalidTag(_))));
    }

    #[test]
    fn test_from_args_single_token_is_value() {
        let tag = Tag::from_args(&["status"]).unwrap();
        assert_eq!(tag, Tag::label("status").unwrap());

        let tag = Tag::from_args(&["status", "done"]).unwrap();
        assert_eq!(tag.key, "status");
        assert_eq!(tag.value, "done");

        let empty: [&str; 0] = [];
        assert!(Tag::from_args(&empty).is_err());
        assert!(Tag::from_args(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::label("urgent").unwrap().to_string(), "urgent");
        assert_eq!(Tag::new("status", "done").unwrap().to_string(), "status=done");
    }

    #[test]
    fn test_file_column_parse() {
        assert_eq!("mod_time".parse::<FileColumn>().unwrap(), FileColumn::ModTime);
        let cols = FileColumn::parse_list(&["id", "name"]).unwrap();
        assert_eq!(cols, vec![FileColumn::Id, FileColumn::Name]);
    }

    #[test]
    fn test_file_column_rejects_unknown() {
        let err = FileColumn::parse_list(&["name", "name; DROP TABLE files"]).unwrap_err();
        assert!(matches!(err, TagzError::InvalidColumn(c) if c.contains("DROP")));
    }

    #[test]
    fn test_file_ref_path() {
        let f = FileRef::new("/docs", "a.txt");
        assert_eq!(f.path(), PathBuf::from("/docs/a.txt"));
    }
}
