//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every tagz operation.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: raw paths become [`FileRef`]s through
//!   [`crate::paths::split_path`] against the working directory it was built
//!   with, and raw tag tokens become [`Tag`]s
//! - **Dispatches** to the matching `commands::*::run`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and [`crate::filetags`]
//! - **I/O to the terminal**: no stdout, stderr, or colours
//! - **Database discovery**: the caller hands over an open [`Database`]
//!
//! ## Generic Over FileSystem
//!
//! `TagzApi<F: FileSystem>` only touches the disk to stat files being tagged
//! and to check for stale entries:
//! - Production: `TagzApi<LocalFs>`
//! - Testing: `TagzApi<MemFs>`
//!
//! ## Tag arguments
//!
//! Two spellings are accepted:
//! - **Tokens** (`apply_tags`, `remove_tags`, `merge_tag`, `files_of_tag`):
//!   `key=value` or a bare `value`, see [`Tag::parse`]
//! - **Positional** (`apply_tag`, `remove_tag`): one argument is the value of a
//!   key-less tag, two are `key` and `value`, see [`Tag::from_args`]

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::filetags;
use crate::fs::{FileSystem, LocalFs};
use crate::model::{FileRef, Tag};
use crate::paths::split_path;
use crate::store::Database;
use std::path::{Path, PathBuf};

/// The main API facade for tagz operations.
pub struct TagzApi<F: FileSystem = LocalFs> {
    db: Database,
    fs: F,
    cwd: PathBuf,
}

impl<F: FileSystem> TagzApi<F> {
    pub fn new(db: Database, fs: F, cwd: PathBuf) -> Self {
        Self { db, fs, cwd }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> Result<FileRef> {
        split_path(path.as_ref(), &self.cwd)
    }

    pub fn apply_tag<P: AsRef<Path>, S: AsRef<str>>(
        &mut self,
        path: P,
        args: &[S],
    ) -> Result<CmdResult> {
        let file = self.resolve(path)?;
        let tag = Tag::from_args(args)?;
        commands::apply::run(&mut self.db, &self.fs, &file, &[tag])
    }

    pub fn apply_tags<P: AsRef<Path>, S: AsRef<str>>(
        &mut self,
        path: P,
        tokens: &[S],
    ) -> Result<CmdResult> {
        let file = self.resolve(path)?;
        let tags = parse_tags(tokens)?;
        commands::apply::run(&mut self.db, &self.fs, &file, &tags)
    }

    pub fn remove_tag<P: AsRef<Path>, S: AsRef<str>>(
        &mut self,
        path: P,
        args: &[S],
    ) -> Result<CmdResult> {
        let file = self.resolve(path)?;
        let tag = Tag::from_args(args)?;
        commands::remove::run(&mut self.db, &file, &[tag])
    }

    pub fn remove_tags<P: AsRef<Path>, S: AsRef<str>>(
        &mut self,
        path: P,
        tokens: &[S],
    ) -> Result<CmdResult> {
        let file = self.resolve(path)?;
        let tags = parse_tags(tokens)?;
        commands::remove::run(&mut self.db, &file, &tags)
    }

    /// Moves every file tagged `secondary` over to `primary`.
    pub fn merge_tag(&mut self, primary: &str, secondary: &str) -> Result<CmdResult> {
        let primary = Tag::parse(primary)?;
        let secondary = Tag::parse(secondary)?;
        commands::merge::run(&mut self.db, &self.fs, &primary, &secondary)
    }

    pub fn tags_of_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Tag>> {
        let file = self.resolve(path)?;
        filetags::tags_of_file(self.db.conn(), &file)
    }

    pub fn files_of_tag(&self, token: &str) -> Result<Vec<FileRef>> {
        let tag = Tag::parse(token)?;
        filetags::files_of_tag(self.db.conn(), &tag)
    }

    pub fn show_tags<P: AsRef<Path>>(&self, paths: &[P]) -> Result<CmdResult> {
        let files = paths
            .iter()
            .map(|p| self.resolve(p))
            .collect::<Result<Vec<_>>>()?;
        commands::show::show_tags(self.db.conn(), &files)
    }

    pub fn show_files<S: AsRef<str>>(&self, tokens: &[S]) -> Result<CmdResult> {
        let tags = parse_tags(tokens)?;
        commands::show::show_files(self.db.conn(), &tags)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(self.db.conn())
    }

    pub fn info(&self) -> Result<CmdResult> {
        commands::info::run(&self.db)
    }

    pub fn clean(&mut self, apply: bool) -> Result<CmdResult> {
        commands::clean::run(&mut self.db, &self.fs, apply)
    }

    pub fn close(self) -> Result<()> {
        self.db.close()
    }
}

/// Creates a database at `path`. Runs before any [`TagzApi`] can exist.
pub fn init(path: &Path, force: bool) -> Result<CmdResult> {
    commands::init::run(path, force)
}

fn parse_tags<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Tag>> {
    tokens.iter().map(|t| Tag::parse(t.as_ref())).collect()
}
