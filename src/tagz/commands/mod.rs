//! # Commands
//!
//! One module per user-facing operation. Each `run` takes an open [`Database`]
//! plus already-normalized inputs (a [`FileRef`], parsed [`Tag`]s) and returns
//! a [`CmdResult`]. Commands never print; the CLI renders the result.
//!
//! ## Transactions
//!
//! Mutating commands own their transaction boundaries:
//!
//! - [`apply`] and [`remove`] commit once per `(file, tag)` pair, so a batch
//!   that partly fails keeps the pairs that succeeded.
//! - [`merge`] runs the whole merge in one transaction.
//! - [`clean`] commits once per stale file.
//!
//! ## Expected failures
//!
//! "Already tagged" and "not tagged" are not errors at this level. They are
//! recorded as [`TagOutcome`]s so a batch keeps going and the caller can pick an
//! exit code with [`CmdResult::has_failures`]. Anything else (missing file on
//! disk, database errors) is returned as `Err`.
//!
//! [`Database`]: crate::store::Database

use crate::model::{FileRef, Tag};
use crate::store::StoreStats;
use serde::Serialize;
use std::path::PathBuf;

pub mod apply;
pub mod clean;
pub mod info;
pub mod init;
pub mod list;
pub mod merge;
pub mod remove;
pub mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What happened to one `(file, tag)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TagOutcome {
    Applied { file: FileRef, tag: Tag },
    AlreadyTagged { file: FileRef, tag: Tag },
    Removed { file: FileRef, tag: Tag },
    NotTagged { file: FileRef, tag: Tag },
}

impl TagOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TagOutcome::AlreadyTagged { .. } | TagOutcome::NotTagged { .. }
        )
    }
}

/// A tracked file together with its tags, in the order they were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTags {
    pub file: FileRef,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub outcomes: Vec<TagOutcome>,
    pub listed_tags: Vec<Tag>,
    pub listed_files: Vec<FileTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Records an outcome along with the message the user sees for it.
    pub fn add_outcome(&mut self, outcome: TagOutcome) {
        let message = match &outcome {
            TagOutcome::Applied { file, tag } => {
                CmdMessage::success(format!("Tagged {} with '{}'", file, tag))
            }
            TagOutcome::AlreadyTagged { file, tag } => {
                CmdMessage::warning(format!("{} is already tagged with '{}'", file, tag))
            }
            TagOutcome::Removed { file, tag } => {
                CmdMessage::success(format!("Removed '{}' from {}", tag, file))
            }
            TagOutcome::NotTagged { file, tag } => {
                CmdMessage::warning(format!("{} is not tagged with '{}'", file, tag))
            }
        };
        self.messages.push(message);
        self.outcomes.push(outcome);
    }

    pub fn with_listed_tags(mut self, tags: Vec<Tag>) -> Self {
        self.listed_tags = tags;
        self
    }

    pub fn with_listed_files(mut self, files: Vec<FileTags>) -> Self {
        self.listed_files = files;
        self
    }

    /// True when any pair ended up "already tagged" or "not tagged".
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(TagOutcome::is_failure)
    }
}
