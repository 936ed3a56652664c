//! # Tagz Architecture
//!
//! Tagz attaches tags to files and directories and answers two questions:
//! which tags does this file carry, and which files carry this tag. Tags are
//! `(key, value)` pairs. An empty key makes a bare label (`urgent`), a
//! non-empty one a keyed tag (`status=done`). Everything is stored in one
//! SQLite file found by walking up from the working directory.
//!
//! Like the tools it sits next to, tagz is a library that happens to have a CLI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, picks exit codes      │
//! │  - Finds the database and installs logging                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Paths → (directory, name), tokens → Tag                  │
//! │  - Dispatches to commands                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, owns transaction boundaries    │
//! │  - Turns expected failures into TagOutcomes                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Association Engine (filetags.rs)                           │
//! │  - relate / unrelate, tag_file / untag_file, orphan cleanup │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Database: schema, connection, transactions               │
//! │  - tags.rs / files.rs: per-table get-or-create and delete   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - A file or tag row exists only while at least one association references
//!   it. Removing the last association removes the endpoint in the same
//!   transaction.
//! - Files are identified by the `(directory, name)` pair produced by
//!   [`paths::split_path`]. Nothing else decides whether two paths are the same.
//! - A tag value is never empty.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments, returns `Result<CmdResult>`
//! or plain data, and never prints or exits. The only disk access besides the
//! database is the [`fs::FileSystem`] stat used when a file is first tagged.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`filetags`]: The association engine
//! - [`store`]: SQLite schema, tag store and file store
//! - [`model`]: `Tag`, `FileRef`, `FileRecord`, projection columns
//! - [`fs`]: Filesystem metadata (`LocalFs`, `MemFs`)
//! - [`paths`]: Path normalization
//! - [`init`]: Database discovery and context setup
//! - [`config`]: Configuration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and output for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filetags;
pub mod fs;
pub mod init;
pub mod model;
pub mod paths;
pub mod store;

#[cfg(test)]
mod test_utils;
