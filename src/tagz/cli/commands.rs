//! # CLI Layer
//!
//! This module is **one possible UI client** for tagz, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Picks exit codes
//! - Parses arguments
//! - Installs the tracing subscriber
//!
//! ## Flow
//!
//! 1. Parse arguments, load [`TagzConfig`], install logging
//! 2. `init` and `help` run without a database
//! 3. Everything else locates the database (`--db`/`TAGZ_DB`, else walk up
//!    from the working directory), builds the API and dispatches
//! 4. Results are rendered as coloured text, or as JSON with `--json`
//!
//! A command whose result [`has_failures`](CmdResult::has_failures) (a pair
//! that was already tagged, or not tagged) still prints everything, then exits 1.

use super::print::{
    print_file_tags, print_info, print_json, print_listing, print_messages, print_paths,
    print_tags,
};
use super::setup::{print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands};
use clap::Parser;
use tagz::api;
use tagz::commands::CmdResult;
use tagz::config::TagzConfig;
use tagz::error::Result;
use tagz::init::{init_target, initialize, TagzContext};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// How a command's result is rendered when not printing JSON.
#[derive(Debug, Clone, Copy)]
enum View {
    Messages,
    FileTags,
    Paths,
    Listing,
    Info,
}

pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(0);
    }

    let (config, config_error) = match TagzConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (TagzConfig::default(), Some(e)),
    };
    init_logging(cli.verbose, &config.log);
    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }

    let cwd = std::env::current_dir()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            print_grouped_help();
            return Ok(0);
        }
    };

    match command {
        Commands::Help { command } => {
            match command {
                Some(name) => print_help_for_command(&name),
                None => print_grouped_help(),
            }
            Ok(0)
        }
        Commands::Init { force } => {
            let path = init_target(&cwd, cli.db.as_deref(), &config.db_name);
            let result = api::init(&path, force)?;
            render(&result, View::Messages, cli.json)
        }
        command => {
            let mut ctx = initialize(&cwd, cli.db.as_deref(), config)?;
            let (result, view) = dispatch(&mut ctx, command)?;
            let code = render(&result, view, cli.json)?;
            ctx.api.close()?;
            Ok(code)
        }
    }
}

fn dispatch(ctx: &mut TagzContext, command: Commands) -> Result<(CmdResult, View)> {
    let api = &mut ctx.api;
    let dispatched = match command {
        Commands::Tag { file, tags } => (api.apply_tags(&file, &tags)?, View::Messages),
        Commands::Untag { file, tags } => (api.remove_tags(&file, &tags)?, View::Messages),
        Commands::Merge { tag, tag_to_merge } => {
            (api.merge_tag(&tag, &tag_to_merge)?, View::Messages)
        }
        Commands::Tags { files } => (api.show_tags(&files)?, View::FileTags),
        Commands::Files { tags } => (api.show_files(&tags)?, View::Paths),
        Commands::Ls => (api.list()?, View::Listing),
        Commands::Info => (api.info()?, View::Info),
        Commands::Clean { yes } => (api.clean(yes)?, View::Messages),
        Commands::Init { .. } | Commands::Help { .. } => (CmdResult::default(), View::Messages),
    };
    Ok(dispatched)
}

fn render(result: &CmdResult, view: View, json: bool) -> Result<i32> {
    if json {
        print_json(result)?;
    } else {
        match view {
            View::Messages => {}
            View::FileTags if result.listed_files.is_empty() => print_tags(&result.listed_tags),
            View::FileTags => print_file_tags(&result.listed_files),
            View::Paths => print_paths(&result.listed_files),
            View::Listing => print_listing(&result.listed_files),
            View::Info => {
                if let Some(stats) = &result.stats {
                    print_info(result.db_path.as_deref(), stats);
                }
            }
        }
        print_messages(&result.messages);
    }
    Ok(if result.has_failures() { 1 } else { 0 })
}

fn init_logging(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // a subscriber may already be installed when run twice in one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
