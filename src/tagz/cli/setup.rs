use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tagz",
    bin_name = "tagz",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Tag files and directories from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use instead of searching upward
    #[arg(long, global = true, env = "TAGZ_DB", value_name = "PATH", help_heading = "Options")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Tagging,
    Query,
    Database,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Tagging => "Tagging:",
            CommandGroup::Query => "Queries:",
            CommandGroup::Database => "Database:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "tag" | "untag" | "merge" => Some(CommandGroup::Tagging),
            "tags" | "files" | "ls" => Some(CommandGroup::Query),
            "init" | "info" | "clean" | "help" => Some(CommandGroup::Database),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Tagging,
            CommandGroup::Query,
            CommandGroup::Database,
        ]
    }
}

/// Returns the grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("tagz {version}\n"));
    output.push_str("Tag files and directories from the command line\n");
    output.push('\n');
    output.push_str("Usage: tagz [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<8} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Tags are written as `value` or `key=value`.\n");
    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --db <PATH>  Database file to use instead of searching upward [env: TAGZ_DB]\n");
    output.push_str("      --json       Print results as JSON\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(command) => command.name(),
        None => {
            print_grouped_help();
            return;
        }
    };
    print_help_for_command(name);
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tag a file or directory
    #[command(display_order = 1)]
    Tag {
        /// File or directory to tag
        file: PathBuf,

        /// Tags to apply (e.g. urgent status=done)
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Remove tags from a file
    #[command(alias = "rm", display_order = 2)]
    Untag {
        /// Tagged file (it no longer needs to exist)
        file: PathBuf,

        /// Tags to remove
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Move every file from one tag onto another
    #[command(display_order = 3)]
    Merge {
        /// Tag that receives the files
        tag: String,

        /// Tag that is merged away
        tag_to_merge: String,
    },

    /// Show the tags of files (every tag if no file is given)
    #[command(display_order = 10)]
    Tags {
        /// Files to show
        #[arg(num_args = 0..)]
        files: Vec<PathBuf>,
    },

    /// List files carrying all of the given tags
    #[command(display_order = 11)]
    Files {
        /// Tags to match
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// List every tagged file with its tags
    #[command(display_order = 12)]
    Ls,

    /// Create a database in the current directory
    #[command(display_order = 20)]
    Init {
        /// Recreate the database, dropping all tags
        #[arg(long)]
        force: bool,
    },

    /// Show database location and counts
    #[command(display_order = 21)]
    Info,

    /// Forget files that no longer exist on disk
    #[command(display_order = 22)]
    Clean {
        /// Remove entries instead of only listing them
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print help for tagz or a subcommand
    #[command(display_order = 30)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Tag { .. } => "tag",
            Commands::Untag { .. } => "untag",
            Commands::Merge { .. } => "merge",
            Commands::Tags { .. } => "tags",
            Commands::Files { .. } => "files",
            Commands::Ls => "ls",
            Commands::Init { .. } => "init",
            Commands::Info => "info",
            Commands::Clean { .. } => "clean",
            Commands::Help { .. } => "help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tag() {
        let cli = Cli::try_parse_from(["tagz", "tag", "a.txt", "urgent", "k=v"]).unwrap();
        match cli.command {
            Some(Commands::Tag { file, tags }) => {
                assert_eq!(file, PathBuf::from("a.txt"));
                assert_eq!(tags, vec!["urgent", "k=v"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tag_requires_a_tag() {
        assert!(Cli::try_parse_from(["tagz", "tag", "a.txt"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tagz", "ls", "--db", "/tmp/x.db", "-v"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_every_command_has_a_group() {
        for sc in Cli::command().get_subcommands() {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no group",
                sc.get_name()
            );
        }
    }
}
