use colored::Colorize;
use tagz::commands::{CmdMessage, CmdResult, FileTags, MessageLevel};
use tagz::error::Result;
use tagz::model::Tag;
use tagz::store::StoreStats;
use std::path::Path;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_json(result: &CmdResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn format_tag(tag: &Tag) -> String {
    if tag.is_keyed() {
        format!("{}={}", tag.key.dimmed(), tag.value.cyan())
    } else {
        tag.value.cyan().to_string()
    }
}

fn format_tags(tags: &[Tag]) -> String {
    tags.iter().map(format_tag).collect::<Vec<_>>().join(" ")
}

/// One tag per line.
pub(super) fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("{}", format_tag(tag));
    }
}

/// A single file prints its tags one per line; several files print
/// `path: tag tag` so the owner of each tag stays visible.
pub(super) fn print_file_tags(entries: &[FileTags]) {
    if let [single] = entries {
        print_tags(&single.tags);
        return;
    }
    for entry in entries {
        println!("{}: {}", entry.file.to_string().bold(), format_tags(&entry.tags));
    }
}

pub(super) fn print_paths(entries: &[FileTags]) {
    for entry in entries {
        println!("{}", entry.file);
    }
}

pub(super) fn print_listing(entries: &[FileTags]) {
    let width = entries
        .iter()
        .map(|e| e.file.to_string().chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        let path = entry.file.to_string();
        println!(
            "{:<width$}  {}",
            path,
            format_tags(&entry.tags),
            width = width
        );
    }
}

fn label(text: &str) -> String {
    format!("{:<14}", text).bold().to_string()
}

pub(super) fn print_info(db_path: Option<&Path>, stats: &StoreStats) {
    if let Some(path) = db_path {
        println!("{}{}", label("Database:"), path.display());
    }
    println!("{}{}", label("Files:"), stats.files);
    println!("{}{}", label("Tags:"), stats.tags);
    println!("{}{}", label("Associations:"), stats.associations);
}
