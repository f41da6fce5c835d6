//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure, the form-style argument types,
//! and output rendering for the `contacts` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    target_phone, AddCommand, ConfigCommand, CountriesCommand, DeleteCommand, EditCommand,
    ListCommand, OutputFormat, SearchCommand, ShowCommand, StatusCommand,
};

/// contacts - A single-user contact book
///
/// Stores names, phone numbers, emails, and tags in a local file, with
/// validation, duplicate detection, and regex search.
#[derive(Debug, Parser)]
#[command(name = "contacts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the contacts file (overrides the configured location)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub book: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new contact
    Add(AddCommand),

    /// List all contacts
    List(ListCommand),

    /// Search contacts by name, phone, or tag
    Search(SearchCommand),

    /// Show a single contact
    Show(ShowCommand),

    /// Replace a contact's details
    Edit(EditCommand),

    /// Delete a contact
    Delete(DeleteCommand),

    /// List suggested and in-use tags
    Tags,

    /// List known countries and dial codes
    Countries(CountriesCommand),

    /// Show contact book status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "contacts");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::try_parse_from(["contacts", "-q", "-v", "tags"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli::try_parse_from(["contacts", "-vv", "tags"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_add_with_full_phone() {
        let cli = Cli::try_parse_from([
            "contacts",
            "add",
            "--name",
            "Asha",
            "--phone",
            "+919876543210",
            "--email",
            "asha@example.com",
            "-t",
            "Family",
            "-t",
            "Work",
        ])
        .unwrap();
        let Command::Add(cmd) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(cmd.phone.as_deref(), Some("+919876543210"));
        assert_eq!(cmd.tags, vec!["Family", "Work"]);
    }

    #[test]
    fn test_parse_add_with_country_and_number() {
        let cli = Cli::try_parse_from([
            "contacts",
            "add",
            "-n",
            "Asha",
            "--country",
            "India",
            "--number",
            "9876543210",
            "-e",
            "asha@example.com",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Add(_)));
    }

    #[test]
    fn test_parse_add_requires_phone_source() {
        let result =
            Cli::try_parse_from(["contacts", "add", "-n", "Asha", "-e", "asha@example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_phone_conflicts_with_number() {
        let result = Cli::try_parse_from([
            "contacts",
            "add",
            "-n",
            "Asha",
            "-p",
            "+919876543210",
            "--number",
            "9876543210",
            "-e",
            "asha@example.com",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit_clear_tags_conflicts_with_tag() {
        let result = Cli::try_parse_from([
            "contacts",
            "edit",
            "+919876543210",
            "--clear-tags",
            "-t",
            "Work",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delete_by_label() {
        let cli = Cli::try_parse_from(["contacts", "delete", "Asha (+919876543210)"]).unwrap();
        let Command::Delete(cmd) = cli.command else {
            panic!("expected delete command");
        };
        assert_eq!(cmd.target.as_deref(), Some("Asha (+919876543210)"));
        assert!(cmd.name.is_none());
    }

    #[test]
    fn test_parse_delete_requires_selector() {
        assert!(Cli::try_parse_from(["contacts", "delete"]).is_err());
    }

    #[test]
    fn test_parse_search_with_format() {
        let cli = Cli::try_parse_from(["contacts", "search", "^a", "-f", "json"]).unwrap();
        let Command::Search(cmd) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(cmd.pattern, "^a");
        assert_eq!(cmd.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_with_config_and_book() {
        let cli = Cli::try_parse_from([
            "contacts",
            "-c",
            "/custom/config.toml",
            "list",
            "--book",
            "/tmp/book.jsonl",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.book, Some(PathBuf::from("/tmp/book.jsonl")));
    }

    #[test]
    fn test_parse_short_book_flag() {
        let cli = Cli::try_parse_from(["contacts", "-b", "/tmp/b.jsonl", "list"]).unwrap();
        assert_eq!(cli.book, Some(PathBuf::from("/tmp/b.jsonl")));
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn test_parse_list_with_tag() {
        let cli = Cli::try_parse_from(["contacts", "list", "-t", "Work", "-u"]).unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.tag.as_deref(), Some("Work"));
        assert!(cmd.unsorted);
    }
}
