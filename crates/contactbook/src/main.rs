//! `contacts` - CLI for contactbook
//!
//! This binary provides the command-line interface for adding, listing,
//! searching, editing, and deleting contacts.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use contactbook::cli::output::{render_contact, render_contacts};
use contactbook::cli::{
    target_phone, AddCommand, Cli, Command, ConfigCommand, CountriesCommand, DeleteCommand,
    EditCommand, ListCommand, OutputFormat, SearchCommand, ShowCommand,
};
use contactbook::country::{filter_countries, COUNTRIES};
use contactbook::{init_logging, Config, ContactStore, Error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Config commands must work even when the configured file is broken.
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(cli.config, config_cmd),
        command => command,
    };

    let config = Config::load_from(cli.config)?;
    let book = cli.book.unwrap_or_else(|| config.contacts_path());
    debug!("Using contacts file {}", book.display());

    match command {
        Command::Add(cmd) => handle_add(&config, &book, &cmd),
        Command::List(cmd) => handle_list(&config, &book, &cmd),
        Command::Search(cmd) => handle_search(&config, &book, &cmd),
        Command::Show(cmd) => handle_show(&config, &book, &cmd),
        Command::Edit(cmd) => handle_edit(&book, &cmd),
        Command::Delete(cmd) => handle_delete(&book, &cmd),
        Command::Tags => handle_tags(&config, &book),
        Command::Countries(cmd) => {
            handle_countries(&cmd);
            Ok(())
        }
        Command::Status(status_cmd) => handle_status(&book, status_cmd.json),
        Command::Config(_) => unreachable!("config commands are dispatched before loading"),
    }
}

fn open_store(book: &Path) -> anyhow::Result<ContactStore> {
    ContactStore::open(book)
        .with_context(|| format!("failed to open contacts file {}", book.display()))
}

fn output_format(config: &Config, requested: Option<OutputFormat>) -> OutputFormat {
    requested.unwrap_or_else(|| config.display.format.into())
}

fn handle_add(config: &Config, book: &Path, cmd: &AddCommand) -> anyhow::Result<()> {
    let contact = cmd.to_contact(config.display.default_country.as_deref())?;
    let label = contact.label();

    let mut store = open_store(book)?;
    store.add(contact)?;
    println!("Added {label}");
    Ok(())
}

fn handle_list(config: &Config, book: &Path, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(book)?;
    let format = output_format(config, cmd.format);
    let sort_by_name = config.display.sort_by_name && !cmd.unsorted;
    let contacts = match &cmd.tag {
        Some(tag) => {
            let mut tagged = store.with_tag(tag);
            if sort_by_name {
                tagged.sort_by_cached_key(|c| c.name.to_lowercase());
            }
            tagged
        }
        None => store.list(sort_by_name),
    };

    if contacts.is_empty() && format != OutputFormat::Json {
        match &cmd.tag {
            Some(tag) => println!("No contacts tagged '{tag}'."),
            None => println!("No contacts yet."),
        }
        return Ok(());
    }
    print!("{}", with_newline(render_contacts(&contacts, format)?));
    Ok(())
}

fn handle_search(config: &Config, book: &Path, cmd: &SearchCommand) -> anyhow::Result<()> {
    let store = open_store(book)?;
    let results = store.search(&cmd.pattern)?;
    print!(
        "{}",
        with_newline(render_contacts(&results, output_format(config, cmd.format))?)
    );
    Ok(())
}

fn handle_show(config: &Config, book: &Path, cmd: &ShowCommand) -> anyhow::Result<()> {
    let store = open_store(book)?;
    let phone = target_phone(&cmd.target);
    let contact = store.get(phone).ok_or_else(|| Error::not_found(phone))?;
    print!(
        "{}",
        with_newline(render_contact(contact, output_format(config, cmd.format))?)
    );
    Ok(())
}

fn handle_edit(book: &Path, cmd: &EditCommand) -> anyhow::Result<()> {
    let mut store = open_store(book)?;
    let old_phone = cmd.target_phone();
    let current = store
        .get(old_phone)
        .ok_or_else(|| Error::not_found(old_phone))?;

    let updated = cmd.apply(current)?;
    let label = updated.label();
    store.edit(old_phone, updated)?;
    println!("Updated {label}");
    Ok(())
}

fn handle_delete(book: &Path, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut store = open_store(book)?;

    if let Some(name) = &cmd.name {
        let removed = store.delete_by_name(name)?;
        println!("Deleted {removed} contact(s) named '{name}'");
    } else if let Some(target) = &cmd.target {
        let removed = store.delete_by_phone(target_phone(target))?;
        println!("Deleted {}", removed.label());
    }
    Ok(())
}

fn handle_tags(config: &Config, book: &Path) -> anyhow::Result<()> {
    let store = open_store(book)?;
    let in_use = store.tags();

    println!("Suggested:");
    for tag in &config.tags.suggested {
        println!("  {tag}");
    }
    println!();
    println!("In use:");
    if in_use.is_empty() {
        println!("  (none)");
    }
    for tag in in_use {
        println!("  {tag}");
    }
    Ok(())
}

fn handle_countries(cmd: &CountriesCommand) {
    let countries = match &cmd.filter {
        Some(filter) => filter_countries(filter),
        None => COUNTRIES.iter().collect(),
    };
    for country in countries {
        println!("{}", country.label());
    }
}

fn handle_status(book: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(book)?;
    let stats = store.stats();

    if json {
        let status = serde_json::json!({
            "contacts_path": book,
            "total_contacts": stats.total_contacts,
            "distinct_tags": stats.distinct_tags,
            "file_size_bytes": stats.file_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("contacts status");
        println!("---------------");
        println!("Contacts file: {}", book.display());
        println!("Contacts:      {}", stats.total_contacts);
        println!("Tags:          {}", stats.distinct_tags);
        println!("File size:     {} bytes", stats.file_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Contacts file:   {}", config.contacts_path().display());
                println!();
                println!("[Display]");
                println!("  Sort by name:    {}", config.display.sort_by_name);
                println!(
                    "  Default country: {}",
                    config.display.default_country.as_deref().unwrap_or("(none)")
                );
                println!("  Format:          {:?}", config.display.format);
                println!();
                println!("[Tags]");
                println!("  Suggested:       {}", config.tags.suggested.join(", "));
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
