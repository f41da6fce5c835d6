//! CLI command definitions.
//!
//! Each argument struct also knows how to turn its flags into a [`Contact`],
//! playing the role of the add/edit form.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};

use crate::config::DisplayFormat;
use crate::contact::{phone_from_label, Contact};
use crate::country::{compose_phone, find_country, local_number};
use crate::error::{Error, Result};

/// Add command arguments.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("phone_source").required(true).args(["phone", "number"])))]
pub struct AddCommand {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Full phone number including country code (e.g. +919876543210)
    #[arg(short, long, conflicts_with_all = ["country", "number"])]
    pub phone: Option<String>,

    /// Country name or dial code to prefix the local number with
    #[arg(long, requires = "number")]
    pub country: Option<String>,

    /// Local 10 digit phone number
    #[arg(long)]
    pub number: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

impl AddCommand {
    /// Build the contact described by these arguments.
    ///
    /// `default_country` is used when a local number is given without
    /// `--country`.
    ///
    /// # Errors
    ///
    /// Returns an error if the country cannot be resolved.
    pub fn to_contact(&self, default_country: Option<&str>) -> Result<Contact> {
        let phone = match (&self.phone, &self.number) {
            (Some(phone), _) => phone.trim().to_string(),
            (None, Some(number)) => {
                let country = self.country.as_deref().or(default_country).ok_or_else(|| {
                    Error::MissingCountry {
                        number: number.clone(),
                    }
                })?;
                compose_phone(resolve_dial_code(country)?, number)
            }
            (None, None) => String::new(),
        };

        Ok(Contact::new(
            self.name.trim(),
            phone,
            self.email.trim(),
            self.tags.iter().map(|t| t.trim()),
        ))
    }
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Phone number or "name (phone)" label of the contact to edit
    pub target: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New full phone number including country code
    #[arg(short, long, conflicts_with_all = ["country", "number"])]
    pub phone: Option<String>,

    /// New country (keeps the current local number unless --number is given)
    #[arg(long)]
    pub country: Option<String>,

    /// New local 10 digit number (keeps the current dial code unless --country is given)
    #[arg(long)]
    pub number: Option<String>,

    /// New email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Replace all tags with these (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}

impl EditCommand {
    /// The phone number of the contact being edited.
    #[must_use]
    pub fn target_phone(&self) -> &str {
        target_phone(&self.target)
    }

    /// Build the full replacement for `current` from these arguments.
    ///
    /// Fields not given on the command line are carried over from `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--country` cannot be resolved.
    pub fn apply(&self, current: &Contact) -> Result<Contact> {
        let phone = if let Some(phone) = &self.phone {
            phone.trim().to_string()
        } else if self.country.is_some() || self.number.is_some() {
            let current_local = local_number(&current.phone);
            let dial_code = match &self.country {
                Some(country) => resolve_dial_code(country)?,
                None => &current.phone[..current.phone.len() - current_local.len()],
            };
            compose_phone(dial_code, self.number.as_deref().unwrap_or(current_local))
        } else {
            current.phone.clone()
        };

        let tags: Vec<String> = if self.clear_tags {
            Vec::new()
        } else if self.tags.is_empty() {
            current.tags.clone()
        } else {
            self.tags.iter().map(|t| t.trim().to_string()).collect()
        };

        Ok(Contact::new(
            self.name.as_deref().map_or(current.name.as_str(), str::trim),
            phone,
            self.email.as_deref().map_or(current.email.as_str(), str::trim),
            tags,
        ))
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("selector").required(true).args(["target", "name"])))]
pub struct DeleteCommand {
    /// Phone number or "name (phone)" label of the contact to delete
    pub target: Option<String>,

    /// Delete every contact with this name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Phone number or "name (phone)" label
    pub target: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Keep storage order instead of sorting by name
    #[arg(short, long)]
    pub unsorted: bool,

    /// Only show contacts carrying this tag (exact match)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Case-insensitive regular expression matched against name, phone, and tags
    pub pattern: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Countries command arguments.
#[derive(Debug, Args)]
pub struct CountriesCommand {
    /// Only show countries whose name or dial code contains this text
    pub filter: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl From<DisplayFormat> for OutputFormat {
    fn from(format: DisplayFormat) -> Self {
        match format {
            DisplayFormat::Plain => Self::Plain,
            DisplayFormat::Table => Self::Table,
            DisplayFormat::Json => Self::Json,
        }
    }
}

/// Resolve a phone number or `"name (phone)"` label to a phone number.
#[must_use]
pub fn target_phone(target: &str) -> &str {
    phone_from_label(target).unwrap_or_else(|| target.trim())
}

fn resolve_dial_code(country: &str) -> Result<&'static str> {
    find_country(country)
        .map(|c| c.dial_code)
        .ok_or_else(|| Error::UnknownCountry {
            query: country.to_string(),
        })
}
