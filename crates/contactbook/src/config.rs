//! Configuration management for contactbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::country::find_country;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactbook";

/// Default contacts file name.
const CONTACTS_FILE_NAME: &str = "contacts.jsonl";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CONTACTBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTBOOK_`, `__` between
///    section and key, e.g. `CONTACTBOOK_DISPLAY__SORT_BY_NAME=false`)
/// 2. TOML config file at `~/.config/contactbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
    /// Tag configuration.
    pub tags: TagConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the contacts file.
    /// Defaults to `~/.local/share/contactbook/contacts.jsonl`
    pub contacts_path: Option<PathBuf>,
}

/// How contacts are presented by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Sort listings case-insensitively by name.
    pub sort_by_name: bool,
    /// Country (name or dial code) used when `--country` is omitted.
    pub default_country: Option<String>,
    /// Output format used when `--format` is omitted.
    pub format: DisplayFormat,
}

/// Output format setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFormat {
    /// One block per contact.
    #[default]
    Plain,
    /// Aligned columns.
    Table,
    /// JSON array.
    Json,
}

/// Tag-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Tags offered as suggestions alongside the ones already in use.
    pub suggested: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sort_by_name: true,
            default_country: None,
            format: DisplayFormat::Plain,
        }
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            suggested: default_suggested_tags(),
        }
    }
}

/// Default tag suggestions.
fn default_suggested_tags() -> Vec<String> {
    ["Myself", "Family", "Relative", "Friends", "Work"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default country is unknown or a suggested tag
    /// is blank.
    pub fn validate(&self) -> Result<()> {
        if let Some(country) = &self.display.default_country {
            if find_country(country).is_none() {
                return Err(Error::config_validation(format!(
                    "unknown default_country: {country}"
                )));
            }
        }

        if self.tags.suggested.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::config_validation(
                "suggested tags must not be blank",
            ));
        }

        Ok(())
    }

    /// Get the contacts file path, resolving defaults if not set.
    #[must_use]
    pub fn contacts_path(&self) -> PathBuf {
        self.storage
            .contacts_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CONTACTS_FILE_NAME))
    }
}
