//! Core contact record for contactbook.
//!
//! A [`Contact`] is replaced wholesale on edit; nothing in this crate patches
//! individual fields of a stored record.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single entry in the contact book.
///
/// The phone number is the unique key within a store. Validation of phone
/// and email happens when the contact is handed to the store, not here, so a
/// `Contact` can hold unvalidated form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name (free text).
    pub name: String,

    /// Full phone number including the `+` and country code.
    pub phone: String,

    /// Email address.
    pub email: String,

    /// Classification labels, in insertion order without duplicates.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Contact {
    /// Create a new contact.
    ///
    /// Repeated tags are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new<I, S>(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            tags: unique,
        }
    }

    /// The `"name (phone)"` label used to pick a contact from a list.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.phone)
    }

    /// Check whether `regex` matches the name, the phone, or any tag.
    #[must_use]
    pub fn matches(&self, regex: &Regex) -> bool {
        regex.is_match(&self.name)
            || regex.is_match(&self.phone)
            || self.tags.iter().any(|tag| regex.is_match(tag))
    }

    /// Check whether the contact carries `tag` (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)
    }
}

/// Extract the phone number from a `"name (phone)"` label.
///
/// Returns `None` when the label does not end with a parenthesised value.
#[must_use]
pub fn phone_from_label(label: &str) -> Option<&str> {
    let inner = label.trim_end().strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let phone = inner[open + 1..].trim();
    if phone.is_empty() {
        None
    } else {
        Some(phone)
    }
}
