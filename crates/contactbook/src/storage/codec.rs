//! JSON-lines encoding for the contacts file.
//!
//! Each contact is one compact JSON object on its own line.

use std::collections::HashSet;
use std::path::Path;

use tracing::trace;

use crate::contact::Contact;
use crate::error::{Error, Result};

/// Encode contacts as newline-terminated JSON objects.
///
/// # Errors
///
/// Returns an error if a contact cannot be serialized.
pub fn encode(contacts: &[Contact]) -> Result<String> {
    let mut out = String::new();
    for contact in contacts {
        out.push_str(&serde_json::to_string(contact)?);
        out.push('\n');
    }
    Ok(out)
}

/// Decode the contents of a contacts file.
///
/// Blank lines are skipped. `path` is only used for error reporting.
///
/// # Errors
///
/// Returns [`Error::CorruptRecord`] with the 1-based line number of the
/// first line that is not a valid contact, or [`Error::DuplicateRecord`]
/// for the first line whose phone was already seen.
pub fn decode(text: &str, path: &Path) -> Result<Vec<Contact>> {
    let mut contacts = Vec::new();
    let mut phones = HashSet::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            trace!("Skipping blank line {} in {}", idx + 1, path.display());
            continue;
        }
        let contact: Contact =
            serde_json::from_str(line).map_err(|source| Error::CorruptRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        if !phones.insert(contact.phone.clone()) {
            return Err(Error::DuplicateRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                phone: contact.phone,
            });
        }
        contacts.push(contact);
    }
    Ok(contacts)
}
