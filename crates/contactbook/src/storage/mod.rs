//! Storage layer for contactbook.
//!
//! This module provides the file-backed contact store. The whole collection
//! lives in memory and is rewritten to disk after every successful mutation.

pub mod codec;

use std::path::{Path, PathBuf};

use regex::RegexBuilder;
use tracing::{debug, info};

use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::validation::validate_contact;

/// Storage engine for contacts.
///
/// Provides:
/// - Validated insertion with phone-number uniqueness
/// - In-place replacement and deletion
/// - Case-insensitive regex search over names, phones, and tags
/// - Full-file rewrite persistence in JSON-lines format
#[derive(Debug)]
pub struct ContactStore {
    /// Path to the contacts file, `None` for an in-memory store.
    path: Option<PathBuf>,
    /// Contacts in storage order.
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Open or create a contact store at the given path.
    ///
    /// Creates the parent directories if they don't exist. A missing file is
    /// treated as an empty store and is only written on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be read, or a record in it cannot be decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let contacts = if path.exists() {
            debug!("Loading contacts from {}", path.display());
            let text = std::fs::read_to_string(&path)?;
            codec::decode(&text, &path)?
        } else {
            debug!("No contacts file at {}, starting empty", path.display());
            Vec::new()
        };

        debug!("Loaded {} contacts from {}", contacts.len(), path.display());
        Ok(Self {
            path: Some(path),
            contacts,
        })
    }

    /// Create an empty store that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            contacts: Vec::new(),
        }
    }

    /// Get the path to the contacts file, if the store is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Check whether the store holds no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Get a contact by its phone number.
    #[must_use]
    pub fn get(&self, phone: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.phone == phone)
    }

    /// Add a new contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the phone or email is malformed, the phone is
    /// already in use, or the store cannot be persisted.
    pub fn add(&mut self, contact: Contact) -> Result<()> {
        validate_contact(&contact)?;

        if self.get(&contact.phone).is_some() {
            return Err(Error::DuplicatePhone {
                phone: contact.phone,
            });
        }

        info!("Adding contact {}", contact.label());
        self.contacts.push(contact);
        self.persist()
    }

    /// Replace the contact stored under `old_phone` with `contact`.
    ///
    /// The replacement keeps the original position in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the new phone or email is malformed, no contact
    /// has `old_phone`, the new phone belongs to a different contact, or the
    /// store cannot be persisted.
    pub fn edit(&mut self, old_phone: &str, contact: Contact) -> Result<()> {
        validate_contact(&contact)?;

        let index = self
            .contacts
            .iter()
            .position(|c| c.phone == old_phone)
            .ok_or_else(|| Error::not_found(old_phone))?;

        if contact.phone != old_phone && self.get(&contact.phone).is_some() {
            return Err(Error::DuplicatePhone {
                phone: contact.phone,
            });
        }

        info!(
            "Replacing contact {} with {}",
            self.contacts[index].label(),
            contact.label()
        );
        self.contacts[index] = contact;
        self.persist()
    }

    /// Delete the contact with the given phone number.
    ///
    /// Returns the removed contact.
    ///
    /// # Errors
    ///
    /// Returns an error if no contact has that phone, or the store cannot be
    /// persisted.
    pub fn delete_by_phone(&mut self, phone: &str) -> Result<Contact> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.phone == phone)
            .ok_or_else(|| Error::not_found(phone))?;

        let removed = self.contacts.remove(index);
        info!("Deleted contact {}", removed.label());
        self.persist()?;
        Ok(removed)
    }

    /// Delete every contact whose name equals `name`, ignoring case.
    ///
    /// Returns the number of contacts removed.
    ///
    /// # Errors
    ///
    /// Returns an error if no contact has that name, or the store cannot be
    /// persisted.
    pub fn delete_by_name(&mut self, name: &str) -> Result<usize> {
        let needle = name.to_lowercase();
        let before = self.contacts.len();
        self.contacts.retain(|c| c.name.to_lowercase() != needle);

        let removed = before - self.contacts.len();
        if removed == 0 {
            return Err(Error::not_found(name));
        }

        info!("Deleted {} contact(s) named '{}'", removed, name);
        self.persist()?;
        Ok(removed)
    }

    /// Search contacts with a case-insensitive regular expression.
    ///
    /// A contact matches when the pattern is found anywhere in its name,
    /// phone, or one of its tags. Results keep storage order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile and
    /// [`Error::NoMatches`] if nothing matches.
    pub fn search(&self, pattern: &str) -> Result<Vec<&Contact>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        let results: Vec<&Contact> = self.contacts.iter().filter(|c| c.matches(&regex)).collect();
        debug!("Search '{}' matched {} contacts", pattern, results.len());

        if results.is_empty() {
            return Err(Error::NoMatches {
                pattern: pattern.to_string(),
            });
        }
        Ok(results)
    }

    /// List all contacts.
    ///
    /// With `sort_by_name` the result is stably ordered by lowercase name;
    /// otherwise storage order is kept.
    #[must_use]
    pub fn list(&self, sort_by_name: bool) -> Vec<&Contact> {
        let mut contacts: Vec<&Contact> = self.contacts.iter().collect();
        if sort_by_name {
            contacts.sort_by_cached_key(|c| c.name.to_lowercase());
        }
        contacts
    }

    /// Contacts carrying exactly `tag`, in storage order.
    #[must_use]
    pub fn with_tag(&self, tag: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.has_tag(tag)).collect()
    }

    /// All tags in use, deduplicated, in first-seen order.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.contacts.iter().flat_map(|c| c.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }

    /// Get store statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let file_size_bytes = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map_or(0, |m| m.len());

        StoreStats {
            total_contacts: self.contacts.len(),
            distinct_tags: self.tags().len(),
            file_size_bytes,
        }
    }

    /// Rewrite the whole contacts file.
    ///
    /// Writes to a sibling temporary file first, then renames it over the
    /// target so an interrupted write never leaves a truncated file.
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let text = codec::encode(&self.contacts)?;
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, text)?;
        std::fs::rename(&tmp_path, path)?;
        debug!(
            "Persisted {} contacts to {}",
            self.contacts.len(),
            path.display()
        );
        Ok(())
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of contacts stored.
    pub total_contacts: usize,
    /// Number of distinct tags across all contacts.
    pub distinct_tags: usize,
    /// Size of the contacts file in bytes (0 when in memory or not yet written).
    pub file_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str, tags: &[&str]) -> Contact {
        Contact::new(
            name,
            phone,
            format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            tags.iter().copied(),
        )
    }

    fn create_test_store() -> ContactStore {
        let mut store = ContactStore::in_memory();
        store.add(contact("Charlie", "+11234567890", &["Work"])).unwrap();
        store.add(contact("alice", "+919876543210", &["Family", "Friends"])).unwrap();
        store.add(contact("Bob", "+441234567890", &["Friends"])).unwrap();
        store
    }

    #[test]
    fn test_in_memory_is_empty() {
        let store = ContactStore::in_memory();
        assert!(store.is_empty());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_add_and_get() {
        let store = create_test_store();
        assert_eq!(store.len(), 3);
        let bob = store.get("+441234567890").unwrap();
        assert_eq!(bob.name, "Bob");
    }

    #[test]
    fn test_add_rejects_invalid_phone() {
        let mut store = ContactStore::in_memory();
        let err = store.add(contact("Bad", "12345", &[])).unwrap_err();
        assert!(matches!(err, Error::InvalidPhone { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_invalid_email() {
        let mut store = ContactStore::in_memory();
        let bad = Contact::new("Bad", "+11234567890", "not-an-email", Vec::<String>::new());
        let err = store.add(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidEmail { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_phone() {
        let mut store = create_test_store();
        let err = store.add(contact("Other", "+11234567890", &[])).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhone { ref phone } if phone == "+11234567890"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut store = create_test_store();
        store
            .edit(
                "+919876543210",
                contact("Alice Smith", "+919876543211", &["Work"]),
            )
            .unwrap();

        let listed = store.list(false);
        assert_eq!(listed[1].name, "Alice Smith");
        assert_eq!(listed[1].tags, vec!["Work"]);
        assert!(store.get("+919876543210").is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_edit_keeping_same_phone() {
        let mut store = create_test_store();
        store
            .edit("+441234567890", contact("Robert", "+441234567890", &[]))
            .unwrap();
        assert_eq!(store.get("+441234567890").unwrap().name, "Robert");
    }

    #[test]
    fn test_edit_rejects_phone_of_other_contact() {
        let mut store = create_test_store();
        let err = store.edit("+441234567890", contact("Bob", "+11234567890", &[])).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhone { .. }));
        assert_eq!(store.get("+441234567890").unwrap().name, "Bob");
    }

    #[test]
    fn test_edit_nonexistent() {
        let mut store = create_test_store();
        let err = store.edit("+10000000000", contact("Ghost", "+10000000001", &[])).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_validates_before_lookup() {
        let mut store = create_test_store();
        let err = store.edit("+10000000000", contact("Ghost", "bad", &[])).unwrap_err();
        assert!(matches!(err, Error::InvalidPhone { .. }));
    }

    #[test]
    fn test_delete_by_phone() {
        let mut store = create_test_store();
        let removed = store.delete_by_phone("+11234567890").unwrap();
        assert_eq!(removed.name, "Charlie");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_by_phone_nonexistent() {
        let mut store = create_test_store();
        let err = store.delete_by_phone("+10000000000").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_delete_by_name_ignores_case_and_removes_all() {
        let mut store = create_test_store();
        store.add(contact("ALICE", "+15550000000", &[])).unwrap();

        let removed = store.delete_by_name("Alice").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 2);
        assert!(store.list(false).iter().all(|c| c.name != "alice"));
    }

    #[test]
    fn test_delete_by_name_nonexistent() {
        let mut store = create_test_store();
        let err = store.delete_by_name("Nobody").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = create_test_store();
        let results = store.search("ALICE").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].phone, "+919876543210");
    }

    #[test]
    fn test_search_matches_phone_and_tags() {
        let store = create_test_store();

        let by_phone = store.search(r"^\+44").unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Bob");

        let by_tag = store.search("friends").unwrap();
        let names: Vec<&str> = by_tag.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob"]);
    }

    #[test]
    fn test_search_does_not_match_email() {
        let store = create_test_store();
        let err = store.search("example").unwrap_err();
        assert!(matches!(err, Error::NoMatches { .. }));
    }

    #[test]
    fn test_search_no_matches() {
        let store = create_test_store();
        let err = store.search("zzz").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_search_invalid_pattern() {
        let store = create_test_store();
        let err = store.search("[unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_search_rejects_lookaround_and_backreferences() {
        let store = create_test_store();
        for pattern in ["(?=Bob)", "(?<!a)lice", r"(b)\1"] {
            let err = store.search(pattern).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPattern { .. }),
                "{pattern} should be rejected"
            );
        }
    }

    #[test]
    fn test_with_tag_is_exact() {
        let store = create_test_store();
        let names: Vec<&str> = store
            .with_tag("Friends")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["alice", "Bob"]);
        assert!(store.with_tag("friends").is_empty());
        assert!(store.with_tag("Friend").is_empty());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let store = create_test_store();
        let names: Vec<&str> = store.list(true).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_list_storage_order() {
        let store = create_test_store();
        let names: Vec<&str> = store.list(false).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "alice", "Bob"]);
    }

    #[test]
    fn test_list_sort_is_stable() {
        let mut store = ContactStore::in_memory();
        store.add(contact("sam", "+11111111111", &[])).unwrap();
        store.add(contact("Sam", "+12222222222", &[])).unwrap();
        let phones: Vec<&str> = store.list(true).iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, vec!["+11111111111", "+12222222222"]);
    }

    #[test]
    fn test_tags_first_seen_order() {
        let store = create_test_store();
        assert_eq!(store.tags(), vec!["Work", "Family", "Friends"]);
    }

    #[test]
    fn test_stats_in_memory() {
        let store = create_test_store();
        let stats = store.stats();
        assert_eq!(stats.total_contacts, 3);
        assert_eq!(stats.distinct_tags, 3);
        assert_eq!(stats.file_size_bytes, 0);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.jsonl");
        let store = ContactStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.path(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/contacts.jsonl");
        let mut store = ContactStore::open(&path).unwrap();
        assert!(path.parent().unwrap().exists());

        store.add(contact("Dana", "+11234567890", &[])).unwrap();
        assert!(path.exists());
        assert!(store.stats().file_size_bytes > 0);
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.jsonl");
        let mut store = ContactStore::open(&path).unwrap();
        store.add(contact("Dana", "+11234567890", &[])).unwrap();
        assert!(!dir.path().join("contacts.jsonl.tmp").exists());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_logs_below_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.jsonl");
        std::fs::write(
            &path,
            "{\"name\":\"A\",\"phone\":\"+11234567890\",\"email\":\"a@b.io\",\"tags\":[]}\n",
        )
        .unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = ContactStore::open(&path).unwrap();
            assert_eq!(store.len(), 1);
            assert!(!logs.text().contains("Loaded"), "{}", logs.text());

            store.add(contact("Dana", "+15551234567", &[])).unwrap();
        });

        let text = logs.text();
        assert!(!text.contains("Loaded"));
        assert!(!text.contains("Persisted"));
        assert!(text.contains("Adding contact Dana (+15551234567)"));
    }
}
