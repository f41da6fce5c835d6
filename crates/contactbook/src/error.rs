//! Error types for contactbook.
//!
//! This module defines all error types used throughout the contactbook crate.
//! Most variants describe bad user input and carry enough context to be shown
//! to the user verbatim; the rest wrap I/O, serialization, and configuration
//! failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// Phone number does not match `+<country code><10 digits>`.
    #[error("invalid phone number '{phone}': must include country code followed by 10 digits")]
    InvalidPhone {
        /// The rejected phone number.
        phone: String,
    },

    /// Email address does not match `local@domain.tld`.
    #[error("invalid email format: '{email}'")]
    InvalidEmail {
        /// The rejected email address.
        email: String,
    },

    /// Another contact already uses this phone number.
    #[error("a contact with phone number {phone} already exists")]
    DuplicatePhone {
        /// The conflicting phone number.
        phone: String,
    },

    /// A country name or dial code could not be resolved.
    #[error("unknown country: '{query}'")]
    UnknownCountry {
        /// The name or dial code that was looked up.
        query: String,
    },

    /// A local number was given without a country and no default is set.
    #[error("no country given for local number '{number}': pass --country or set display.default_country")]
    MissingCountry {
        /// The local number that needed a dial code.
        number: String,
    },

    // === Lookup Errors ===
    /// No contact matched the given phone number or name.
    #[error("contact not found: {key}")]
    ContactNotFound {
        /// The phone number or name that was looked up.
        key: String,
    },

    /// A search pattern matched no contacts.
    #[error("no contact matches '{pattern}'")]
    NoMatches {
        /// The search pattern.
        pattern: String,
    },

    /// A search pattern is not a valid regular expression.
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The underlying error.
        #[source]
        source: regex::Error,
    },

    // === Storage Errors ===
    /// A line of the contacts file could not be decoded.
    #[error("corrupt record in {path} at line {line}: {source}")]
    CorruptRecord {
        /// Path to the contacts file.
        path: PathBuf,
        /// 1-based line number of the bad record.
        line: usize,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Two lines of the contacts file share a phone number.
    #[error("duplicate phone {phone} in {path} at line {line}")]
    DuplicateRecord {
        /// Path to the contacts file.
        path: PathBuf,
        /// 1-based line number of the second record with this phone.
        line: usize,
        /// The phone number that appears twice.
        phone: String,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a contact-not-found error for the given phone or name.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::ContactNotFound { key: key.into() }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means nothing matched a lookup or search.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ContactNotFound { .. } | Self::NoMatches { .. })
    }

    /// Check if this error was caused by bad user input rather than the
    /// environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPhone { .. }
                | Self::InvalidEmail { .. }
                | Self::DuplicatePhone { .. }
                | Self::UnknownCountry { .. }
                | Self::MissingCountry { .. }
                | Self::ContactNotFound { .. }
                | Self::NoMatches { .. }
                | Self::InvalidPattern { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_phone_display() {
        let err = Error::InvalidPhone {
            phone: "12345".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("12345"));
        assert!(msg.contains("country code"));
    }

    #[test]
    fn test_duplicate_phone_display() {
        let err = Error::DuplicatePhone {
            phone: "+911234567890".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "a contact with phone number +911234567890 already exists"
        );
    }

    #[test]
    fn test_not_found_helper() {
        let err = Error::not_found("+911234567890");
        assert_eq!(err.to_string(), "contact not found: +911234567890");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_no_matches_is_not_found() {
        let err = Error::NoMatches {
            pattern: "zed".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.is_user_error());
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("[unclosed").unwrap_err();
        let err = Error::InvalidPattern {
            pattern: "[unclosed".to_string(),
            source,
        };
        assert!(err.to_string().contains("[unclosed"));
        assert!(err.is_user_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_missing_country_display() {
        let err = Error::MissingCountry {
            number: "9876543210".to_string(),
        };
        assert!(err.to_string().contains("--country"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_corrupt_record_display() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::CorruptRecord {
            path: PathBuf::from("/tmp/contacts.jsonl"),
            line: 3,
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/contacts.jsonl"));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn test_duplicate_record_display() {
        let err = Error::DuplicateRecord {
            path: PathBuf::from("/tmp/contacts.jsonl"),
            line: 2,
            phone: "+11234567890".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate phone +11234567890 in /tmp/contacts.jsonl at line 2"
        );
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("unknown default_country");
        assert!(err.to_string().contains("unknown default_country"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
