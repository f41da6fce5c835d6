//! Field validation for contacts.
//!
//! Both patterns are anchored and must match the whole field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::Contact;
use crate::error::{Error, Result};

/// `+`, a 1-4 digit country code, then a 10 digit local number.
pub const PHONE_PATTERN: &str = r"^\+\d{1,4}\d{10}$";

/// A simple `local@domain.tld` shape.
pub const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w{2,}$";

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// Check a full phone number against [`PHONE_PATTERN`].
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Check an email address against [`EMAIL_PATTERN`].
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate the phone, then the email, of `contact`.
///
/// # Errors
///
/// Returns [`Error::InvalidPhone`] or [`Error::InvalidEmail`] for the first
/// field that fails.
pub fn validate_contact(contact: &Contact) -> Result<()> {
    if !is_valid_phone(&contact.phone) {
        return Err(Error::InvalidPhone {
            phone: contact.phone.clone(),
        });
    }
    if !is_valid_email(&contact.email) {
        return Err(Error::InvalidEmail {
            email: contact.email.clone(),
        });
    }
    Ok(())
}
