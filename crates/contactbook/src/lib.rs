//! `contactbook` - A single-user contact book
//!
//! This library provides validated contact records, a file-backed store with
//! regex search, and the country dial-code table used to compose phone
//! numbers. The `contacts` binary is a command-line front end over it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod country;
pub mod error;
pub mod logging;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use contact::{phone_from_label, Contact};
pub use country::{compose_phone, find_country, Country};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{ContactStore, StoreStats};
