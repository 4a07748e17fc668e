//! Error types for the roster registration system
//!
//! This module defines all error types used throughout the crate.
//!
//! Every variant corresponds to a condition that is recovered at the point
//! of the triggering user action; nothing here is fatal to the process.

use thiserror::Error;

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the roster registration system
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was empty after trimming
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    /// Email did not match the expected address syntax
    #[error("invalid email format: {0}")]
    InvalidEmail(String),

    /// Phone was present but did not match the expected format
    #[error("invalid phone format: {0}")]
    InvalidPhone(String),

    /// Birthdate lies after the current date
    #[error("birthdate {0} is in the future")]
    BirthdateInFuture(chrono::NaiveDate),

    /// Username already taken by an existing record
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Email already registered by an existing record
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Store write/initialization errors (file locked, unwritable, ...)
    #[error("store error: {0}")]
    Storage(String),

    /// Store read errors (display refresh could not read the store)
    #[error("load error: {0}")]
    Load(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row encoding/decoding errors from the tabular backing file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a missing-required-field error naming the field
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Create a store write/initialization error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a store read error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by the candidate record itself rather than
    /// the backing store
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidEmail(_)
                | Self::InvalidPhone(_)
                | Self::BirthdateInFuture(_)
                | Self::DuplicateUsername(_)
                | Self::DuplicateEmail(_)
        )
    }
}
