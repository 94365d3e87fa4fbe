//! # Page Error Types
//!
//! `FormError` messages are shown to the visitor verbatim.

use thiserror::Error;

/// Reasons a contact form submission is refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Name, email or message is empty.
    #[error("Please fill in all fields.")]
    MissingFields,

    /// The email does not look like `local@domain.tld`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// A submission is already in flight.
    #[error("Your message is already being sent.")]
    AlreadySending,
}

/// Errors that can occur while setting up the page.
#[derive(Error, Debug)]
pub enum PageError {
    /// The page config is not valid TOML for `PageConfig`.
    #[error("page config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value is out of its allowed range.
    #[error("invalid page configuration: {0}")]
    InvalidConfig(String),

    /// The email pattern failed to compile.
    #[error("email pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for page setup.
pub type PageResult<T> = Result<T, PageError>;
