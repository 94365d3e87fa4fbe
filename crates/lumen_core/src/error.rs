//! # Background Error Types
//!
//! The simulation itself cannot fail. Errors only come from loading and
//! checking configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up the background.
#[derive(Error, Debug)]
pub enum BackgroundError {
    /// A config value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file is not valid TOML for `BackgroundConfig`.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for background setup.
pub type BackgroundResult<T> = Result<T, BackgroundError>;
