//! Error type for assembling the portfolio.

use lumen_core::BackgroundError;
use lumen_page::PageError;
use thiserror::Error;

/// Errors that can occur while building a `Portfolio`.
#[derive(Error, Debug)]
pub enum LumenError {
    /// Background config could not be loaded or is invalid.
    #[error("background: {0}")]
    Background(#[from] BackgroundError),

    /// Page setup failed.
    #[error("page: {0}")]
    Page(#[from] PageError),
}

/// Result type for portfolio setup.
pub type LumenResult<T> = Result<T, LumenError>;
