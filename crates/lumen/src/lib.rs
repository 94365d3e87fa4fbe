//! # LUMEN
//!
//! The portfolio page as a single scene: the animated background from
//! `lumen_core` and the page behaviours from `lumen_page`, driven by one
//! frame loop.
//!
//! ## Crates
//!
//! - `lumen_shared`: geometry, input events, constants
//! - `lumen_core`: particle field, effects, frame loop
//! - `lumen_page`: navigation, reveals, contact form
//! - `lumen`: composition and the headless demo

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod portfolio;
pub mod tracing_renderer;

pub use error::{LumenError, LumenResult};
pub use portfolio::Portfolio;
pub use tracing_renderer::TracingRenderer;

pub use lumen_core;
pub use lumen_page;
pub use lumen_shared;
