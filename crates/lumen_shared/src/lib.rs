//! # LUMEN Shared
//!
//! Common types used by the background core and the page behaviours.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a renderer or display surface
//! - a clock or timer
//! - a random number generator
//!
//! If you need any of those, put them in `lumen_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod events;
pub mod math;

pub use constants::{BURST_RAY_COUNT, MOBILE_BREAKPOINT, TARGET_FPS};
pub use events::{InputEvent, Key};
pub use math::{Vec2, Viewport};
