//! # LUMEN Page
//!
//! The portfolio page around the animated background: navigation, reveals,
//! hero motion, the typewriter subtitle and the contact form.
//!
//! ## Design Principles
//!
//! 1. **No DOM** - every behaviour is a plain state machine
//! 2. **Effects out** - callers get `PageEffect`s and apply them
//! 3. **Virtual time** - delays run on a `DelayQueue`, polled by `tick`
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumen_page::{Page, PageConfig, PageLayout};
//!
//! let mut page = Page::new(PageConfig::default(), layout, viewport, Duration::ZERO)?;
//! for effect in page.handle_input(&InputEvent::Scroll { y: 420.0 }, now) {
//!     display.apply(effect);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod form;
pub mod menu;
pub mod motion;
pub mod nav;
pub mod notice;
pub mod page;
pub mod reveal;
pub mod typewriter;

pub use config::PageConfig;
pub use error::{FormError, PageError, PageResult};
pub use form::{ContactFields, ContactForm, FormState, SubmitButton, EMAIL_PATTERN};
pub use menu::MobileMenu;
pub use motion::{parallax_offset, CardPress, Tilt};
pub use nav::{current_section, scroll_target, NavLinks, Navbar, Section};
pub use notice::{Notice, Notifier, ToastId};
pub use page::{Page, PageEffect, PageLayout};
pub use reveal::{visible_ratio, FadeIn, FadeInSet, TimelineItem, TimelineReveal};
pub use typewriter::Typewriter;
