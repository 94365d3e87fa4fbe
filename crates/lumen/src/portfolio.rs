//! # Portfolio
//!
//! The whole page as one `Scene`: every input event goes to the background
//! first, then to the page. Page effects are buffered until the host takes
//! them.

use std::time::Duration;

use lumen_core::{Background, BackgroundConfig, Renderer, Scene};
use lumen_page::{ContactFields, Page, PageConfig, PageEffect, PageLayout};
use lumen_shared::InputEvent;

use crate::error::LumenResult;

/// Background plus page.
#[derive(Debug)]
pub struct Portfolio {
    background: Background,
    page: Page,
    pending: Vec<PageEffect>,
}

impl Portfolio {
    /// Builds both halves against the renderer's viewport at t = 0.
    ///
    /// # Errors
    ///
    /// Returns an error if either config is invalid.
    pub fn new<R: Renderer + ?Sized>(
        background: BackgroundConfig,
        page: PageConfig,
        layout: PageLayout,
        renderer: &mut R,
    ) -> LumenResult<Self> {
        let viewport = renderer.viewport();
        let background = Background::new(background, renderer)?;
        let mut page = Page::new(page, layout, viewport, Duration::ZERO)?;
        let pending = page.initial_effects();
        Ok(Self {
            background,
            page,
            pending,
        })
    }

    /// Sends one event to both halves.
    pub fn dispatch<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, renderer: &mut R) {
        self.background.handle_input(event, now, renderer);
        let effects = self.page.handle_input(event, now);
        self.pending.extend(effects);
    }

    /// Advances both halves one frame.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) {
        self.background.frame(now, renderer);
        let effects = self.page.tick(now);
        self.pending.extend(effects);
    }

    /// Fills and submits the contact form.
    pub fn submit_contact(&mut self, fields: ContactFields, now: Duration) {
        self.page.fill_form(fields);
        let effects = self.page.submit_form(now);
        self.pending.extend(effects);
    }

    /// Takes every page effect produced since the last call.
    pub fn take_page_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.pending)
    }

    /// The background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// The page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl Scene for Portfolio {
    fn handle_input<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, renderer: &mut R) {
        self.dispatch(event, now, renderer);
    }

    fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) {
        Portfolio::frame(self, now, renderer);
    }
}
