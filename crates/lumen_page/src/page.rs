//! # Page
//!
//! Composes every page behaviour behind two entry points:
//!
//! ```text
//!   handle_input(event, now) ──> navbar, links, reveals, parallax (Scroll)
//!                                menu (Toggle, Escape, Resize, NavClick)
//!                                tilt (PointerMove, PointerLeaveHero)
//!                                cards (CardTouchStart/End)
//!                                re-sync (OrientationChange)
//!
//!   tick(now) ─────────────────> typewriter, card release, form completion,
//!                                toast expiry, orientation re-sync
//! ```
//!
//! Both return the `PageEffect`s the display must apply, in order.

use std::time::Duration;

use lumen_core::DelayQueue;
use lumen_shared::{InputEvent, Key, Vec2, Viewport};

use crate::config::PageConfig;
use crate::error::{FormError, PageResult};
use crate::form::{ContactFields, ContactForm, SubmitButton, THANK_YOU};
use crate::menu::MobileMenu;
use crate::motion::{parallax_offset, CardPress, Tilt};
use crate::nav::{current_section, scroll_target, NavLinks, Navbar, Section};
use crate::notice::{Notice, Notifier, ToastId};
use crate::reveal::{FadeInSet, TimelineReveal};
use crate::typewriter::Typewriter;

/// A change the display must apply.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEffect {
    /// Navbar `scrolled` style on or off.
    NavbarScrolled(bool),
    /// Highlighted nav link (`None` clears every highlight).
    ActiveLink(Option<String>),
    /// Smooth-scroll the document to `y`.
    ScrollTo {
        /// Target offset, px.
        y: f32,
    },
    /// Mobile menu shown or hidden; body scroll locked while shown.
    MenuOpen(bool),
    /// A fade-in element became visible.
    FadeInVisible {
        /// Element index.
        element: usize,
        /// Transition delay, s.
        delay_secs: f32,
    },
    /// A timeline item slid in.
    TimelineRevealed {
        /// Item index.
        item: usize,
    },
    /// Hero vertical translate.
    HeroParallax {
        /// Translate, px.
        translate_y: f32,
    },
    /// Profile image rotation.
    HeroTilt(Tilt),
    /// Card vertical offset.
    CardLift {
        /// Card index.
        card: usize,
        /// Offset, px (0 when released).
        offset_y: f32,
    },
    /// Subtitle text.
    Subtitle(String),
    /// Submit button look.
    SubmitButton(SubmitButton),
    /// Contact form fields cleared.
    FormCleared,
    /// Show a notification.
    Notify(Notice),
    /// Remove a toast.
    ToastExpired(ToastId),
    /// Re-apply the current scroll position.
    ScrollResync,
}

/// Deferred page work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageTimer {
    CardRelease(usize),
    SubmitComplete,
    ToastExpire(ToastId),
    OrientationResync,
}

/// Static page structure, as measured by the host.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    /// Sections in document order.
    pub sections: Vec<Section>,
    /// Nav link hrefs in document order.
    pub nav_links: Vec<String>,
    /// Fade-in groups: each inner list is one selector's element tops.
    pub fade_in_groups: Vec<Vec<f32>>,
    /// Timeline items as `(top, height)`.
    pub timeline: Vec<(f32, f32)>,
    /// Hero subtitle to type out.
    pub subtitle: Option<String>,
}

/// The page.
#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    viewport: Viewport,
    scroll_y: f32,
    sections: Vec<Section>,
    navbar: Navbar,
    links: NavLinks,
    menu: MobileMenu,
    fade_in: FadeInSet,
    timeline: TimelineReveal,
    cards: CardPress,
    typewriter: Option<Typewriter>,
    form: ContactForm,
    notifier: Notifier,
    timers: DelayQueue<PageTimer>,
}

impl Page {
    /// Builds the page at virtual time `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is out of range.
    pub fn new(config: PageConfig, layout: PageLayout, viewport: Viewport, now: Duration) -> PageResult<Self> {
        config.validate()?;

        let mut fade_in = FadeInSet::new();
        for group in layout.fade_in_groups {
            fade_in.register_group(group, config.stagger_step_secs);
        }
        let timeline = TimelineReveal::new(layout.timeline, config.timeline_offset_px, config.timeline_threshold);
        let typewriter = layout
            .subtitle
            .map(|text| Typewriter::new(text, now + config.typewriter_start(), config.typewriter_char()));
        let form = ContactForm::new(config.submit_delay())?;

        Ok(Self {
            viewport,
            scroll_y: 0.0,
            sections: layout.sections,
            navbar: Navbar::default(),
            links: NavLinks::new(layout.nav_links),
            menu: MobileMenu::default(),
            fade_in,
            timeline,
            cards: CardPress::default(),
            typewriter,
            form,
            notifier: Notifier::default(),
            timers: DelayQueue::new(),
            config,
        })
    }

    /// Effects for the initial scroll position (before any event).
    pub fn initial_effects(&mut self) -> Vec<PageEffect> {
        let mut effects = Vec::new();
        self.apply_scroll(&mut effects);
        effects
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, event: &InputEvent, now: Duration) -> Vec<PageEffect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::Scroll { y } => {
                self.scroll_y = *y;
                self.apply_scroll(&mut effects);
                effects.push(PageEffect::HeroParallax {
                    translate_y: parallax_offset(self.scroll_y, self.config.parallax_rate),
                });
            }
            InputEvent::Resize(viewport) => {
                self.viewport = *viewport;
                self.close_menu(&mut effects);
            }
            InputEvent::KeyDown(Key::Escape) => self.close_menu(&mut effects),
            InputEvent::MenuToggle => {
                let open = self.menu.toggle();
                effects.push(PageEffect::MenuOpen(open));
            }
            InputEvent::NavClick { href } => {
                if let Some(y) = scroll_target(&self.sections, href) {
                    effects.push(PageEffect::ScrollTo { y });
                }
                self.close_menu(&mut effects);
            }
            InputEvent::PointerMove(pointer) => {
                if let Some(tilt) = Tilt::from_pointer(*pointer, self.viewport, self.config.tilt_range_deg) {
                    effects.push(PageEffect::HeroTilt(tilt));
                }
            }
            InputEvent::PointerLeaveHero => effects.push(PageEffect::HeroTilt(Tilt::RESET)),
            InputEvent::CardTouchStart { card } => {
                self.cards.press(*card, self.config.card_lift_px);
                effects.push(PageEffect::CardLift {
                    card: *card,
                    offset_y: self.config.card_lift_px,
                });
            }
            InputEvent::CardTouchEnd { card } => {
                self.timers
                    .schedule(now + self.config.card_release(), PageTimer::CardRelease(*card));
            }
            InputEvent::OrientationChange => {
                self.timers
                    .schedule(now + self.config.orientation_resync(), PageTimer::OrientationResync);
            }
            InputEvent::Click(_) | InputEvent::TouchStart(_) | InputEvent::TouchMove(_) | InputEvent::KeyDown(_) => {}
        }
        effects
    }

    /// Runs page timers due at `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<PageEffect> {
        let mut effects = Vec::new();

        if let Some(text) = self.typewriter.as_mut().and_then(|tw| tw.advance(now)) {
            effects.push(PageEffect::Subtitle(text));
        }

        while let Some(timer) = self.timers.pop_expired(now) {
            match timer {
                PageTimer::CardRelease(card) => {
                    if self.cards.release(card) {
                        effects.push(PageEffect::CardLift { card, offset_y: 0.0 });
                    }
                }
                PageTimer::SubmitComplete => {
                    if self.form.complete() {
                        self.push_notice(THANK_YOU, now, &mut effects);
                        effects.push(PageEffect::FormCleared);
                        effects.push(PageEffect::SubmitButton(self.form.button()));
                    }
                }
                PageTimer::ToastExpire(id) => effects.push(PageEffect::ToastExpired(id)),
                PageTimer::OrientationResync => effects.push(PageEffect::ScrollResync),
            }
        }

        effects
    }

    /// Replaces the contact form fields.
    pub fn fill_form(&mut self, fields: ContactFields) {
        self.form.fill(fields);
    }

    /// Submits the contact form.
    ///
    /// A refused submission shows its reason as a notice. Submitting while a
    /// send is in flight is ignored.
    pub fn submit_form(&mut self, now: Duration) -> Vec<PageEffect> {
        let mut effects = Vec::new();
        match self.form.submit(now) {
            Ok(until) => {
                self.timers.schedule(until, PageTimer::SubmitComplete);
                effects.push(PageEffect::SubmitButton(self.form.button()));
            }
            Err(FormError::AlreadySending) => {
                tracing::debug!("submit ignored while sending");
            }
            Err(err) => self.push_notice(err.to_string(), now, &mut effects),
        }
        effects
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Navbar state.
    #[must_use]
    pub fn navbar(&self) -> Navbar {
        self.navbar
    }

    /// Navigation links.
    #[must_use]
    pub fn links(&self) -> &NavLinks {
        &self.links
    }

    /// Mobile menu.
    #[must_use]
    pub fn menu(&self) -> MobileMenu {
        self.menu
    }

    /// Fade-in elements.
    #[must_use]
    pub fn fade_in(&self) -> &FadeInSet {
        &self.fade_in
    }

    /// Timeline items.
    #[must_use]
    pub fn timeline(&self) -> &TimelineReveal {
        &self.timeline
    }

    /// Card offsets.
    #[must_use]
    pub fn cards(&self) -> &CardPress {
        &self.cards
    }

    /// Contact form.
    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Earliest pending timer.
    #[must_use]
    pub fn next_timer(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Tilt for a pointer, exposed for hosts that drive the hero directly.
    #[must_use]
    pub fn tilt_for(&self, pointer: Vec2) -> Option<Tilt> {
        Tilt::from_pointer(pointer, self.viewport, self.config.tilt_range_deg)
    }

    fn apply_scroll(&mut self, effects: &mut Vec<PageEffect>) {
        if let Some(scrolled) = self.navbar.update(self.scroll_y, self.config.navbar_threshold) {
            effects.push(PageEffect::NavbarScrolled(scrolled));
        }

        let offset = self.config.fade_in_offset(self.viewport.width);
        for element in self.fade_in.update(self.scroll_y, self.viewport, offset) {
            effects.push(PageEffect::FadeInVisible {
                element,
                delay_secs: self.fade_in.elements()[element].delay_secs,
            });
        }

        let current = current_section(&self.sections, self.scroll_y, self.config.nav_section_offset)
            .map(|s| s.id.as_str());
        if let Some(active) = self.links.activate(current) {
            effects.push(PageEffect::ActiveLink(active));
        }

        for item in self.timeline.update(self.scroll_y, self.viewport.height) {
            effects.push(PageEffect::TimelineRevealed { item });
        }
    }

    fn close_menu(&mut self, effects: &mut Vec<PageEffect>) {
        if self.menu.close() {
            effects.push(PageEffect::MenuOpen(false));
        }
    }

    fn push_notice(&mut self, message: impl Into<String>, now: Duration, effects: &mut Vec<PageEffect>) {
        let notice = self
            .notifier
            .notify(message, self.config.is_mobile(self.viewport.width));
        if let Notice::Toast { id, .. } = notice {
            self.timers
                .schedule(now + self.config.toast_lifetime(), PageTimer::ToastExpire(id));
        }
        effects.push(PageEffect::Notify(notice));
    }
}
