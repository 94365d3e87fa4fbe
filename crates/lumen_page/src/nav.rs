//! # Navigation
//!
//! Navbar styling, active link highlighting and smooth-scroll targets.

/// A page section, in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// Element id (links point at `#id`).
    pub id: String,
    /// Offset from the document top, px.
    pub top: f32,
    /// Height, px.
    pub height: f32,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Navbar style state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navbar {
    scrolled: bool,
}

impl Navbar {
    /// Recomputes the `scrolled` flag. Returns the new value if it changed.
    pub fn update(&mut self, scroll_y: f32, threshold: f32) -> Option<bool> {
        let scrolled = scroll_y > threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }

    /// True once the page is scrolled past the threshold.
    #[must_use]
    pub fn is_scrolled(self) -> bool {
        self.scrolled
    }
}

/// The section the reader is in.
///
/// A section is current while `top - offset <= scroll_y < top - offset + height`.
/// When sections overlap the last one in document order wins.
#[must_use]
pub fn current_section(sections: &[Section], scroll_y: f32, offset: f32) -> Option<&Section> {
    sections
        .iter()
        .rev()
        .find(|s| {
            let start = s.top - offset;
            scroll_y >= start && scroll_y < start + s.height
        })
}

/// Resolves a link href (`#id`) to the top of its section.
#[must_use]
pub fn scroll_target(sections: &[Section], href: &str) -> Option<f32> {
    let id = href.strip_prefix('#').unwrap_or(href);
    sections.iter().find(|s| s.id == id).map(|s| s.top)
}

/// Navigation links and which one is highlighted.
#[derive(Clone, Debug, Default)]
pub struct NavLinks {
    hrefs: Vec<String>,
    active: Option<usize>,
}

impl NavLinks {
    /// Creates the link set from hrefs in document order.
    #[must_use]
    pub fn new<I, S>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hrefs: hrefs.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Highlights the link pointing at `section_id` and clears every other.
    ///
    /// Returns the newly active href if the highlight changed.
    pub fn activate(&mut self, section_id: Option<&str>) -> Option<Option<String>> {
        let next = section_id.and_then(|id| {
            self.hrefs
                .iter()
                .position(|h| h.strip_prefix('#') == Some(id))
        });
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(self.active_href().map(str::to_owned))
    }

    /// The highlighted link.
    #[must_use]
    pub fn active_href(&self) -> Option<&str> {
        self.active.map(|i| self.hrefs[i].as_str())
    }

    /// All links.
    #[must_use]
    pub fn hrefs(&self) -> &[String] {
        &self.hrefs
    }
}
