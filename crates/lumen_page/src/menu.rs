//! Hamburger menu for narrow viewports.

/// Mobile menu state. Body scrolling is locked while the menu is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Flips the menu. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!(open = self.open, "mobile menu toggled");
        self.open
    }

    /// Closes the menu if open. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        if self.open {
            self.toggle();
            true
        } else {
            false
        }
    }

    /// True while the menu is shown.
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// True while the page behind the menu must not scroll.
    #[must_use]
    pub fn body_scroll_locked(self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_close() {
        let mut menu = MobileMenu::default();
        assert!(!menu.close());
        assert!(menu.toggle());
        assert!(menu.body_scroll_locked());
        assert!(menu.close());
        assert!(!menu.is_open());
        assert!(!menu.body_scroll_locked());
    }
}
