//! # Hero & Card Motion
//!
//! Parallax on scroll, pointer-driven tilt of the profile image, and the
//! lift cards get while touched.

use std::collections::BTreeMap;

use lumen_shared::{Vec2, Viewport};

/// Hero vertical translate for a scroll offset.
#[inline]
#[must_use]
pub fn parallax_offset(scroll_y: f32, rate: f32) -> f32 {
    scroll_y * rate
}

/// Profile image rotation, degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub rotate_x: f32,
    /// Rotation about the vertical axis.
    pub rotate_y: f32,
}

impl Tilt {
    /// Flat.
    pub const RESET: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Tilt for a pointer position, or `None` when the pointer is below the
    /// first screen or the viewport is degenerate.
    #[must_use]
    pub fn from_pointer(pointer: Vec2, viewport: Viewport, range_deg: f32) -> Option<Self> {
        if pointer.y >= viewport.height {
            return None;
        }
        let n = viewport.normalize(pointer)?;
        Some(Self {
            rotate_x: (n.y - 0.5) * range_deg,
            rotate_y: (n.x - 0.5) * -range_deg,
        })
    }
}

/// Touch feedback on cards.
///
/// Release is delayed; the caller schedules `release` after the delay.
#[derive(Clone, Debug, Default)]
pub struct CardPress {
    lifted: BTreeMap<usize, f32>,
}

impl CardPress {
    /// Lifts `card` by `offset` px.
    pub fn press(&mut self, card: usize, offset: f32) {
        self.lifted.insert(card, offset);
    }

    /// Drops `card` back. Returns `true` if it was lifted.
    pub fn release(&mut self, card: usize) -> bool {
        self.lifted.remove(&card).is_some()
    }

    /// Current vertical offset of `card`.
    #[must_use]
    pub fn offset(&self, card: usize) -> f32 {
        self.lifted.get(&card).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax() {
        assert_eq!(parallax_offset(200.0, -0.5), -100.0);
        assert_eq!(parallax_offset(0.0, -0.5), 0.0);
    }

    #[test]
    fn test_tilt_center_is_flat() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(Tilt::from_pointer(Vec2::new(500.0, 400.0), vp, 10.0), Some(Tilt::RESET));
    }

    #[test]
    fn test_tilt_corners() {
        let vp = Viewport::new(1000.0, 800.0);
        let t = Tilt::from_pointer(Vec2::new(0.0, 0.0), vp, 10.0).unwrap();
        assert_eq!(t.rotate_x, -5.0);
        assert_eq!(t.rotate_y, 5.0);
    }

    #[test]
    fn test_tilt_ignores_pointer_below_fold() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(Tilt::from_pointer(Vec2::new(10.0, 800.0), vp, 10.0), None);
        assert_eq!(Tilt::from_pointer(Vec2::new(10.0, 10.0), Viewport::new(0.0, 800.0), 10.0), None);
    }

    #[test]
    fn test_card_press() {
        let mut cards = CardPress::default();
        cards.press(3, -5.0);
        assert_eq!(cards.offset(3), -5.0);
        assert!(cards.release(3));
        assert!(!cards.release(3));
        assert_eq!(cards.offset(3), 0.0);
    }
}
