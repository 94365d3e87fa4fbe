//! # Scroll Reveals
//!
//! Two one-way reveals:
//! - fade-in: element becomes visible once its top clears a line near the
//!   viewport bottom
//! - timeline: item slides in once enough of it is on screen
//!
//! Neither ever hides again.

use lumen_shared::Viewport;

/// An element that fades in on scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeIn {
    /// Offset from the document top, px.
    pub top: f32,
    /// CSS transition delay, s.
    pub delay_secs: f32,
    /// Sticky visibility.
    pub visible: bool,
}

/// Every fade-in element on the page.
#[derive(Clone, Debug, Default)]
pub struct FadeInSet {
    elements: Vec<FadeIn>,
}

impl FadeInSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one group of elements (one selector on the page).
    ///
    /// The n-th element of a group is delayed by `n * stagger_step` seconds.
    /// Returns the index of the first registered element.
    pub fn register_group<I>(&mut self, tops: I, stagger_step: f32) -> usize
    where
        I: IntoIterator<Item = f32>,
    {
        let first = self.elements.len();
        for (index, top) in tops.into_iter().enumerate() {
            self.elements.push(FadeIn {
                top,
                delay_secs: index as f32 * stagger_step,
                visible: false,
            });
        }
        first
    }

    /// Reveals every element whose top is above `viewport.height - offset`.
    ///
    /// Returns the indices that just became visible.
    pub fn update(&mut self, scroll_y: f32, viewport: Viewport, offset: f32) -> Vec<usize> {
        let line = viewport.height - offset;
        let mut revealed = Vec::new();
        for (i, el) in self.elements.iter_mut().enumerate() {
            if !el.visible && el.top - scroll_y < line {
                el.visible = true;
                revealed.push(i);
            }
        }
        revealed
    }

    /// All elements.
    #[must_use]
    pub fn elements(&self) -> &[FadeIn] {
        &self.elements
    }
}

/// A timeline entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineItem {
    /// Offset from the document top, px.
    pub top: f32,
    /// Height, px.
    pub height: f32,
    /// Horizontal offset while hidden, px.
    pub start_offset: f32,
    /// Set once the item has slid in.
    pub revealed: bool,
}

impl TimelineItem {
    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.revealed {
            1.0
        } else {
            0.0
        }
    }

    /// Current horizontal offset, px.
    #[must_use]
    pub fn offset_x(&self) -> f32 {
        if self.revealed {
            0.0
        } else {
            self.start_offset
        }
    }
}

/// Share of `[top, top + height)` inside `[scroll_y, scroll_y + viewport_height)`.
#[must_use]
pub fn visible_ratio(top: f32, height: f32, scroll_y: f32, viewport_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let start = top.max(scroll_y);
    let end = (top + height).min(scroll_y + viewport_height);
    ((end - start) / height).clamp(0.0, 1.0)
}

/// Timeline items revealed once each.
#[derive(Clone, Debug, Default)]
pub struct TimelineReveal {
    items: Vec<TimelineItem>,
    threshold: f32,
}

impl TimelineReveal {
    /// Creates the timeline. Even items start `offset` px to the left, odd
    /// ones to the right.
    #[must_use]
    pub fn new<I>(items: I, offset: f32, threshold: f32) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, (top, height))| TimelineItem {
                top,
                height,
                start_offset: if i % 2 == 0 { -offset } else { offset },
                revealed: false,
            })
            .collect();
        Self { items, threshold }
    }

    /// Reveals items with at least `threshold` of their height on screen.
    ///
    /// Returns the indices revealed by this call.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32) -> Vec<usize> {
        let mut revealed = Vec::new();
        for (i, item) in self.items.iter_mut().enumerate() {
            if item.revealed {
                continue;
            }
            let ratio = visible_ratio(item.top, item.height, scroll_y, viewport_height);
            if ratio > 0.0 && ratio >= self.threshold {
                item.revealed = true;
                revealed.push(i);
            }
        }
        revealed
    }

    /// All items.
    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_offset_and_stagger() {
        let mut set = FadeInSet::new();
        set.register_group([700.0, 1200.0, 2000.0], 0.1);
        assert!((set.elements()[2].delay_secs - 0.2).abs() < 1e-6);

        let vp = Viewport::new(1024.0, 800.0);
        // line at 800 - 150 = 650
        assert!(set.update(0.0, vp, 150.0).is_empty());
        assert_eq!(set.update(51.0, vp, 150.0), vec![0]);
        assert_eq!(set.update(600.0, vp, 150.0), vec![1]);
    }

    #[test]
    fn test_fade_in_is_sticky() {
        let mut set = FadeInSet::new();
        set.register_group([100.0], 0.1);
        let vp = Viewport::new(1024.0, 800.0);
        assert_eq!(set.update(0.0, vp, 150.0), vec![0]);
        assert!(set.update(0.0, vp, 150.0).is_empty());
        assert!(set.elements()[0].visible);
    }

    #[test]
    fn test_timeline_alternates_sides() {
        let t = TimelineReveal::new([(0.0, 100.0), (200.0, 100.0), (400.0, 100.0)], 50.0, 0.3);
        let offsets: Vec<_> = t.items().iter().map(TimelineItem::offset_x).collect();
        assert_eq!(offsets, vec![-50.0, 50.0, -50.0]);
        assert!(t.items().iter().all(|i| i.opacity() == 0.0));
    }

    #[test]
    fn test_timeline_threshold() {
        let mut t = TimelineReveal::new([(1000.0, 200.0)], 50.0, 0.3);
        // 50px of 200 on screen
        assert!(t.update(250.0, 800.0).is_empty());
        // 60px of 200 on screen
        assert_eq!(t.update(260.0, 800.0), vec![0]);
        assert_eq!(t.items()[0].offset_x(), 0.0);
        assert_eq!(t.items()[0].opacity(), 1.0);
        // scrolled away, stays revealed
        assert!(t.update(0.0, 800.0).is_empty());
        assert!(t.items()[0].revealed);
    }

    #[test]
    fn test_visible_ratio() {
        assert_eq!(visible_ratio(0.0, 100.0, 0.0, 800.0), 1.0);
        assert_eq!(visible_ratio(900.0, 100.0, 0.0, 800.0), 0.0);
        assert_eq!(visible_ratio(750.0, 100.0, 0.0, 800.0), 0.5);
        assert_eq!(visible_ratio(0.0, 0.0, 0.0, 800.0), 0.0);
    }
}
