//! Input events delivered by the host surface.
//!
//! The core reacts to pointer, touch and resize events. Everything else is
//! consumed by the page behaviours and ignored by the core.

use crate::math::{Vec2, Viewport};

/// Keyboard key (only the ones the page reacts to).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,
    /// Any other key
    Other,
}

/// Events from the input collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // =========================================================================
    // Pointer / touch (core + page)
    // =========================================================================
    /// Pointer moved to viewport coordinates.
    PointerMove(Vec2),

    /// Pointer click at viewport coordinates.
    Click(Vec2),

    /// Touch began. `None` when the event carried no touch point.
    TouchStart(Option<Vec2>),

    /// Touch moved. `None` when the event carried no touch point.
    TouchMove(Option<Vec2>),

    /// Viewport changed size. Carries the new dimensions.
    Resize(Viewport),

    // =========================================================================
    // Page-only
    // =========================================================================
    /// Document scrolled to the given vertical offset (px).
    Scroll {
        /// `window.scrollY` equivalent
        y: f32,
    },

    /// Key pressed.
    KeyDown(Key),

    /// Pointer left the hero section.
    PointerLeaveHero,

    /// A navigation link was clicked.
    NavClick {
        /// Link target, e.g. `#about`
        href: String,
    },

    /// The hamburger button was pressed.
    MenuToggle,

    /// A card received a touch start.
    CardTouchStart {
        /// Card index in document order
        card: usize,
    },

    /// A card received a touch end.
    CardTouchEnd {
        /// Card index in document order
        card: usize,
    },

    /// Device orientation changed.
    OrientationChange,
}

impl InputEvent {
    /// Pointer position carried by this event, if any.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Self::PointerMove(p) | Self::Click(p) => Some(*p),
            Self::TouchStart(p) | Self::TouchMove(p) => *p,
            _ => None,
        }
    }
}
