//! Visitor notifications.
//!
//! Narrow viewports get a toast that disappears on its own. Wide ones get a
//! blocking dialog the visitor dismisses.

/// Toast handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub u64);

/// A notification to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Self-dismissing banner at the top of the screen.
    Toast {
        /// Handle for the matching expiry.
        id: ToastId,
        /// Text.
        message: String,
    },
    /// Modal alert.
    Dialog {
        /// Text.
        message: String,
    },
}

impl Notice {
    /// The text shown.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Toast { message, .. } | Self::Dialog { message } => message,
        }
    }
}

/// Chooses the notification kind and hands out toast ids.
#[derive(Clone, Debug, Default)]
pub struct Notifier {
    next_toast: u64,
}

impl Notifier {
    /// Builds a notice for a viewport in (`mobile`) or out of mobile mode.
    pub fn notify(&mut self, message: impl Into<String>, mobile: bool) -> Notice {
        let message = message.into();
        tracing::debug!(%message, mobile, "notice");
        if mobile {
            let id = ToastId(self.next_toast);
            self.next_toast += 1;
            Notice::Toast { id, message }
        } else {
            Notice::Dialog { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_viewport() {
        let mut n = Notifier::default();
        assert_eq!(
            n.notify("hi", false),
            Notice::Dialog {
                message: "hi".into()
            }
        );
        let a = n.notify("a", true);
        let b = n.notify("b", true);
        assert!(matches!(a, Notice::Toast { id: ToastId(0), .. }));
        assert!(matches!(b, Notice::Toast { id: ToastId(1), .. }));
        assert_eq!(b.message(), "b");
    }
}
