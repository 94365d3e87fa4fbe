//! Hero subtitle typing effect.

use std::time::Duration;

/// Reveals a string one character at a time.
///
/// The full text stays on screen until typing starts. At `start` the text
/// is cleared and the first character appears; one more follows every
/// `per_char`.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    start: Duration,
    per_char: Duration,
    shown: Option<usize>,
}

impl Typewriter {
    /// Starts typing `text` at `start`.
    #[must_use]
    pub fn new(text: impl Into<String>, start: Duration, per_char: Duration) -> Self {
        Self {
            text: text.into(),
            start,
            per_char: per_char.max(Duration::from_millis(1)),
            shown: None,
        }
    }

    /// Number of characters visible at `now`, or `None` before typing starts.
    #[must_use]
    pub fn visible_chars(&self, now: Duration) -> Option<usize> {
        let elapsed = now.checked_sub(self.start)?;
        let total = self.text.chars().count();
        if total == 0 {
            return Some(0);
        }
        let typed = elapsed.as_nanos() / self.per_char.as_nanos() + 1;
        Some(usize::try_from(typed).map_or(total, |n| n.min(total)))
    }

    /// Text on screen at `now`.
    #[must_use]
    pub fn text_at(&self, now: Duration) -> &str {
        match self.visible_chars(now) {
            None => &self.text,
            Some(n) => self.prefix(n),
        }
    }

    /// Advances to `now`. Returns the new text if it changed.
    pub fn advance(&mut self, now: Duration) -> Option<String> {
        let visible = self.visible_chars(now)?;
        if self.shown == Some(visible) {
            return None;
        }
        self.shown = Some(visible);
        Some(self.prefix(visible).to_owned())
    }

    /// True once every character is shown.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.shown == Some(self.text.chars().count())
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn prefix(&self, chars: usize) -> &str {
        match self.text.char_indices().nth(chars) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}
