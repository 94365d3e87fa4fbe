//! # Page Configuration
//!
//! Every magic number the page behaviours use, in one TOML-loadable struct.
//! Defaults reproduce the live page.

use std::time::Duration;

use lumen_shared::MOBILE_BREAKPOINT;
use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Page tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Scroll offset above which the navbar is `scrolled`.
    pub navbar_threshold: f32,
    /// Sections count as current this many px before their top.
    pub nav_section_offset: f32,
    /// Fade-in trigger distance from the viewport bottom (wide).
    pub fade_in_offset_wide: f32,
    /// Fade-in trigger distance from the viewport bottom (mobile).
    pub fade_in_offset_mobile: f32,
    /// Width at or below which the page is in mobile mode.
    pub mobile_breakpoint: f32,
    /// Hero translate per px scrolled.
    pub parallax_rate: f32,
    /// Full tilt swing in degrees across the viewport.
    pub tilt_range_deg: f32,
    /// Delay before the subtitle starts typing, ms.
    pub typewriter_start_ms: u64,
    /// Delay between typed characters, ms.
    pub typewriter_char_ms: u64,
    /// Simulated contact form round trip, ms.
    pub submit_delay_ms: u64,
    /// Mobile toast lifetime, ms.
    pub toast_lifetime_ms: u64,
    /// Delay before a released card drops back, ms.
    pub card_release_ms: u64,
    /// Card vertical offset while pressed, px.
    pub card_lift_px: f32,
    /// Visible share of a timeline item that reveals it.
    pub timeline_threshold: f32,
    /// Horizontal start offset of hidden timeline items, px.
    pub timeline_offset_px: f32,
    /// Transition delay added per fade-in element, s.
    pub stagger_step_secs: f32,
    /// Delay before re-syncing scroll after an orientation change, ms.
    pub orientation_resync_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            nav_section_offset: 150.0,
            fade_in_offset_wide: 150.0,
            fade_in_offset_mobile: 100.0,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            parallax_rate: -0.5,
            tilt_range_deg: 10.0,
            typewriter_start_ms: 1500,
            typewriter_char_ms: 80,
            submit_delay_ms: 2000,
            toast_lifetime_ms: 3000,
            card_release_ms: 150,
            card_lift_px: -5.0,
            timeline_threshold: 0.3,
            timeline_offset_px: 50.0,
            stagger_step_secs: 0.1,
            orientation_resync_ms: 100,
        }
    }
}

impl PageConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed TOML and `InvalidConfig` for
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> PageResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> PageResult<()> {
        for (name, v) in [
            ("navbar_threshold", self.navbar_threshold),
            ("nav_section_offset", self.nav_section_offset),
            ("fade_in_offset_wide", self.fade_in_offset_wide),
            ("fade_in_offset_mobile", self.fade_in_offset_mobile),
            ("mobile_breakpoint", self.mobile_breakpoint),
            ("parallax_rate", self.parallax_rate),
            ("tilt_range_deg", self.tilt_range_deg),
            ("card_lift_px", self.card_lift_px),
            ("timeline_threshold", self.timeline_threshold),
            ("timeline_offset_px", self.timeline_offset_px),
            ("stagger_step_secs", self.stagger_step_secs),
        ] {
            if !v.is_finite() {
                return Err(PageError::InvalidConfig(format!("{name} must be finite, got {v}")));
            }
        }
        if !(0.0..=1.0).contains(&self.timeline_threshold) {
            return Err(PageError::InvalidConfig(format!(
                "timeline_threshold must be in [0, 1], got {}",
                self.timeline_threshold
            )));
        }
        if self.typewriter_char_ms == 0 {
            return Err(PageError::InvalidConfig("typewriter_char_ms must be non-zero".into()));
        }
        if !(self.stagger_step_secs >= 0.0) {
            return Err(PageError::InvalidConfig(format!(
                "stagger_step_secs must be non-negative, got {}",
                self.stagger_step_secs
            )));
        }
        Ok(())
    }

    /// True when `width` is in mobile mode.
    #[must_use]
    pub fn is_mobile(&self, width: f32) -> bool {
        width <= self.mobile_breakpoint
    }

    /// Fade-in trigger distance for a viewport width.
    #[must_use]
    pub fn fade_in_offset(&self, width: f32) -> f32 {
        if self.is_mobile(width) {
            self.fade_in_offset_mobile
        } else {
            self.fade_in_offset_wide
        }
    }

    /// Typewriter start delay.
    #[must_use]
    pub fn typewriter_start(&self) -> Duration {
        Duration::from_millis(self.typewriter_start_ms)
    }

    /// Typewriter per-character delay.
    #[must_use]
    pub fn typewriter_char(&self) -> Duration {
        Duration::from_millis(self.typewriter_char_ms)
    }

    /// Simulated submit delay.
    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Toast lifetime.
    #[must_use]
    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_lifetime_ms)
    }

    /// Card release delay.
    #[must_use]
    pub fn card_release(&self) -> Duration {
        Duration::from_millis(self.card_release_ms)
    }

    /// Orientation re-sync delay.
    #[must_use]
    pub fn orientation_resync(&self) -> Duration {
        Duration::from_millis(self.orientation_resync_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page() {
        let c = PageConfig::default();
        assert_eq!(c.fade_in_offset(1024.0), 150.0);
        assert_eq!(c.fade_in_offset(768.0), 100.0);
        assert_eq!(c.typewriter_start(), Duration::from_millis(1500));
        assert_eq!(c.submit_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml() {
        let c = PageConfig::from_toml_str("navbar_threshold = 40.0\n").unwrap();
        assert_eq!(c.navbar_threshold, 40.0);
        assert_eq!(c.nav_section_offset, 150.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(PageConfig::from_toml_str("timeline_threshold = 1.5\n").is_err());
        assert!(PageConfig::from_toml_str("typewriter_char_ms = 0\n").is_err());
        assert!(matches!(
            PageConfig::from_toml_str("no_such_key = 1\n"),
            Err(PageError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for text in ["parallax_rate = inf\n", "tilt_range_deg = nan\n", "stagger_step_secs = inf\n"] {
            let err = PageConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, PageError::InvalidConfig(ref m) if m.contains("finite")));
        }
    }
}
