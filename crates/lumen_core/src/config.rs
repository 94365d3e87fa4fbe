//! # Background Configuration
//!
//! Loaded once at startup from TOML. Every field has a default equal to the
//! page's hard-coded behaviour, so an empty file is a valid config.
//!
//! ```toml
//! seed = 42
//!
//! [field]
//! particles_wide = 60
//!
//! [effects]
//! line_chance = 0.1
//! ```

use std::path::Path;
use std::time::Duration;

use lumen_shared::constants as defaults;
use lumen_shared::Viewport;
use serde::{Deserialize, Serialize};

use crate::error::{BackgroundError, BackgroundResult};

/// Tuning for the particle field, sparkles and stars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Widths strictly above this use the "wide" counts.
    pub wide_breakpoint: f32,
    /// Particles on a wide viewport.
    pub particles_wide: usize,
    /// Particles on a narrow viewport.
    pub particles_narrow: usize,
    /// Sparkles on a wide viewport.
    pub sparkles_wide: usize,
    /// Sparkles on a narrow viewport.
    pub sparkles_narrow: usize,
    /// Stars on a wide viewport.
    pub stars_wide: usize,
    /// Stars on a narrow viewport.
    pub stars_narrow: usize,
    /// Smallest particle size (inclusive).
    pub particle_size_min: f32,
    /// Largest particle size (exclusive).
    pub particle_size_max: f32,
    /// Per-axis speed bound, px per frame.
    pub particle_max_speed: f32,
    /// Pointer repulsion radius, px.
    pub repulsion_radius: f32,
    /// Displacement factor at full force.
    pub repulsion_strength: f32,
    /// Opacity while inside the repulsion radius.
    pub emphasis_opacity: f32,
    /// Extra scale at full force.
    pub emphasis_scale_gain: f32,
    /// Chance that a sparkle is large.
    pub large_sparkle_chance: f64,
    /// Upper bound of sparkle animation delay, seconds.
    pub sparkle_max_delay_secs: f32,
    /// Upper bound of star animation delay, seconds.
    pub star_max_delay_secs: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            wide_breakpoint: defaults::MOBILE_BREAKPOINT,
            particles_wide: defaults::PARTICLES_WIDE,
            particles_narrow: defaults::PARTICLES_NARROW,
            sparkles_wide: defaults::SPARKLES_WIDE,
            sparkles_narrow: defaults::SPARKLES_NARROW,
            stars_wide: defaults::STARS_WIDE,
            stars_narrow: defaults::STARS_NARROW,
            particle_size_min: defaults::PARTICLE_SIZE_MIN,
            particle_size_max: defaults::PARTICLE_SIZE_MAX,
            particle_max_speed: defaults::PARTICLE_MAX_SPEED,
            repulsion_radius: defaults::REPULSION_RADIUS,
            repulsion_strength: defaults::REPULSION_STRENGTH,
            emphasis_opacity: defaults::EMPHASIS_OPACITY,
            emphasis_scale_gain: defaults::EMPHASIS_SCALE_GAIN,
            large_sparkle_chance: defaults::LARGE_SPARKLE_CHANCE,
            sparkle_max_delay_secs: defaults::SPARKLE_MAX_DELAY_SECS,
            star_max_delay_secs: defaults::STAR_MAX_DELAY_SECS,
        }
    }
}

impl FieldConfig {
    /// Particle target count for a viewport.
    #[must_use]
    pub fn particle_count(&self, viewport: Viewport) -> usize {
        self.pick(viewport, self.particles_wide, self.particles_narrow)
    }

    /// Sparkle target count for a viewport.
    #[must_use]
    pub fn sparkle_count(&self, viewport: Viewport) -> usize {
        self.pick(viewport, self.sparkles_wide, self.sparkles_narrow)
    }

    /// Star target count for a viewport.
    #[must_use]
    pub fn star_count(&self, viewport: Viewport) -> usize {
        self.pick(viewport, self.stars_wide, self.stars_narrow)
    }

    fn pick(&self, viewport: Viewport, wide: usize, narrow: usize) -> usize {
        if viewport.is_wider_than(self.wide_breakpoint) {
            wide
        } else {
            narrow
        }
    }
}

/// Tuning for sparkle bursts and connection lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Ambient burst timer period, ms.
    pub burst_interval_ms: u64,
    /// Chance per ambient tick.
    pub timer_burst_chance: f64,
    /// Chance per pointer-move sample.
    pub pointer_burst_chance: f64,
    /// Chance per touch-move sample.
    pub touch_burst_chance: f64,
    /// Chance of a connection line per move sample.
    pub line_chance: f64,
    /// Burst lifetime, ms.
    pub burst_lifetime_ms: u64,
    /// Line lifetime, ms.
    pub line_lifetime_ms: u64,
    /// Rays per burst.
    pub burst_rays: u8,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            burst_interval_ms: defaults::BURST_INTERVAL_MS,
            timer_burst_chance: defaults::TIMER_BURST_CHANCE,
            pointer_burst_chance: defaults::POINTER_BURST_CHANCE,
            touch_burst_chance: defaults::TOUCH_BURST_CHANCE,
            line_chance: defaults::LINE_CHANCE,
            burst_lifetime_ms: defaults::BURST_LIFETIME_MS,
            line_lifetime_ms: defaults::LINE_LIFETIME_MS,
            burst_rays: defaults::BURST_RAY_COUNT,
        }
    }
}

impl EffectsConfig {
    /// Ambient burst timer period.
    #[must_use]
    pub fn burst_interval(&self) -> Duration {
        Duration::from_millis(self.burst_interval_ms)
    }

    /// Burst lifetime.
    #[must_use]
    pub fn burst_lifetime(&self) -> Duration {
        Duration::from_millis(self.burst_lifetime_ms)
    }

    /// Line lifetime.
    #[must_use]
    pub fn line_lifetime(&self) -> Duration {
        Duration::from_millis(self.line_lifetime_ms)
    }
}

/// Top-level background configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Seed for the ChaCha stream.
    pub seed: u64,
    /// Particle field tuning.
    pub field: FieldConfig,
    /// Effects tuning.
    pub effects: EffectsConfig,
}

impl BackgroundConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed TOML and `InvalidConfig` for
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> BackgroundResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn load(path: impl AsRef<Path>) -> BackgroundResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BackgroundError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), seed = config.seed, "background config loaded");
        Ok(config)
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> BackgroundResult<()> {
        let f = &self.field;
        let e = &self.effects;

        for (name, v) in [
            ("field.wide_breakpoint", f.wide_breakpoint),
            ("field.particle_size_min", f.particle_size_min),
            ("field.particle_size_max", f.particle_size_max),
            ("field.particle_max_speed", f.particle_max_speed),
            ("field.repulsion_radius", f.repulsion_radius),
            ("field.repulsion_strength", f.repulsion_strength),
            ("field.emphasis_opacity", f.emphasis_opacity),
            ("field.emphasis_scale_gain", f.emphasis_scale_gain),
            ("field.sparkle_max_delay_secs", f.sparkle_max_delay_secs),
            ("field.star_max_delay_secs", f.star_max_delay_secs),
        ] {
            if !v.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {v}")));
            }
        }

        for (name, p) in [
            ("field.large_sparkle_chance", f.large_sparkle_chance),
            ("effects.timer_burst_chance", e.timer_burst_chance),
            ("effects.pointer_burst_chance", e.pointer_burst_chance),
            ("effects.touch_burst_chance", e.touch_burst_chance),
            ("effects.line_chance", e.line_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be in [0, 1], got {p}")));
            }
        }

        if !(f.particle_size_min >= 0.0 && f.particle_size_min < f.particle_size_max) {
            return Err(invalid(format!(
                "field particle size range [{}, {}) is empty",
                f.particle_size_min, f.particle_size_max
            )));
        }
        if !(f.repulsion_radius > 0.0) {
            return Err(invalid(format!(
                "field.repulsion_radius must be positive, got {}",
                f.repulsion_radius
            )));
        }
        for (name, v) in [
            ("field.particle_max_speed", f.particle_max_speed),
            ("field.repulsion_strength", f.repulsion_strength),
            ("field.sparkle_max_delay_secs", f.sparkle_max_delay_secs),
            ("field.star_max_delay_secs", f.star_max_delay_secs),
        ] {
            if !(v >= 0.0) {
                return Err(invalid(format!("{name} must be non-negative, got {v}")));
            }
        }

        if e.burst_interval_ms == 0 {
            return Err(invalid("effects.burst_interval_ms must be non-zero".into()));
        }
        if e.burst_rays == 0 {
            return Err(invalid("effects.burst_rays must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> BackgroundError {
    BackgroundError::InvalidConfig(msg)
}
