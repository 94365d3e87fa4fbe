//! # Tuning Constants
//!
//! Default values for the background and the page.
//!
//! **NOTE:** These are only the defaults. Every one of them can be
//! overridden from `config/background.toml` at startup.

// =============================================================================
// VIEWPORT
// =============================================================================

/// Viewports at or below this width (px) use the "mobile" entity counts.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Display refresh rate the system clock aims for.
pub const TARGET_FPS: u32 = 60;

// =============================================================================
// PARTICLE FIELD
// =============================================================================

/// Particles on a wide viewport.
pub const PARTICLES_WIDE: usize = 30;
/// Particles on a narrow viewport.
pub const PARTICLES_NARROW: usize = 15;

/// Sparkles on a wide viewport.
pub const SPARKLES_WIDE: usize = 15;
/// Sparkles on a narrow viewport.
pub const SPARKLES_NARROW: usize = 8;

/// Stars on a wide viewport.
pub const STARS_WIDE: usize = 25;
/// Stars on a narrow viewport.
pub const STARS_NARROW: usize = 12;

/// Smallest particle diameter (px, inclusive).
pub const PARTICLE_SIZE_MIN: f32 = 2.0;
/// Largest particle diameter (px, exclusive).
pub const PARTICLE_SIZE_MAX: f32 = 6.0;

/// Per-axis particle speed bound (px per frame).
pub const PARTICLE_MAX_SPEED: f32 = 0.25;

/// Pointer repulsion radius (px).
pub const REPULSION_RADIUS: f32 = 100.0;
/// Fraction of the pointer offset applied as displacement at full force.
pub const REPULSION_STRENGTH: f32 = 0.01;

/// Opacity of a particle inside the repulsion radius.
pub const EMPHASIS_OPACITY: f32 = 0.9;
/// Extra scale at full force (`scale = 1 + force * gain`).
pub const EMPHASIS_SCALE_GAIN: f32 = 0.5;

/// Chance that a sparkle is drawn large.
pub const LARGE_SPARKLE_CHANCE: f64 = 0.3;
/// Upper bound of a sparkle's animation delay (seconds).
pub const SPARKLE_MAX_DELAY_SECS: f32 = 3.0;
/// Upper bound of a star's animation delay (seconds).
pub const STAR_MAX_DELAY_SECS: f32 = 5.0;

// =============================================================================
// EPHEMERAL EFFECTS
// =============================================================================

/// Period of the ambient burst timer (ms).
pub const BURST_INTERVAL_MS: u64 = 2000;
/// Chance that an ambient timer tick spawns a burst.
pub const TIMER_BURST_CHANCE: f64 = 0.3;
/// Chance that a pointer-move sample spawns a burst.
pub const POINTER_BURST_CHANCE: f64 = 0.02;
/// Chance that a touch-move sample spawns a burst.
pub const TOUCH_BURST_CHANCE: f64 = 0.03;
/// Chance that a pointer/touch-move sample spawns a connection line.
pub const LINE_CHANCE: f64 = 0.05;

/// Lifetime of a sparkle burst (ms).
pub const BURST_LIFETIME_MS: u64 = 1000;
/// Lifetime of a connection line (ms).
pub const LINE_LIFETIME_MS: u64 = 3000;

/// Rays per sparkle burst.
pub const BURST_RAY_COUNT: u8 = 8;
