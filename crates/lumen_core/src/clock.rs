//! # Frame Clocks
//!
//! The frame loop never asks the OS for the time. It asks a `FrameClock`
//! to suspend until the next display refresh and report how long the
//! background has been running.
//!
//! - `SystemClock`: real time, paced to a target refresh rate
//! - `ManualClock`: virtual time, advanced by a fixed step per frame

use std::time::{Duration, Instant};

use lumen_shared::TARGET_FPS;

/// Source of display-refresh ticks.
pub trait FrameClock {
    /// Suspends until the next frame and returns the elapsed time since the
    /// clock started.
    ///
    /// Returns `None` once the display is gone; the loop then ends.
    fn next_frame(&mut self) -> Option<Duration>;
}

impl<C: FrameClock + ?Sized> FrameClock for &mut C {
    fn next_frame(&mut self) -> Option<Duration> {
        (**self).next_frame()
    }
}

impl<C: FrameClock + ?Sized> FrameClock for Box<C> {
    fn next_frame(&mut self) -> Option<Duration> {
        (**self).next_frame()
    }
}

/// Frame duration for a refresh rate.
#[must_use]
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

// =============================================================================
// MANUAL CLOCK
// =============================================================================

/// Deterministic clock for tests and headless runs.
///
/// Every `next_frame` advances virtual time by `step`.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Duration,
    step: Duration,
    remaining: Option<u64>,
}

impl ManualClock {
    /// Creates a clock that advances by `step` per frame, forever.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
            remaining: None,
        }
    }

    /// Creates a clock paced like a display at `fps`.
    #[must_use]
    pub fn at_fps(fps: u32) -> Self {
        Self::new(frame_duration(fps))
    }

    /// Stops after `frames` more frames.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Moves virtual time forward without producing a frame.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Per-frame step.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at_fps(TARGET_FPS)
    }
}

impl FrameClock for ManualClock {
    fn next_frame(&mut self) -> Option<Duration> {
        match self.remaining {
            Some(0) => return None,
            Some(ref mut n) => *n -= 1,
            None => {}
        }
        self.now += self.step;
        Some(self.now)
    }
}

// =============================================================================
// SYSTEM CLOCK
// =============================================================================

/// Real-time clock paced to a refresh rate.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last_frame: Instant,
    frame_duration: Duration,
}

impl SystemClock {
    /// Creates a clock paced at `fps`.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            frame_duration: frame_duration(fps),
        }
    }

    /// Target frame duration.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Sleeps for most of the remaining budget, then spins for precision.
    fn wait_for_next_frame(&self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed >= self.frame_duration {
            return;
        }
        let remaining = self.frame_duration - elapsed;
        if remaining > Duration::from_micros(1000) {
            std::thread::sleep(remaining - Duration::from_micros(500));
        }
        while self.last_frame.elapsed() < self.frame_duration {
            std::hint::spin_loop();
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FrameClock for SystemClock {
    fn next_frame(&mut self) -> Option<Duration> {
        self.wait_for_next_frame();
        self.last_frame = Instant::now();
        Some(self.last_frame.duration_since(self.start))
    }
}
