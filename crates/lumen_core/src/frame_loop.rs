//! # Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. WAIT                                                             │
//! │    └─ clock.next_frame() -> now (None ends the loop)                │
//! │                                                                     │
//! │ 2. INPUT                                                            │
//! │    └─ drain queue, scene.handle_input(event, now) per event         │
//! │                                                                     │
//! │ 3. FRAME                                                            │
//! │    ├─ ambient timer + expiry sweep                                  │
//! │    └─ particle step against the latest pointer                      │
//! │                                                                     │
//! │ 4. RECORD                                                           │
//! │    └─ FrameStats into the accumulator, warn on budget overrun       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread. Input arrives through the bounded queue,
//! so the last pointer sample delivered before a frame is the one it uses.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lumen_shared::{InputEvent, TARGET_FPS};

use crate::clock::{frame_duration, FrameClock};
use crate::input::InputReceiver;
use crate::render::Renderer;

/// Something the frame loop can drive.
pub trait Scene {
    /// Applies one input event at virtual time `now`.
    fn handle_input<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, renderer: &mut R);

    /// Advances one frame at virtual time `now`.
    fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R);
}

/// Shared stop flag. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the loop to stop after the current frame.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Configuration for the frame loop.
#[derive(Clone, Debug)]
pub struct FrameLoopConfig {
    /// Warn when a frame's work exceeds `budget`.
    pub enable_timing_logs: bool,
    /// Work budget per frame.
    pub budget: Duration,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            enable_timing_logs: false,
            budget: frame_duration(TARGET_FPS),
        }
    }
}

/// Timing for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Input handling time in microseconds.
    pub input_us: u64,
    /// Simulation time in microseconds.
    pub simulate_us: u64,
    /// Total work time in microseconds.
    pub total_us: u64,
    /// Events processed this frame.
    pub events_processed: u32,
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of input handling times.
    pub input_us_sum: u64,
    /// Sum of simulation times.
    pub simulate_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    budget_us: u64,
}

impl FrameStatsAccumulator {
    /// Creates an accumulator measuring against `budget`.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            input_us_sum: 0,
            simulate_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            budget_us: budget.as_micros() as u64,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.input_us_sum += stats.input_us;
        self.simulate_us_sum += stats.simulate_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);

        if stats.total_us > self.budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame work time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns the fastest frame in milliseconds, or 0 before any frame.
    #[must_use]
    pub fn min_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.min_frame_us as f64 / 1000.0
    }

    /// Returns the slowest frame in milliseconds.
    #[must_use]
    pub fn max_frame_ms(&self) -> f64 {
        self.max_frame_us as f64 / 1000.0
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        self.frames_recorded += other.frames_recorded;
        self.total_us_sum += other.total_us_sum;
        self.input_us_sum += other.input_us_sum;
        self.simulate_us_sum += other.simulate_us_sum;
        self.min_frame_us = self.min_frame_us.min(other.min_frame_us);
        self.max_frame_us = self.max_frame_us.max(other.max_frame_us);
        self.frames_over_budget += other.frames_over_budget;
    }

    /// Returns the share of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new(frame_duration(TARGET_FPS))
    }
}

/// Result of a finished run.
#[derive(Clone, Debug)]
pub struct LoopSummary {
    /// Frames simulated.
    pub frames: u64,
    /// Input events handed to the scene.
    pub events_processed: u64,
    /// Input events dropped by a full queue.
    pub events_dropped: u64,
    /// Virtual time of the last frame.
    pub last_frame_at: Duration,
    /// Work-time statistics.
    pub timing: FrameStatsAccumulator,
}

impl LoopSummary {
    /// Appends a later run's results.
    pub fn merge(&mut self, later: &Self) {
        self.frames += later.frames;
        self.events_processed += later.events_processed;
        self.events_dropped = self.events_dropped.max(later.events_dropped);
        if later.frames > 0 {
            self.last_frame_at = later.last_frame_at;
        }
        self.timing.merge(&later.timing);
    }
}

/// Drives a `Scene` from a `FrameClock` and an input queue.
pub struct FrameLoop<C: FrameClock> {
    clock: C,
    input: InputReceiver,
    config: FrameLoopConfig,
    cancel: CancelHandle,
}

impl<C: FrameClock> FrameLoop<C> {
    /// Creates a loop with default config.
    #[must_use]
    pub fn new(clock: C, input: InputReceiver) -> Self {
        Self::with_config(clock, input, FrameLoopConfig::default())
    }

    /// Creates a loop with explicit config.
    #[must_use]
    pub fn with_config(clock: C, input: InputReceiver, config: FrameLoopConfig) -> Self {
        Self {
            clock,
            input,
            config,
            cancel: CancelHandle::new(),
        }
    }

    /// Handle that stops the loop from elsewhere.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Runs until cancelled or the clock stops.
    pub fn run<S, R>(&mut self, scene: &mut S, renderer: &mut R) -> LoopSummary
    where
        S: Scene,
        R: Renderer + ?Sized,
    {
        self.run_inner(scene, renderer, None)
    }

    /// Runs at most `frames` frames.
    pub fn run_frames<S, R>(&mut self, frames: u64, scene: &mut S, renderer: &mut R) -> LoopSummary
    where
        S: Scene,
        R: Renderer + ?Sized,
    {
        self.run_inner(scene, renderer, Some(frames))
    }

    fn run_inner<S, R>(&mut self, scene: &mut S, renderer: &mut R, limit: Option<u64>) -> LoopSummary
    where
        S: Scene,
        R: Renderer + ?Sized,
    {
        let mut timing = FrameStatsAccumulator::new(self.config.budget);
        let mut frames = 0u64;
        let mut events_processed = 0u64;
        let mut last_frame_at = Duration::ZERO;

        while !self.cancel.is_cancelled() && limit.map_or(true, |n| frames < n) {
            let Some(now) = self.clock.next_frame() else {
                tracing::debug!(frames, "frame clock stopped");
                break;
            };

            let frame_start = Instant::now();
            let mut events = 0u32;
            for event in self.input.drain() {
                scene.handle_input(&event, now, renderer);
                events += 1;
            }
            let input_done = Instant::now();

            scene.frame(now, renderer);
            let frame_end = Instant::now();

            let stats = FrameStats {
                frame: frames,
                input_us: input_done.duration_since(frame_start).as_micros() as u64,
                simulate_us: frame_end.duration_since(input_done).as_micros() as u64,
                total_us: frame_end.duration_since(frame_start).as_micros() as u64,
                events_processed: events,
            };
            timing.record(stats);

            if self.config.enable_timing_logs && stats.total_us > self.config.budget.as_micros() as u64 {
                tracing::warn!(
                    frame = frames,
                    total_ms = stats.total_us as f64 / 1000.0,
                    budget_ms = self.config.budget.as_micros() as f64 / 1000.0,
                    "frame exceeded budget"
                );
            }

            frames += 1;
            events_processed += u64::from(events);
            last_frame_at = now;
        }

        LoopSummary {
            frames,
            events_processed,
            events_dropped: self.input.dropped_count(),
            last_frame_at,
            timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::InputQueue;
    use crate::render::RecordingRenderer;
    use lumen_shared::{Vec2, Viewport};

    #[derive(Default)]
    struct CountingScene {
        events: Vec<(InputEvent, Duration)>,
        frames: Vec<Duration>,
    }

    impl Scene for CountingScene {
        fn handle_input<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, _renderer: &mut R) {
            self.events.push((event.clone(), now));
        }

        fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, _renderer: &mut R) {
            self.frames.push(now);
        }
    }

    fn renderer() -> RecordingRenderer {
        RecordingRenderer::new(Viewport::default())
    }

    #[test]
    fn test_run_frames_stops_at_limit() {
        let queue = InputQueue::new(16);
        let mut lp = FrameLoop::new(ManualClock::new(Duration::from_millis(10)), queue.receiver());
        let mut scene = CountingScene::default();

        let summary = lp.run_frames(5, &mut scene, &mut renderer());

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.last_frame_at, Duration::from_millis(50));
        assert_eq!(scene.frames.len(), 5);
        assert_eq!(summary.timing.frames_recorded, 5);
    }

    #[test]
    fn test_run_ends_when_clock_stops() {
        let queue = InputQueue::new(16);
        let clock = ManualClock::new(Duration::from_millis(1)).with_frame_limit(3);
        let mut lp = FrameLoop::new(clock, queue.receiver());
        let mut scene = CountingScene::default();

        let summary = lp.run(&mut scene, &mut renderer());
        assert_eq!(summary.frames, 3);
    }

    #[test]
    fn test_input_is_drained_before_frame() {
        let queue = InputQueue::new(16);
        let tx = queue.sender();
        let mut lp = FrameLoop::new(ManualClock::new(Duration::from_millis(10)), queue.receiver());
        let mut scene = CountingScene::default();

        assert!(tx.send(InputEvent::PointerMove(Vec2::new(1.0, 2.0))));
        assert!(tx.send(InputEvent::Click(Vec2::new(3.0, 4.0))));
        let summary = lp.run_frames(1, &mut scene, &mut renderer());

        assert_eq!(summary.events_processed, 2);
        assert_eq!(scene.events.len(), 2);
        assert_eq!(scene.events[0].1, Duration::from_millis(10));
        assert_eq!(scene.frames, vec![Duration::from_millis(10)]);
    }

    #[test]
    fn test_cancel_before_run() {
        let queue = InputQueue::new(16);
        let mut lp = FrameLoop::new(ManualClock::default(), queue.receiver());
        lp.cancel_handle().cancel();

        let summary = lp.run(&mut CountingScene::default(), &mut renderer());
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.timing.min_frame_ms(), 0.0);
    }

    #[test]
    fn test_dropped_events_are_reported() {
        let queue = InputQueue::new(1);
        let tx = queue.sender();
        let mut lp = FrameLoop::new(ManualClock::default(), queue.receiver());

        let _ = tx.send(InputEvent::MenuToggle);
        let _ = tx.send(InputEvent::MenuToggle);
        let summary = lp.run_frames(1, &mut CountingScene::default(), &mut renderer());

        assert_eq!(summary.events_processed, 1);
        assert_eq!(summary.events_dropped, 1);
    }

    #[test]
    fn test_summaries_merge() {
        let queue = InputQueue::new(4);
        let mut lp = FrameLoop::new(ManualClock::new(Duration::from_millis(10)), queue.receiver());
        let mut scene = CountingScene::default();

        let mut total = lp.run_frames(2, &mut scene, &mut renderer());
        total.merge(&lp.run_frames(3, &mut scene, &mut renderer()));

        assert_eq!(total.frames, 5);
        assert_eq!(total.timing.frames_recorded, 5);
        assert_eq!(total.last_frame_at, Duration::from_millis(50));
    }

    #[test]
    fn test_accumulator_budget() {
        let mut acc = FrameStatsAccumulator::new(Duration::from_millis(1));
        acc.record(FrameStats { total_us: 500, ..FrameStats::default() });
        acc.record(FrameStats { total_us: 1500, ..FrameStats::default() });

        assert_eq!(acc.frames_over_budget, 1);
        assert!((acc.avg_frame_ms() - 1.0).abs() < 1e-9);
        assert!((acc.over_budget_ratio() - 0.5).abs() < 1e-9);
    }
}
