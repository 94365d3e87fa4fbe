//! # LUMEN Core
//!
//! The animated background of the LUMEN portfolio page: drifting particles
//! that bounce off the viewport edges and shy away from the pointer, static
//! sparkles and stars, and short-lived sparkle bursts and connection lines.
//!
//! ## Design Principles
//!
//! 1. **No globals** - one `Background` value owns all state
//! 2. **Display behind a trait** - `Renderer` is the only way out
//! 3. **Virtual time** - frames and expiries run on a `FrameClock`
//! 4. **Deterministic** - one seeded ChaCha stream drives every roll
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumen_core::{Background, BackgroundConfig, FrameLoop, InputQueue, ManualClock, RecordingRenderer};
//!
//! let mut renderer = RecordingRenderer::new(Viewport::new(1024.0, 768.0));
//! let mut background = Background::new(BackgroundConfig::default(), &mut renderer)?;
//!
//! let queue = InputQueue::default();
//! let mut frame_loop = FrameLoop::new(ManualClock::default(), queue.receiver());
//! let summary = frame_loop.run_frames(600, &mut background, &mut renderer);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod background;
pub mod clock;
pub mod config;
pub mod effects;
pub mod entity;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod input;
pub mod render;
pub mod timer;

pub use background::{Background, PointerState};
pub use clock::{frame_duration, FrameClock, ManualClock, SystemClock};
pub use config::{BackgroundConfig, EffectsConfig, FieldConfig};
pub use effects::{BurstCause, ConnectionLine, EffectsEmitter, EffectsStats, SparkleBurst};
pub use entity::{EntityAllocator, EntityId, EntityKind};
pub use error::{BackgroundError, BackgroundResult};
pub use field::{repulsion_force, step_particle, Particle, ParticleField, Sparkle, Star};
pub use frame_loop::{
    CancelHandle, FrameLoop, FrameLoopConfig, FrameStats, FrameStatsAccumulator, LoopSummary, Scene,
};
pub use input::{InputQueue, InputReceiver, InputSender, DEFAULT_INPUT_CAPACITY};
pub use render::{Emphasis, Layer, RecordingRenderer, RenderCommand, Renderer, SparkleKind, StarSize, Visual};
pub use timer::{DelayQueue, DrainExpired, IntervalTimer};
