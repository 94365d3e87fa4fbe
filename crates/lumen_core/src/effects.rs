//! # Ephemeral Effects Emitter
//!
//! Spawns short-lived decoration and retires it on schedule.
//!
//! | Trigger              | Burst chance | Line chance |
//! |----------------------|--------------|-------------|
//! | ambient timer (2 s)  | 0.30         | -           |
//! | pointer move         | 0.02         | 0.05        |
//! | touch move           | 0.03         | 0.05        |
//! | click / touch start  | 1.00         | -           |
//!
//! Every spawned entity is scheduled in a `DelayQueue` at
//! `spawn + lifetime`. `sweep(now)` removes everything whose deadline is at
//! or before `now`, so nothing is visible at or past its expiry.

use std::collections::BTreeMap;
use std::time::Duration;

use lumen_shared::{Vec2, Viewport};
use rand::Rng;

use crate::config::EffectsConfig;
use crate::entity::{EntityAllocator, EntityId, EntityKind};
use crate::render::{Layer, Renderer, Visual};
use crate::timer::{DelayQueue, IntervalTimer};

/// What caused a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BurstCause {
    /// Ambient timer.
    Timer,
    /// Pointer-move sample.
    PointerMove,
    /// Touch-move sample.
    TouchMove,
    /// Click or touch start.
    Tap,
}

/// A live sparkle burst.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkleBurst {
    /// Entity id.
    pub id: EntityId,
    /// Centre.
    pub position: Vec2,
    /// Number of rays.
    pub rays: u8,
    /// Spawn time.
    pub spawned_at: Duration,
    /// What caused it.
    pub cause: BurstCause,
}

/// A live connection line.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionLine {
    /// Entity id.
    pub id: EntityId,
    /// Anchor.
    pub position: Vec2,
    /// Rotation in degrees.
    pub rotation_deg: f32,
    /// Spawn time.
    pub spawned_at: Duration,
}

/// Emitter counters since startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectsStats {
    /// Bursts spawned.
    pub bursts_spawned: u64,
    /// Lines spawned.
    pub lines_spawned: u64,
    /// Entities retired by the sweep.
    pub expired: u64,
    /// Spawns skipped because the target layer is missing.
    pub suppressed: u64,
}

/// The effects emitter.
#[derive(Debug)]
pub struct EffectsEmitter {
    config: EffectsConfig,
    timer: IntervalTimer,
    bursts: BTreeMap<EntityId, SparkleBurst>,
    lines: BTreeMap<EntityId, ConnectionLine>,
    expiry: DelayQueue<EntityId>,
    stats: EffectsStats,
}

impl EffectsEmitter {
    /// Creates an emitter whose ambient timer starts at `start`.
    #[must_use]
    pub fn new(config: EffectsConfig, start: Duration) -> Self {
        let timer = IntervalTimer::new(config.burst_interval(), start);
        Self {
            config,
            timer,
            bursts: BTreeMap::new(),
            lines: BTreeMap::new(),
            expiry: DelayQueue::with_capacity(64),
            stats: EffectsStats::default(),
        }
    }

    /// Runs the ambient timer and retires expired entities.
    pub fn tick<R, G>(&mut self, now: Duration, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        for _ in 0..self.timer.due(now) {
            if rng.gen_bool(self.config.timer_burst_chance) {
                let position = random_point(rng, renderer.viewport());
                self.spawn_burst(position, BurstCause::Timer, now, renderer, ids);
            }
        }
        self.sweep(now, renderer);
    }

    /// Handles a pointer-move sample.
    pub fn pointer_moved<R, G>(
        &mut self,
        position: Vec2,
        now: Duration,
        renderer: &mut R,
        rng: &mut G,
        ids: &mut EntityAllocator,
    ) where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        self.moved(position, self.config.pointer_burst_chance, BurstCause::PointerMove, now, renderer, rng, ids);
    }

    /// Handles a touch-move sample.
    pub fn touch_moved<R, G>(
        &mut self,
        position: Vec2,
        now: Duration,
        renderer: &mut R,
        rng: &mut G,
        ids: &mut EntityAllocator,
    ) where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        self.moved(position, self.config.touch_burst_chance, BurstCause::TouchMove, now, renderer, rng, ids);
    }

    /// Handles a click or touch start: always bursts.
    pub fn tapped<R: Renderer + ?Sized>(
        &mut self,
        position: Vec2,
        now: Duration,
        renderer: &mut R,
        ids: &mut EntityAllocator,
    ) -> Option<EntityId> {
        self.spawn_burst(position, BurstCause::Tap, now, renderer, ids)
    }

    #[allow(clippy::too_many_arguments)]
    fn moved<R, G>(
        &mut self,
        position: Vec2,
        burst_chance: f64,
        cause: BurstCause,
        now: Duration,
        renderer: &mut R,
        rng: &mut G,
        ids: &mut EntityAllocator,
    ) where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        if rng.gen_bool(self.config.line_chance) {
            let rotation_deg = rng.gen_range(0.0..360.0);
            self.spawn_line(position, rotation_deg, now, renderer, ids);
        }
        if rng.gen_bool(burst_chance) {
            self.spawn_burst(position, cause, now, renderer, ids);
        }
    }

    /// Spawns a burst and schedules its removal.
    ///
    /// Returns `None` if the sparkle layer is missing.
    pub fn spawn_burst<R: Renderer + ?Sized>(
        &mut self,
        position: Vec2,
        cause: BurstCause,
        now: Duration,
        renderer: &mut R,
        ids: &mut EntityAllocator,
    ) -> Option<EntityId> {
        if !renderer.has_layer(Layer::Sparkles) {
            self.stats.suppressed += 1;
            return None;
        }

        let burst = SparkleBurst {
            id: ids.allocate(EntityKind::Burst),
            position,
            rays: self.config.burst_rays,
            spawned_at: now,
            cause,
        };
        renderer.spawn(burst.id, &Visual::Burst { position, rays: burst.rays });
        self.expiry.schedule(now + self.config.burst_lifetime(), burst.id);
        self.stats.bursts_spawned += 1;
        tracing::trace!(id = %burst.id, ?cause, x = position.x, y = position.y, "burst spawned");

        let id = burst.id;
        self.bursts.insert(id, burst);
        Some(id)
    }

    /// Spawns a connection line and schedules its removal.
    ///
    /// Returns `None` if the overlay layer is missing.
    pub fn spawn_line<R: Renderer + ?Sized>(
        &mut self,
        position: Vec2,
        rotation_deg: f32,
        now: Duration,
        renderer: &mut R,
        ids: &mut EntityAllocator,
    ) -> Option<EntityId> {
        if !renderer.has_layer(Layer::Overlay) {
            self.stats.suppressed += 1;
            return None;
        }

        let line = ConnectionLine {
            id: ids.allocate(EntityKind::Line),
            position,
            rotation_deg,
            spawned_at: now,
        };
        renderer.spawn(line.id, &Visual::Line { position, rotation_deg });
        self.expiry.schedule(now + self.config.line_lifetime(), line.id);
        self.stats.lines_spawned += 1;
        tracing::trace!(id = %line.id, rotation_deg, "line spawned");

        let id = line.id;
        self.lines.insert(id, line);
        Some(id)
    }

    /// Removes every entity whose lifetime ended at or before `now`.
    ///
    /// Returns how many were removed.
    pub fn sweep<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) -> usize {
        let mut removed = 0;
        for id in self.expiry.drain_expired(now) {
            let known = self.bursts.remove(&id).is_some() || self.lines.remove(&id).is_some();
            if known {
                renderer.remove(id);
                removed += 1;
                tracing::trace!(%id, "effect expired");
            }
        }
        self.stats.expired += removed as u64;
        removed
    }

    /// Live bursts.
    pub fn bursts(&self) -> impl Iterator<Item = &SparkleBurst> + '_ {
        self.bursts.values()
    }

    /// Live lines.
    pub fn lines(&self) -> impl Iterator<Item = &ConnectionLine> + '_ {
        self.lines.values()
    }

    /// Number of live bursts.
    #[must_use]
    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Number of live lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True if `id` is a live burst or line.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.bursts.contains_key(&id) || self.lines.contains_key(&id)
    }

    /// Earliest pending expiry.
    #[must_use]
    pub fn next_expiry(&self) -> Option<Duration> {
        self.expiry.next_deadline()
    }

    /// Counters since startup.
    #[must_use]
    pub fn stats(&self) -> EffectsStats {
        self.stats
    }

    /// Effects tuning.
    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }
}

fn random_point<G: Rng + ?Sized>(rng: &mut G, viewport: Viewport) -> Vec2 {
    let x = if viewport.width > 0.0 { rng.gen_range(0.0..viewport.width) } else { 0.0 };
    let y = if viewport.height > 0.0 { rng.gen_range(0.0..viewport.height) } else { 0.0 };
    Vec2::new(x, y)
}
