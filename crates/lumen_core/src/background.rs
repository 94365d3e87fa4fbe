//! # Background Context
//!
//! One owned object holding everything the animated background needs:
//! pointer state, particle field, effects emitter, RNG and id allocator.
//! Nothing here is global; the host owns a `Background` and passes its
//! renderer in on every call.
//!
//! ```text
//!   input events ──> handle_input ──┬──> pointer state
//!                                   ├──> effects (lines, bursts)
//!                                   └──> field rebuild (resize)
//!
//!   frame clock  ──> frame ─────────┬──> effects.tick (timer + sweep)
//!                                   └──> field.step(pointer)
//! ```

use std::time::Duration;

use lumen_shared::{InputEvent, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::BackgroundConfig;
use crate::effects::EffectsEmitter;
use crate::entity::EntityAllocator;
use crate::error::BackgroundResult;
use crate::field::ParticleField;
use crate::frame_loop::Scene;
use crate::render::Renderer;

/// Last known pointer position.
///
/// Starts at the origin, like a page that has not seen the mouse yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Position in viewport px.
    pub position: Vec2,
    /// Number of move samples received.
    pub samples: u64,
}

impl PointerState {
    /// Records a new sample.
    pub fn update(&mut self, position: Vec2) {
        self.position = position;
        self.samples += 1;
    }
}

/// The animated background.
#[derive(Debug)]
pub struct Background {
    config: BackgroundConfig,
    rng: ChaCha8Rng,
    ids: EntityAllocator,
    pointer: PointerState,
    field: ParticleField,
    effects: EffectsEmitter,
    frames: u64,
}

impl Background {
    /// Validates `config` and creates a populated background at t = 0.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config is out of range.
    pub fn new<R: Renderer + ?Sized>(config: BackgroundConfig, renderer: &mut R) -> BackgroundResult<Self> {
        Self::start_at(config, renderer, Duration::ZERO)
    }

    /// Like `new`, with the ambient burst timer starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config is out of range.
    pub fn start_at<R: Renderer + ?Sized>(
        config: BackgroundConfig,
        renderer: &mut R,
        start: Duration,
    ) -> BackgroundResult<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut ids = EntityAllocator::new();
        let mut field = ParticleField::new(config.field.clone());
        field.populate(renderer, &mut rng, &mut ids);
        let effects = EffectsEmitter::new(config.effects.clone(), start);

        tracing::info!(
            seed = config.seed,
            width = field.viewport().width,
            height = field.viewport().height,
            particles = field.particles().len(),
            "background started"
        );

        Ok(Self {
            config,
            rng,
            ids,
            pointer: PointerState::default(),
            field,
            effects,
            frames: 0,
        })
    }

    /// Applies one input event.
    ///
    /// Effects that expired by `now` are retired first. Pointer/touch moves
    /// update the pointer before any effect is rolled. Events the background
    /// does not care about are ignored.
    pub fn handle_input<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, renderer: &mut R) {
        self.effects.sweep(now, renderer);
        match *event {
            InputEvent::PointerMove(position) => {
                self.pointer.update(position);
                self.effects
                    .pointer_moved(position, now, renderer, &mut self.rng, &mut self.ids);
            }
            InputEvent::TouchMove(Some(position)) => {
                self.pointer.update(position);
                self.effects
                    .touch_moved(position, now, renderer, &mut self.rng, &mut self.ids);
            }
            InputEvent::Click(position) | InputEvent::TouchStart(Some(position)) => {
                self.effects.tapped(position, now, renderer, &mut self.ids);
            }
            InputEvent::Resize(_) => self.resize(renderer),
            _ => {}
        }
    }

    /// Runs one frame: timers, expiry sweep, then particle motion.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) {
        self.effects.tick(now, renderer, &mut self.rng, &mut self.ids);
        self.field.step(self.pointer.position, renderer);
        self.frames += 1;
    }

    /// Rebuilds the field for the renderer's current viewport.
    pub fn resize<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.field.rebuild(renderer, &mut self.rng, &mut self.ids);
    }

    /// Pointer state.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Particle field.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Particle field, mutable (positions only; counts are fixed).
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    /// Effects emitter.
    #[must_use]
    pub fn effects(&self) -> &EffectsEmitter {
        &self.effects
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    /// Frames simulated so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Scene for Background {
    fn handle_input<R: Renderer + ?Sized>(&mut self, event: &InputEvent, now: Duration, renderer: &mut R) {
        Background::handle_input(self, event, now, renderer);
    }

    fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) {
        Background::frame(self, now, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::render::RecordingRenderer;
    use lumen_shared::Viewport;

    fn wide() -> RecordingRenderer {
        RecordingRenderer::new(Viewport::new(1024.0, 768.0))
    }

    #[test]
    fn test_pointer_tracks_moves() {
        let mut r = wide();
        let mut bg = Background::new(BackgroundConfig::default(), &mut r).unwrap();

        bg.handle_input(&InputEvent::PointerMove(Vec2::new(3.0, 4.0)), Duration::ZERO, &mut r);
        bg.handle_input(&InputEvent::TouchMove(Some(Vec2::new(5.0, 6.0))), Duration::ZERO, &mut r);
        bg.handle_input(&InputEvent::TouchMove(None), Duration::ZERO, &mut r);

        assert_eq!(bg.pointer().position, Vec2::new(5.0, 6.0));
        assert_eq!(bg.pointer().samples, 2);
    }

    #[test]
    fn test_click_and_touch_start_always_burst() {
        let mut r = wide();
        let mut bg = Background::new(BackgroundConfig::default(), &mut r).unwrap();

        bg.handle_input(&InputEvent::Click(Vec2::new(1.0, 1.0)), Duration::ZERO, &mut r);
        bg.handle_input(&InputEvent::TouchStart(Some(Vec2::new(2.0, 2.0))), Duration::ZERO, &mut r);
        bg.handle_input(&InputEvent::TouchStart(None), Duration::ZERO, &mut r);

        assert_eq!(bg.effects().burst_count(), 2);
        assert_eq!(r.count(EntityKind::Burst), 2);
    }

    #[test]
    fn test_expired_burst_is_gone_before_input_is_handled() {
        let mut r = wide();
        let mut bg = Background::new(BackgroundConfig::default(), &mut r).unwrap();
        bg.handle_input(&InputEvent::Click(Vec2::new(1.0, 1.0)), Duration::ZERO, &mut r);
        assert_eq!(bg.effects().burst_count(), 1);

        bg.handle_input(&InputEvent::Scroll { y: 0.0 }, Duration::from_millis(999), &mut r);
        assert_eq!(bg.effects().burst_count(), 1);

        bg.handle_input(&InputEvent::Scroll { y: 0.0 }, Duration::from_millis(1000), &mut r);
        assert_eq!(bg.effects().burst_count(), 0);
        assert_eq!(r.count(EntityKind::Burst), 0);
    }

    #[test]
    fn test_page_events_are_ignored() {
        let mut r = wide();
        let mut bg = Background::new(BackgroundConfig::default(), &mut r).unwrap();
        let before = r.commands().len();

        bg.handle_input(&InputEvent::Scroll { y: 500.0 }, Duration::ZERO, &mut r);
        bg.handle_input(&InputEvent::MenuToggle, Duration::ZERO, &mut r);

        assert_eq!(r.commands().len(), before);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut r = wide();
        let mut config = BackgroundConfig::default();
        config.effects.line_chance = -0.1;
        assert!(Background::new(config, &mut r).is_err());
        assert!(r.live().is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = wide();
        let mut b = wide();
        let bg_a = Background::new(BackgroundConfig::default(), &mut a).unwrap();
        let bg_b = Background::new(BackgroundConfig::default(), &mut b).unwrap();

        assert_eq!(bg_a.field().particles(), bg_b.field().particles());
        assert_eq!(bg_a.field().stars(), bg_b.field().stars());
    }
}
