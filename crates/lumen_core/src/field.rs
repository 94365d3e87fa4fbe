//! # Particle Field Simulator
//!
//! Owns the drifting particles plus the static sparkles and stars.
//!
//! Per frame, for each particle:
//! ```text
//! 1. position += velocity
//! 2. wall check (post-update, unclamped): x <= 0 || x >= w  =>  vx = -vx
//!                                         y <= 0 || y >= h  =>  vy = -vy
//! 3. d = |pointer - position|
//!    d <  R  =>  force = (R - d) / R, emphasise, position -= delta * force * k
//!    d >= R  =>  clear emphasis
//! 4. renderer.update(id, visual)
//! ```
//!
//! A particle may sit up to one step outside the viewport before the
//! reflected velocity brings it back. That overshoot is not corrected.
//!
//! Resizing never adds or removes individual entities: everything is torn
//! down and recreated, so counts always equal the target for the viewport.

use lumen_shared::{Vec2, Viewport};
use rand::Rng;

use crate::config::FieldConfig;
use crate::entity::{EntityAllocator, EntityId, EntityKind};
use crate::render::{Emphasis, Layer, Renderer, SparkleKind, StarSize, Visual};

/// A drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Entity id.
    pub id: EntityId,
    /// Position, px.
    pub position: Vec2,
    /// Velocity, px per frame.
    pub velocity: Vec2,
    /// Diameter, px.
    pub size: f32,
    /// Highlight applied last frame.
    pub emphasis: Option<Emphasis>,
}

impl Particle {
    /// Creates a particle with no emphasis.
    #[must_use]
    pub fn new(id: EntityId, position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            size,
            emphasis: None,
        }
    }

    /// Current look.
    #[must_use]
    pub fn visual(&self) -> Visual {
        Visual::Particle {
            position: self.position,
            size: self.size,
            emphasis: self.emphasis,
        }
    }
}

/// A static twinkling sparkle.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    /// Entity id.
    pub id: EntityId,
    /// Position, px.
    pub position: Vec2,
    /// Size class.
    pub kind: SparkleKind,
    /// Animation phase offset, seconds.
    pub delay_secs: f32,
}

impl Sparkle {
    /// Current look.
    #[must_use]
    pub fn visual(&self) -> Visual {
        Visual::Sparkle {
            position: self.position,
            kind: self.kind,
            delay_secs: self.delay_secs,
        }
    }
}

/// A static twinkling star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Entity id.
    pub id: EntityId,
    /// Position, px.
    pub position: Vec2,
    /// Size class.
    pub size: StarSize,
    /// Animation phase offset, seconds.
    pub delay_secs: f32,
}

impl Star {
    /// Current look.
    #[must_use]
    pub fn visual(&self) -> Visual {
        Visual::Star {
            position: self.position,
            size: self.size,
            delay_secs: self.delay_secs,
        }
    }
}

/// Repulsion force for a particle `distance` px from the pointer.
///
/// `1.0` at the pointer, falling linearly to `0.0` at `radius` and beyond.
#[inline]
#[must_use]
pub fn repulsion_force(distance: f32, radius: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    ((radius - distance) / radius).clamp(0.0, 1.0)
}

/// Advances one particle by one frame.
pub fn step_particle(particle: &mut Particle, viewport: Viewport, pointer: Vec2, config: &FieldConfig) {
    particle.position += particle.velocity;

    if particle.position.x <= 0.0 || particle.position.x >= viewport.width {
        particle.velocity.x = -particle.velocity.x;
    }
    if particle.position.y <= 0.0 || particle.position.y >= viewport.height {
        particle.velocity.y = -particle.velocity.y;
    }

    let delta = pointer - particle.position;
    let distance = delta.length();

    if distance < config.repulsion_radius {
        let force = repulsion_force(distance, config.repulsion_radius);
        particle.emphasis = Some(Emphasis {
            opacity: config.emphasis_opacity,
            scale: 1.0 + force * config.emphasis_scale_gain,
        });
        particle.position -= delta * (force * config.repulsion_strength);
    } else {
        particle.emphasis = None;
    }
}

/// Uniform draw in `[0, upper)`, or `0` for an empty range.
fn sample_below<G: Rng + ?Sized>(rng: &mut G, upper: f32) -> f32 {
    if upper > 0.0 {
        rng.gen_range(0.0..upper)
    } else {
        0.0
    }
}

/// Uniform draw in `[-bound, bound)`, or `0` for an empty range.
fn sample_symmetric<G: Rng + ?Sized>(rng: &mut G, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.gen_range(-bound..bound)
    } else {
        0.0
    }
}

fn sample_point<G: Rng + ?Sized>(rng: &mut G, viewport: Viewport) -> Vec2 {
    let x = sample_below(rng, viewport.width);
    let y = sample_below(rng, viewport.height);
    Vec2::new(x, y)
}

/// The particle field.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    sparkles: Vec<Sparkle>,
    stars: Vec<Star>,
}

impl ParticleField {
    /// Creates an empty field. Call `populate` to fill it.
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            particles: Vec::new(),
            sparkles: Vec::new(),
            stars: Vec::new(),
        }
    }

    /// Creates every particle, sparkle and star for the renderer's viewport.
    ///
    /// A missing layer skips its entities; the rest are still created.
    pub fn populate<R, G>(&mut self, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        self.viewport = renderer.viewport();

        if renderer.has_layer(Layer::Particles) {
            self.create_particles(renderer, rng, ids);
        } else {
            tracing::warn!("particle layer missing, particles disabled");
        }

        if renderer.has_layer(Layer::Sparkles) {
            self.create_sparkles(renderer, rng, ids);
            self.create_stars(renderer, rng, ids);
        } else {
            tracing::warn!("sparkle layer missing, sparkles and stars disabled");
        }
    }

    /// Removes every particle, sparkle and star.
    pub fn teardown<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for p in self.particles.drain(..) {
            renderer.remove(p.id);
        }
        for s in self.sparkles.drain(..) {
            renderer.remove(s.id);
        }
        for s in self.stars.drain(..) {
            renderer.remove(s.id);
        }
    }

    /// Tears everything down and repopulates for the current viewport.
    pub fn rebuild<R, G>(&mut self, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        let before = self.viewport;
        self.teardown(renderer);
        self.populate(renderer, rng, ids);
        tracing::debug!(
            from_width = before.width,
            to_width = self.viewport.width,
            particles = self.particles.len(),
            sparkles = self.sparkles.len(),
            stars = self.stars.len(),
            "particle field rebuilt"
        );
    }

    /// Advances every particle one frame and pushes the result to the renderer.
    pub fn step<R: Renderer + ?Sized>(&mut self, pointer: Vec2, renderer: &mut R) {
        let viewport = renderer.viewport();
        for particle in &mut self.particles {
            step_particle(particle, viewport, pointer, &self.config);
            renderer.update(particle.id, &particle.visual());
        }
    }

    fn create_particles<R, G>(&mut self, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        let count = self.config.particle_count(self.viewport);
        self.particles.reserve(count);

        for _ in 0..count {
            let size = rng.gen_range(self.config.particle_size_min..self.config.particle_size_max);
            let position = sample_point(rng, self.viewport);
            let velocity = Vec2::new(
                sample_symmetric(rng, self.config.particle_max_speed),
                sample_symmetric(rng, self.config.particle_max_speed),
            );

            let particle = Particle::new(ids.allocate(EntityKind::Particle), position, velocity, size);
            renderer.spawn(particle.id, &particle.visual());
            self.particles.push(particle);
        }
    }

    fn create_sparkles<R, G>(&mut self, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        let count = self.config.sparkle_count(self.viewport);
        self.sparkles.reserve(count);

        for _ in 0..count {
            let kind = if rng.gen_bool(self.config.large_sparkle_chance) {
                SparkleKind::Large
            } else {
                SparkleKind::Normal
            };
            let sparkle = Sparkle {
                id: ids.allocate(EntityKind::Sparkle),
                kind,
                position: sample_point(rng, self.viewport),
                delay_secs: sample_below(rng, self.config.sparkle_max_delay_secs),
            };
            renderer.spawn(sparkle.id, &sparkle.visual());
            self.sparkles.push(sparkle);
        }
    }

    fn create_stars<R, G>(&mut self, renderer: &mut R, rng: &mut G, ids: &mut EntityAllocator)
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        let count = self.config.star_count(self.viewport);
        self.stars.reserve(count);

        for _ in 0..count {
            let star = Star {
                id: ids.allocate(EntityKind::Star),
                size: StarSize::ALL[rng.gen_range(0..StarSize::ALL.len())],
                position: sample_point(rng, self.viewport),
                delay_secs: sample_below(rng, self.config.star_max_delay_secs),
            };
            renderer.spawn(star.id, &star.visual());
            self.stars.push(star);
        }
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particles, mutable in place (the count cannot change).
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Live sparkles.
    #[must_use]
    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    /// Live stars.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Viewport the field was last populated for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Field tuning.
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f32 = 1e-5;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(EntityId::new(EntityKind::Particle, 0), Vec2::new(x, y), Vec2::ZERO, 3.0)
    }

    #[test]
    fn test_force_profile() {
        assert_eq!(repulsion_force(0.0, 100.0), 1.0);
        assert_eq!(repulsion_force(50.0, 100.0), 0.5);
        assert_eq!(repulsion_force(100.0, 100.0), 0.0);
        assert_eq!(repulsion_force(250.0, 100.0), 0.0);
    }

    #[test]
    fn test_no_repulsion_at_radius() {
        let config = FieldConfig::default();
        let mut p = still(50.0, 150.0);

        step_particle(&mut p, Viewport::new(1024.0, 768.0), Vec2::new(50.0, 50.0), &config);

        assert_eq!(p.position, Vec2::new(50.0, 150.0));
        assert_eq!(p.emphasis, None);
    }

    #[test]
    fn test_half_force_displacement() {
        let config = FieldConfig::default();
        let mut p = still(50.0, 100.0);

        step_particle(&mut p, Viewport::new(1024.0, 768.0), Vec2::new(50.0, 50.0), &config);

        assert!((p.position.x - 50.0).abs() < EPS);
        assert!((p.position.y - 100.25).abs() < EPS);
        let emphasis = p.emphasis.unwrap();
        assert!((emphasis.scale - 1.25).abs() < EPS);
        assert_eq!(emphasis.opacity, 0.9);
    }

    #[test]
    fn test_emphasis_clears_when_pointer_leaves() {
        let config = FieldConfig::default();
        let vp = Viewport::new(1024.0, 768.0);
        let mut p = still(300.0, 300.0);

        step_particle(&mut p, vp, Vec2::new(310.0, 300.0), &config);
        assert!(p.emphasis.is_some());

        step_particle(&mut p, vp, Vec2::new(900.0, 700.0), &config);
        assert!(p.emphasis.is_none());
    }

    #[test]
    fn test_wall_reflection_is_exact_sign_flip() {
        let config = FieldConfig::default();
        let vp = Viewport::new(1024.0, 768.0);
        let far = Vec2::new(-10_000.0, -10_000.0);
        let mut p = Particle::new(
            EntityId::new(EntityKind::Particle, 0),
            Vec2::new(1023.9, 400.0),
            Vec2::new(0.2, 0.1),
            3.0,
        );

        step_particle(&mut p, vp, far, &config);

        // Overshoot is kept; only the velocity flips.
        assert!(p.position.x > 1024.0);
        assert_eq!(p.velocity, Vec2::new(-0.2, 0.1));

        step_particle(&mut p, vp, far, &config);
        assert!(p.position.x < 1024.0);
    }

    #[test]
    fn test_populate_counts_and_bounds() {
        let mut renderer = RecordingRenderer::new(Viewport::new(1024.0, 768.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = EntityAllocator::new();
        let mut field = ParticleField::new(FieldConfig::default());

        field.populate(&mut renderer, &mut rng, &mut ids);

        assert_eq!(field.particles().len(), 30);
        assert_eq!(field.sparkles().len(), 15);
        assert_eq!(field.stars().len(), 25);
        for p in field.particles() {
            assert!((0.0..1024.0).contains(&p.position.x));
            assert!((0.0..768.0).contains(&p.position.y));
            assert!((2.0..6.0).contains(&p.size));
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
        }
        assert_eq!(renderer.count(EntityKind::Particle), 30);
        assert_eq!(renderer.live().len(), 70);
    }

    #[test]
    fn test_large_sparkle_rate() {
        let config = FieldConfig {
            sparkles_wide: 10_000,
            ..FieldConfig::default()
        };
        let mut renderer = RecordingRenderer::new(Viewport::new(1024.0, 768.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = EntityAllocator::new();
        let mut field = ParticleField::new(config);

        field.populate(&mut renderer, &mut rng, &mut ids);

        let large = field.sparkles().iter().filter(|s| s.kind == SparkleKind::Large).count();
        let rate = large as f64 / 10_000.0;
        assert!((rate - 0.3).abs() < 0.02, "large sparkle rate {rate:.4}");
    }

    #[test]
    fn test_missing_particle_layer_only_disables_particles() {
        let mut renderer =
            RecordingRenderer::new(Viewport::new(1024.0, 768.0)).without_layer(Layer::Particles);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = EntityAllocator::new();
        let mut field = ParticleField::new(FieldConfig::default());

        field.populate(&mut renderer, &mut rng, &mut ids);
        field.step(Vec2::ZERO, &mut renderer);

        assert!(field.particles().is_empty());
        assert_eq!(field.sparkles().len(), 15);
        assert_eq!(field.stars().len(), 25);
    }

    #[test]
    fn test_zero_sized_viewport_does_not_panic() {
        let mut renderer = RecordingRenderer::new(Viewport::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = EntityAllocator::new();
        let mut field = ParticleField::new(FieldConfig::default());

        field.populate(&mut renderer, &mut rng, &mut ids);

        assert_eq!(field.particles().len(), 15);
        assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));
    }
}
