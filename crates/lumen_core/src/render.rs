//! # Display Surface Seam
//!
//! The core never touches a real display. It describes what each entity
//! looks like (`Visual`) and hands that to a `Renderer`:
//!
//! ```text
//! spawn(id, visual)   create + style + append
//! update(id, visual)  restyle (position, emphasis)
//! remove(id)          detach
//! viewport()          current dimensions, read on demand
//! ```
//!
//! `RecordingRenderer` keeps a command log and a live-entity map so the
//! simulator can be tested without any display at all.

use std::collections::BTreeMap;

use lumen_shared::{Vec2, Viewport};

use crate::entity::{EntityId, EntityKind};

/// Container an entity is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Drifting particles.
    Particles,
    /// Sparkles, stars and bursts.
    Sparkles,
    /// Top-level overlay (connection lines).
    Overlay,
}

/// Force-driven highlight on a particle near the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emphasis {
    /// Opacity override.
    pub opacity: f32,
    /// Uniform scale.
    pub scale: f32,
}

/// Sparkle size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SparkleKind {
    /// Regular sparkle.
    Normal,
    /// Large sparkle.
    Large,
}

impl SparkleKind {
    /// CSS class list for this sparkle.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Normal => "sparkle",
            Self::Large => "sparkle large",
        }
    }
}

/// Star size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarSize {
    /// Small star.
    Small,
    /// Medium star.
    Medium,
    /// Large star.
    Large,
}

impl StarSize {
    /// All sizes, drawn uniformly.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// CSS class list for this star.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Small => "star small",
            Self::Medium => "star medium",
            Self::Large => "star large",
        }
    }
}

/// Visual description of one entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    /// A drifting particle.
    Particle {
        /// Top-left position.
        position: Vec2,
        /// Width and height.
        size: f32,
        /// Highlight while near the pointer.
        emphasis: Option<Emphasis>,
    },
    /// A static sparkle.
    Sparkle {
        /// Position.
        position: Vec2,
        /// Size class.
        kind: SparkleKind,
        /// Animation phase offset, seconds.
        delay_secs: f32,
    },
    /// A static star.
    Star {
        /// Position.
        position: Vec2,
        /// Size class.
        size: StarSize,
        /// Animation phase offset, seconds.
        delay_secs: f32,
    },
    /// A sparkle burst; the renderer spreads the rays evenly.
    Burst {
        /// Centre.
        position: Vec2,
        /// Number of ray children.
        rays: u8,
    },
    /// A connection line.
    Line {
        /// Anchor.
        position: Vec2,
        /// Rotation in degrees, `[0, 360)`.
        rotation_deg: f32,
    },
}

impl Visual {
    /// Container this visual lives in.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Particle { .. } => Layer::Particles,
            Self::Sparkle { .. } | Self::Star { .. } | Self::Burst { .. } => Layer::Sparkles,
            Self::Line { .. } => Layer::Overlay,
        }
    }

    /// Entity kind for this visual.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Particle { .. } => EntityKind::Particle,
            Self::Sparkle { .. } => EntityKind::Sparkle,
            Self::Star { .. } => EntityKind::Star,
            Self::Burst { .. } => EntityKind::Burst,
            Self::Line { .. } => EntityKind::Line,
        }
    }

    /// Position of the visual.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        match self {
            Self::Particle { position, .. }
            | Self::Sparkle { position, .. }
            | Self::Star { position, .. }
            | Self::Burst { position, .. }
            | Self::Line { position, .. } => *position,
        }
    }
}

/// The display collaborator.
pub trait Renderer {
    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Whether the container for `layer` exists.
    ///
    /// Features whose layer is missing are skipped; the rest keep running.
    fn has_layer(&self, _layer: Layer) -> bool {
        true
    }

    /// Creates and attaches an entity.
    fn spawn(&mut self, id: EntityId, visual: &Visual);

    /// Restyles an existing entity.
    fn update(&mut self, id: EntityId, visual: &Visual);

    /// Detaches an entity.
    fn remove(&mut self, id: EntityId);
}

/// A command recorded by `RecordingRenderer`.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// Entity created.
    Spawn {
        /// Entity.
        id: EntityId,
        /// Initial look.
        visual: Visual,
    },
    /// Entity restyled.
    Update {
        /// Entity.
        id: EntityId,
        /// New look.
        visual: Visual,
    },
    /// Entity removed.
    Remove {
        /// Entity.
        id: EntityId,
    },
}

/// Headless renderer that records everything it is asked to do.
#[derive(Debug)]
pub struct RecordingRenderer {
    viewport: Viewport,
    missing: Vec<Layer>,
    commands: Vec<RenderCommand>,
    live: BTreeMap<EntityId, Visual>,
}

impl RecordingRenderer {
    /// Creates a renderer with every layer present.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            missing: Vec::new(),
            commands: Vec::with_capacity(1024),
            live: BTreeMap::new(),
        }
    }

    /// Marks a layer as absent.
    #[must_use]
    pub fn without_layer(mut self, layer: Layer) -> Self {
        self.missing.push(layer);
        self
    }

    /// Changes the viewport (the host window was resized).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// All commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes and clears the command log.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Currently attached entities.
    #[must_use]
    pub fn live(&self) -> &BTreeMap<EntityId, Visual> {
        &self.live
    }

    /// Current look of an attached entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Visual> {
        self.live.get(&id)
    }

    /// Number of attached entities of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.live.values().filter(|v| v.kind() == kind).count()
    }
}

impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn has_layer(&self, layer: Layer) -> bool {
        !self.missing.contains(&layer)
    }

    fn spawn(&mut self, id: EntityId, visual: &Visual) {
        self.live.insert(id, visual.clone());
        self.commands.push(RenderCommand::Spawn { id, visual: visual.clone() });
    }

    fn update(&mut self, id: EntityId, visual: &Visual) {
        if let Some(slot) = self.live.get_mut(&id) {
            *slot = visual.clone();
        }
        self.commands.push(RenderCommand::Update { id, visual: visual.clone() });
    }

    fn remove(&mut self, id: EntityId) {
        self.live.remove(&id);
        self.commands.push(RenderCommand::Remove { id });
    }
}
