//! Headless renderer that reports display commands through `tracing`.

use lumen_core::{EntityId, EntityKind, Layer, Renderer, Visual};
use lumen_shared::Viewport;

/// Logs every command at `trace` and keeps live counts per entity kind.
#[derive(Debug)]
pub struct TracingRenderer {
    viewport: Viewport,
    live: [usize; EntityKind::ALL.len()],
    spawned: u64,
    updated: u64,
    removed: u64,
}

impl TracingRenderer {
    /// Creates a renderer for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            live: [0; EntityKind::ALL.len()],
            spawned: 0,
            updated: 0,
            removed: 0,
        }
    }

    /// Changes the viewport (the window was resized).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;
    }

    /// Live entities of `kind`.
    #[must_use]
    pub fn live(&self, kind: EntityKind) -> usize {
        self.live[kind as usize]
    }

    /// Total spawn commands.
    #[must_use]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Total update commands.
    #[must_use]
    pub fn updated(&self) -> u64 {
        self.updated
    }

    /// Total remove commands.
    #[must_use]
    pub fn removed(&self) -> u64 {
        self.removed
    }
}

impl Renderer for TracingRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn has_layer(&self, _layer: Layer) -> bool {
        true
    }

    fn spawn(&mut self, id: EntityId, visual: &Visual) {
        self.spawned += 1;
        if let Some(kind) = id.kind() {
            self.live[kind as usize] += 1;
        }
        tracing::trace!(%id, ?visual, "spawn");
    }

    fn update(&mut self, id: EntityId, visual: &Visual) {
        self.updated += 1;
        tracing::trace!(%id, ?visual, "update");
    }

    fn remove(&mut self, id: EntityId) {
        self.removed += 1;
        if let Some(kind) = id.kind() {
            let slot = &mut self.live[kind as usize];
            *slot = slot.saturating_sub(1);
        }
        tracing::trace!(%id, "remove");
    }
}
