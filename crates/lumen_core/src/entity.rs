//! # Entity Identifiers
//!
//! Every visual the core hands to the renderer carries an `EntityId`.
//! Ids are never reused within a process:
//! - Top 8 bits: the `EntityKind`
//! - Lower 56 bits: a monotonically increasing serial

/// What an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EntityKind {
    /// Drifting particle.
    Particle = 0,
    /// Static twinkling sparkle.
    Sparkle = 1,
    /// Static twinkling star.
    Star = 2,
    /// Short-lived 8-ray burst.
    Burst = 3,
    /// Short-lived connection line.
    Line = 4,
}

impl EntityKind {
    /// All kinds, in discriminant order.
    pub const ALL: [Self; 5] = [Self::Particle, Self::Sparkle, Self::Star, Self::Burst, Self::Line];

    /// Converts from the packed representation.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Particle),
            1 => Some(Self::Sparkle),
            2 => Some(Self::Star),
            3 => Some(Self::Burst),
            4 => Some(Self::Line),
            _ => None,
        }
    }
}

const SERIAL_BITS: u32 = 56;
const SERIAL_MASK: u64 = (1 << SERIAL_BITS) - 1;

/// Unique identifier for a visual entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Packs a kind and serial into an id.
    #[inline]
    #[must_use]
    pub const fn new(kind: EntityKind, serial: u64) -> Self {
        Self(((kind as u64) << SERIAL_BITS) | (serial & SERIAL_MASK))
    }

    /// Returns the kind portion of the id.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<EntityKind> {
        EntityKind::from_u8((self.0 >> SERIAL_BITS) as u8)
    }

    /// Returns the serial portion of the id.
    #[inline]
    #[must_use]
    pub const fn serial(self) -> u64 {
        self.0 & SERIAL_MASK
    }

    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{kind:?}#{}", self.serial()),
            None => f.write_str("null"),
        }
    }
}

/// Hands out fresh ids.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    /// Creates an allocator starting at serial 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id for `kind`.
    pub fn allocate(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId::new(kind, self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_packing() {
        let id = EntityId::new(EntityKind::Burst, 12345);
        assert_eq!(id.kind(), Some(EntityKind::Burst));
        assert_eq!(id.serial(), 12345);
        assert!(!id.is_null());
        assert_eq!(id.to_string(), "Burst#12345");
    }

    #[test]
    fn test_null_id() {
        assert!(EntityId::default().is_null());
        assert_eq!(EntityId::NULL.kind(), None);
        assert_eq!(EntityId::NULL.to_string(), "null");
    }

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = EntityAllocator::new();
        let a = ids.allocate(EntityKind::Particle);
        let b = ids.allocate(EntityKind::Particle);
        let c = ids.allocate(EntityKind::Line);

        assert_ne!(a, b);
        assert_eq!(c.serial(), 2);
        assert_eq!(ids.allocated(), 3);
    }
}
