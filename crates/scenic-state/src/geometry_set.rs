//! Mixed sets of frames and geometries used by collision filtering.

use indexmap::IndexSet;
use scenic_core::{EntityId, FrameId, GeometryId};

/// A set of frames and geometries.
///
/// When applied to a state, each frame expands to every geometry resolving to
/// it at that moment. Geometries registered later are not covered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometrySet {
    frames: IndexSet<FrameId>,
    geometries: IndexSet<GeometryId>,
}

impl GeometrySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, entity: impl Into<EntityId>) -> Self {
        self.add(entity);
        self
    }

    /// Insert a frame or geometry. Duplicates are ignored.
    pub fn add(&mut self, entity: impl Into<EntityId>) {
        match entity.into() {
            EntityId::Frame(id) => {
                self.frames.insert(id);
            }
            EntityId::Geometry(id) => {
                self.geometries.insert(id);
            }
        }
    }

    /// Frames in the set.
    pub fn frames(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.frames.iter().copied()
    }

    /// Geometries named directly in the set.
    pub fn geometries(&self) -> impl Iterator<Item = GeometryId> + '_ {
        self.geometries.iter().copied()
    }

    /// Total number of members.
    pub fn len(&self) -> usize {
        self.frames.len() + self.geometries.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Into<EntityId>> FromIterator<E> for GeometrySet {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        for e in iter {
            set.add(e);
        }
        set
    }
}

impl From<FrameId> for GeometrySet {
    fn from(id: FrameId) -> Self {
        Self::new().with(id)
    }
}

impl From<GeometryId> for GeometrySet {
    fn from(id: GeometryId) -> Self {
        Self::new().with(id)
    }
}
