//! Per-source bookkeeping.

use indexmap::IndexSet;
use scenic_core::{FrameId, GeometryId, SourceId};

/// A registered geometry source and the entities it owns.
#[derive(Clone, Debug)]
pub struct SourceRecord {
    id: SourceId,
    name: String,
    pub(crate) frames: IndexSet<FrameId>,
    pub(crate) geometries: IndexSet<GeometryId>,
}

impl SourceRecord {
    pub(crate) fn new(id: SourceId, name: String) -> Self {
        Self {
            id,
            name,
            frames: IndexSet::new(),
            geometries: IndexSet::new(),
        }
    }

    /// The source's ID.
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// The source's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every frame this source registered, in registration order.
    pub fn frames(&self) -> &IndexSet<FrameId> {
        &self.frames
    }

    /// Every live geometry this source registered, dynamic and anchored.
    pub fn geometries(&self) -> &IndexSet<GeometryId> {
        &self.geometries
    }

    /// Whether the source owns the given frame.
    pub fn owns_frame(&self, frame: FrameId) -> bool {
        self.frames.contains(&frame)
    }

    /// Whether the source owns the given geometry.
    pub fn owns_geometry(&self, geometry: GeometryId) -> bool {
        self.geometries.contains(&geometry)
    }
}
