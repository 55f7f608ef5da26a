//! Read-only query interface over a [`GeometryState`].
//!
//! Every query on an ID fails with a structured unknown-id error naming the
//! ID and the query when the ID is not registered in the inspected view.
//! The model and each context have their own inspector; they never consult
//! each other.

use scenic_core::{
    EntityId, FrameChain, FrameId, GeometryError, GeometryId, Pose, PropertyBundle, Role,
    Scalar, Shape, SourceId,
};

use crate::state::GeometryState;

/// Borrowing view answering topology queries.
#[derive(Debug)]
pub struct SceneGraphInspector<'a, T: Scalar> {
    state: &'a GeometryState<T>,
}

impl<T: Scalar> Clone for SceneGraphInspector<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for SceneGraphInspector<'_, T> {}

impl<'a, T: Scalar> SceneGraphInspector<'a, T> {
    pub(crate) fn new(state: &'a GeometryState<T>) -> Self {
        Self { state }
    }

    // ── Counts ──────────────────────────────────────────────────

    /// Number of registered sources.
    pub fn num_sources(&self) -> usize {
        self.state.sources.len()
    }

    /// Number of frames, the world frame included.
    pub fn num_frames(&self) -> usize {
        self.state.frames.len()
    }

    /// Number of live geometries, dynamic and anchored.
    pub fn num_geometries(&self) -> usize {
        self.state.geometries.len()
    }

    /// Number of geometries fixed in the world frame.
    pub fn num_anchored_geometries(&self) -> usize {
        self.state
            .geometries
            .values()
            .filter(|g| g.is_anchored())
            .count()
    }

    /// IDs of every frame, the world frame first.
    pub fn frame_ids(&self) -> Vec<FrameId> {
        self.state.frames.keys().copied().collect()
    }

    /// IDs of every live geometry in registration order.
    pub fn geometry_ids(&self) -> Vec<GeometryId> {
        self.state.geometries.keys().copied().collect()
    }

    // ── Sources ─────────────────────────────────────────────────

    /// Whether `id` is registered in this view.
    pub fn source_is_registered(&self, id: SourceId) -> bool {
        self.state.source_is_registered(id)
    }

    /// The source's name.
    pub fn get_source_name(&self, id: SourceId) -> Result<&'a str, GeometryError> {
        let state = self.state;
        Ok(state.source_record(id, "get_source_name")?.name())
    }

    /// The reserved world frame.
    pub fn world_frame_id(&self) -> FrameId {
        FrameId::WORLD
    }

    /// Whether `frame` is registered in this view. Always true for the
    /// world frame.
    pub fn frame_is_registered(&self, frame: FrameId) -> bool {
        self.state.frames.contains_key(&frame)
    }

    /// Number of frames registered by `source`.
    pub fn num_frames_for_source(&self, source: SourceId) -> Result<usize, GeometryError> {
        Ok(self
            .state
            .source_record(source, "num_frames_for_source")?
            .frames()
            .len())
    }

    /// Frames registered by `source`, in registration order.
    pub fn frames_for_source(&self, source: SourceId) -> Result<Vec<FrameId>, GeometryError> {
        Ok(self
            .state
            .source_record(source, "frames_for_source")?
            .frames()
            .iter()
            .copied()
            .collect())
    }

    // ── Ownership ───────────────────────────────────────────────

    /// Whether `entity` is owned by `source`. The world frame belongs to no
    /// source.
    pub fn belongs_to_source(
        &self,
        entity: impl Into<EntityId>,
        source: SourceId,
    ) -> Result<bool, GeometryError> {
        const OP: &str = "belongs_to_source";
        let record = self.state.source_record(source, OP)?;
        Ok(match entity.into() {
            EntityId::Frame(f) => {
                self.state.frame_record(f, OP)?;
                record.owns_frame(f)
            }
            EntityId::Geometry(g) => {
                self.state.geometry_record(g, OP)?;
                record.owns_geometry(g)
            }
        })
    }

    /// The source owning `entity`; `None` for the world frame.
    pub fn get_owning_source(
        &self,
        entity: impl Into<EntityId>,
    ) -> Result<Option<SourceId>, GeometryError> {
        const OP: &str = "get_owning_source";
        Ok(match entity.into() {
            EntityId::Frame(f) => self.state.frame_record(f, OP)?.source,
            EntityId::Geometry(g) => Some(self.state.geometry_record(g, OP)?.source),
        })
    }

    // ── Frames ──────────────────────────────────────────────────

    /// Number of geometries resolving to `frame`, nested ones included.
    pub fn num_geometries_for_frame(&self, frame: FrameId) -> Result<usize, GeometryError> {
        Ok(self
            .state
            .frame_record(frame, "num_geometries_for_frame")?
            .geometries
            .len())
    }

    /// Number of geometries resolving to `frame` that hold `role`.
    pub fn num_geometries_for_frame_with_role(
        &self,
        frame: FrameId,
        role: Role,
    ) -> Result<usize, GeometryError> {
        Ok(self.geometries_for_frame_with_role(frame, role)?.len())
    }

    /// Geometries resolving to `frame` that hold `role`, in registration
    /// order.
    pub fn geometries_for_frame_with_role(
        &self,
        frame: FrameId,
        role: Role,
    ) -> Result<Vec<GeometryId>, GeometryError> {
        let record = self
            .state
            .frame_record(frame, "geometries_for_frame_with_role")?;
        Ok(record
            .geometries
            .iter()
            .filter(|g| {
                self.state
                    .geometries
                    .get(*g)
                    .is_some_and(|r| r.has_role(role))
            })
            .copied()
            .collect())
    }

    /// The frame's parent; the world frame is its own parent.
    pub fn get_parent_frame(&self, frame: FrameId) -> Result<FrameId, GeometryError> {
        Ok(self.state.frame_record(frame, "get_parent_frame")?.parent)
    }

    /// `frame` followed by each ancestor, ending with the world frame.
    pub fn frame_ancestry(&self, frame: FrameId) -> Result<FrameChain, GeometryError> {
        const OP: &str = "frame_ancestry";
        let mut chain = FrameChain::new();
        let mut current = frame;
        loop {
            let record = self.state.frame_record(current, OP)?;
            chain.push(current);
            if current.is_world() {
                return Ok(chain);
            }
            current = record.parent;
        }
    }

    /// The frame group tag given at registration.
    pub fn frame_group(&self, frame: FrameId) -> Result<i32, GeometryError> {
        Ok(self.state.frame_record(frame, "frame_group")?.frame_group)
    }

    /// The frame's initial pose in its parent, as given at registration.
    pub fn get_frame_pose_in_parent(&self, frame: FrameId) -> Result<Pose<T>, GeometryError> {
        Ok(self
            .state
            .frame_record(frame, "get_frame_pose_in_parent")?
            .pose_in_parent)
    }

    /// Dynamic frames with at least one geometry holding `role`, in
    /// registration order. Never contains the world frame.
    pub fn frames_with_role(&self, role: Role) -> Vec<FrameId> {
        self.state
            .frames
            .values()
            .filter(|f| !f.id.is_world())
            .filter(|f| {
                f.geometries.iter().any(|g| {
                    self.state
                        .geometries
                        .get(g)
                        .is_some_and(|r| r.has_role(role))
                })
            })
            .map(|f| f.id)
            .collect()
    }

    // ── Geometries ──────────────────────────────────────────────

    /// The frame the geometry resolves to through its anchor chain.
    pub fn get_frame_id(&self, geometry: GeometryId) -> Result<FrameId, GeometryError> {
        Ok(self.state.geometry_record(geometry, "get_frame_id")?.frame)
    }

    /// The parent geometry of a nested geometry, `None` when anchored
    /// directly to a frame.
    pub fn get_parent_geometry(
        &self,
        geometry: GeometryId,
    ) -> Result<Option<GeometryId>, GeometryError> {
        Ok(self
            .state
            .geometry_record(geometry, "get_parent_geometry")?
            .parent)
    }

    /// Whether the geometry's parent geometry has been removed.
    pub fn is_orphaned(&self, geometry: GeometryId) -> Result<bool, GeometryError> {
        let record = self.state.geometry_record(geometry, "is_orphaned")?;
        Ok(record
            .parent
            .is_some_and(|p| !self.state.geometries.contains_key(&p)))
    }

    /// Name of a frame or geometry.
    pub fn get_name(&self, entity: impl Into<EntityId>) -> Result<&'a str, GeometryError> {
        const OP: &str = "get_name";
        let state = self.state;
        Ok(match entity.into() {
            EntityId::Frame(f) => state.frame_record(f, OP)?.name.as_str(),
            EntityId::Geometry(g) => state.geometry_record(g, OP)?.name.as_str(),
        })
    }

    /// The geometry's shape.
    pub fn get_shape(&self, geometry: GeometryId) -> Result<&'a Shape, GeometryError> {
        let state = self.state;
        Ok(&state.geometry_record(geometry, "get_shape")?.shape)
    }

    /// `X_FG`: the geometry's fixed pose in the frame it resolves to.
    pub fn get_pose_in_frame(&self, geometry: GeometryId) -> Result<Pose<T>, GeometryError> {
        Ok(self
            .state
            .geometry_record(geometry, "get_pose_in_frame")?
            .pose_in_frame)
    }

    /// `X_AG`: the geometry's fixed pose in its anchor (frame or parent
    /// geometry).
    pub fn get_pose_in_parent(&self, geometry: GeometryId) -> Result<Pose<T>, GeometryError> {
        Ok(self
            .state
            .geometry_record(geometry, "get_pose_in_parent")?
            .pose_in_parent)
    }

    /// The geometry on `frame` named `name` that holds `role`.
    ///
    /// [`Role::Unassigned`] matches a geometry regardless of its roles.
    pub fn get_geometry_id_by_name(
        &self,
        frame: FrameId,
        role: Role,
        name: &str,
    ) -> Result<GeometryId, GeometryError> {
        let record = self.state.frame_record(frame, "get_geometry_id_by_name")?;
        record
            .geometries
            .iter()
            .filter_map(|g| self.state.geometries.get(g))
            .find(|g| g.name == name && g.has_role(role))
            .map(|g| g.id)
            .ok_or_else(|| GeometryError::NoGeometryWithName {
                frame,
                role,
                name: name.to_string(),
            })
    }

    /// Whether the geometry holds `role`.
    pub fn has_role(&self, geometry: GeometryId, role: Role) -> Result<bool, GeometryError> {
        Ok(self
            .state
            .geometry_record(geometry, "has_role")?
            .has_role(role))
    }

    /// Properties of `role` on the geometry, `None` if it does not hold it.
    pub fn get_properties(
        &self,
        geometry: GeometryId,
        role: Role,
    ) -> Result<Option<&'a PropertyBundle>, GeometryError> {
        let state = self.state;
        Ok(state
            .geometry_record(geometry, "get_properties")?
            .properties(role))
    }

    /// Every geometry holding `role`, in registration order.
    pub fn geometries_with_role(&self, role: Role) -> Vec<GeometryId> {
        self.state
            .geometries
            .values()
            .filter(|g| g.has_role(role))
            .map(|g| g.id)
            .collect()
    }

    // ── Collision filters ───────────────────────────────────────

    /// Whether the pair is excluded from collision consideration.
    ///
    /// Symmetric. A geometry is always filtered against itself.
    pub fn collision_filtered(
        &self,
        a: GeometryId,
        b: GeometryId,
    ) -> Result<bool, GeometryError> {
        const OP: &str = "collision_filtered";
        self.state.geometry_record(a, OP)?;
        self.state.geometry_record(b, OP)?;
        Ok(self.state.filters.is_filtered(a, b))
    }
}
