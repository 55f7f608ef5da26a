//! The geometry state: registration, removal, roles and collision filters.

use indexmap::IndexMap;
use scenic_core::{
    EntityId, FrameId, GeometryError, GeometryId, Pose, RoleProperties, Scalar, SourceId,
};
use tracing::{debug, warn};

use crate::config::StateConfig;
use crate::filter::CollisionFilter;
use crate::frame::{GeometryFrame, InternalFrame};
use crate::geometry::{GeometryInstance, InternalGeometry};
use crate::geometry_set::GeometrySet;
use crate::inspector::SceneGraphInspector;
use crate::source::SourceRecord;

/// One complete, independently mutable view of the registered topology.
///
/// Every mutating operation validates all of its inputs before touching any
/// field, so a returned error leaves the state exactly as it was.
///
/// `Clone` is a deep copy: the clone shares nothing with the original.
#[derive(Clone, Debug)]
pub struct GeometryState<T: Scalar> {
    pub(crate) config: StateConfig,
    pub(crate) sources: IndexMap<SourceId, SourceRecord>,
    /// Insertion order is topological: parents precede children.
    pub(crate) frames: IndexMap<FrameId, InternalFrame<T>>,
    /// Insertion order is topological: parent geometries precede children.
    pub(crate) geometries: IndexMap<GeometryId, InternalGeometry<T>>,
    pub(crate) filters: CollisionFilter,
    pub(crate) frame_world_poses: IndexMap<FrameId, Pose<T>>,
    pub(crate) geometry_world_poses: IndexMap<GeometryId, Pose<T>>,
    /// Bumped on every frame or geometry registration and removal.
    pub(crate) topology_version: u64,
    /// Topology version covered by the stored world poses.
    pub(crate) posed_version: Option<u64>,
}

fn validate_name(name: &str) -> Result<(), GeometryError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else {
        return Ok(());
    };
    Err(GeometryError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

impl<T: Scalar> GeometryState<T> {
    /// An empty state holding only the world frame.
    pub fn new(config: StateConfig) -> Self {
        let mut frames = IndexMap::new();
        frames.insert(FrameId::WORLD, InternalFrame::world());
        Self {
            config,
            sources: IndexMap::new(),
            frames,
            geometries: IndexMap::new(),
            filters: CollisionFilter::new(),
            frame_world_poses: IndexMap::new(),
            geometry_world_poses: IndexMap::new(),
            topology_version: 0,
            posed_version: None,
        }
    }

    /// The state's configuration.
    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    /// Read-only query interface.
    pub fn inspector(&self) -> SceneGraphInspector<'_, T> {
        SceneGraphInspector::new(self)
    }

    /// Counter bumped by every frame or geometry registration or removal.
    pub fn topology_version(&self) -> u64 {
        self.topology_version
    }

    /// Whether the stored world poses cover the current topology.
    pub fn poses_current(&self) -> bool {
        self.posed_version == Some(self.topology_version)
    }

    /// The recorded collision-filter relation.
    pub fn collision_filter(&self) -> &CollisionFilter {
        &self.filters
    }

    fn touch(&mut self) {
        self.topology_version += 1;
    }

    // ── Lookup helpers ──────────────────────────────────────────

    pub(crate) fn source_record(
        &self,
        id: SourceId,
        operation: &'static str,
    ) -> Result<&SourceRecord, GeometryError> {
        self.sources
            .get(&id)
            .ok_or(GeometryError::UnknownSource { id, operation })
    }

    pub(crate) fn frame_record(
        &self,
        id: FrameId,
        operation: &'static str,
    ) -> Result<&InternalFrame<T>, GeometryError> {
        self.frames
            .get(&id)
            .ok_or(GeometryError::UnknownFrame { id, operation })
    }

    pub(crate) fn geometry_record(
        &self,
        id: GeometryId,
        operation: &'static str,
    ) -> Result<&InternalGeometry<T>, GeometryError> {
        self.geometries
            .get(&id)
            .ok_or(GeometryError::UnknownGeometry { id, operation })
    }

    /// The geometry, after checking that `source` exists and owns it.
    fn owned_geometry(
        &self,
        source: SourceId,
        id: GeometryId,
        operation: &'static str,
    ) -> Result<&InternalGeometry<T>, GeometryError> {
        self.source_record(source, operation)?;
        let geometry = self.geometry_record(id, operation)?;
        if geometry.source != source {
            return Err(GeometryError::NotOwner {
                source,
                entity: id.into(),
            });
        }
        Ok(geometry)
    }

    // ── Sources ─────────────────────────────────────────────────

    /// Register a new source.
    ///
    /// Without a name, the configured prefix plus the new ID is used, with a
    /// numeric suffix appended if that collides with a live source's name.
    pub fn register_source(&mut self, name: Option<&str>) -> Result<SourceId, GeometryError> {
        let id = SourceId::next();
        let name = match name {
            Some(name) => {
                validate_name(name)?;
                if self.source_name_taken(name) {
                    return Err(GeometryError::DuplicateSourceName {
                        name: name.to_string(),
                    });
                }
                name.to_string()
            }
            None => self.generated_name(id),
        };
        debug!(source = id.get(), name = %name, "registered source");
        self.sources.insert(id, SourceRecord::new(id, name));
        Ok(id)
    }

    fn source_name_taken(&self, name: &str) -> bool {
        self.sources.values().any(|s| s.name() == name)
    }

    fn generated_name(&self, id: SourceId) -> String {
        let base = self.config.generated_source_name(id);
        let mut candidate = base.clone();
        let mut suffix = 1u32;
        while self.source_name_taken(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        candidate
    }

    /// Whether the source is registered in this state. Never fails.
    pub fn source_is_registered(&self, id: SourceId) -> bool {
        self.sources.contains_key(&id)
    }

    // ── Frames ──────────────────────────────────────────────────

    /// Register a frame whose parent is the world frame.
    pub fn register_frame(
        &mut self,
        source: SourceId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        self.register_child_frame(source, FrameId::WORLD, frame)
    }

    /// Register a frame under `parent`, which must be the world frame or a
    /// frame owned by `source`.
    pub fn register_child_frame(
        &mut self,
        source: SourceId,
        parent: FrameId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        const OP: &str = "register_frame";
        self.source_record(source, OP)?;
        let parent_record = self.frame_record(parent, OP)?;
        if !parent.is_world() && parent_record.source != Some(source) {
            return Err(GeometryError::NotOwner {
                source,
                entity: parent.into(),
            });
        }

        let id = FrameId::next();
        let record = InternalFrame {
            id,
            source: Some(source),
            name: frame.name().to_string(),
            parent,
            frame_group: frame.frame_group(),
            pose_in_parent: frame.pose().cast(),
            child_frames: Default::default(),
            geometries: Default::default(),
        };
        self.frames.insert(id, record);
        if let Some(p) = self.frames.get_mut(&parent) {
            p.child_frames.insert(id);
        }
        if let Some(s) = self.sources.get_mut(&source) {
            s.frames.insert(id);
        }
        self.touch();
        debug!(
            source = source.get(),
            frame = id.get(),
            parent = parent.get(),
            "registered frame"
        );
        Ok(id)
    }

    // ── Geometries ──────────────────────────────────────────────

    /// Register a geometry anchored to a frame or to another geometry.
    ///
    /// A frame anchor must be the world frame or owned by `source`; a
    /// geometry anchor must be owned by `source`. The name must be unique
    /// among geometries resolving to the same frame.
    pub fn register_geometry(
        &mut self,
        source: SourceId,
        anchor: impl Into<EntityId>,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        const OP: &str = "register_geometry";
        self.source_record(source, OP)?;
        let anchor = anchor.into();
        let (frame, parent, x_fa) = match anchor {
            EntityId::Frame(f) => {
                let record = self
                    .frames
                    .get(&f)
                    .ok_or(GeometryError::UnknownAnchor { anchor })?;
                if !f.is_world() && record.source != Some(source) {
                    return Err(GeometryError::NotOwner {
                        source,
                        entity: anchor,
                    });
                }
                (f, None, Pose::identity())
            }
            EntityId::Geometry(g) => {
                let record = self
                    .geometries
                    .get(&g)
                    .ok_or(GeometryError::UnknownAnchor { anchor })?;
                if record.source != source {
                    return Err(GeometryError::NotOwner {
                        source,
                        entity: anchor,
                    });
                }
                (record.frame, Some(g), record.pose_in_frame)
            }
        };

        let (pose, shape, name, roles) = instance.into_parts();
        validate_name(&name)?;
        shape
            .validate()
            .map_err(|reason| GeometryError::InvalidShape { reason })?;
        let frame_record = self.frame_record(frame, OP)?;
        let taken = frame_record
            .geometries
            .iter()
            .filter_map(|g| self.geometries.get(g))
            .any(|g| g.name == name);
        if taken {
            return Err(GeometryError::DuplicateGeometryName { frame, name });
        }

        let id = GeometryId::next();
        let pose_in_parent: Pose<T> = pose.cast();
        let mut record = InternalGeometry {
            id,
            source,
            name,
            frame,
            parent,
            child_geometries: Default::default(),
            pose_in_parent,
            pose_in_frame: x_fa.compose(&pose_in_parent),
            shape,
            proximity: None,
            illustration: None,
            perception: None,
        };
        for role in roles {
            record.set_role(role);
        }
        self.geometries.insert(id, record);
        if let Some(f) = self.frames.get_mut(&frame) {
            f.geometries.insert(id);
        }
        if let Some(p) = parent.and_then(|p| self.geometries.get_mut(&p)) {
            p.child_geometries.insert(id);
        }
        if let Some(s) = self.sources.get_mut(&source) {
            s.geometries.insert(id);
        }
        self.touch();
        debug!(
            source = source.get(),
            geometry = id.get(),
            frame = frame.get(),
            anchor = %anchor,
            "registered geometry"
        );
        Ok(id)
    }

    /// Register a geometry fixed in the world frame.
    pub fn register_anchored_geometry(
        &mut self,
        source: SourceId,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        self.register_geometry(source, FrameId::WORLD, instance)
    }

    /// Remove a geometry owned by `source`.
    ///
    /// Geometries nested on it are not removed. They keep their registration
    /// and stay queryable, but the next full pose update fails with
    /// [`GeometryError::OrphanedGeometry`] until they are removed too.
    pub fn remove_geometry(
        &mut self,
        source: SourceId,
        id: GeometryId,
    ) -> Result<(), GeometryError> {
        const OP: &str = "remove_geometry";
        let record = self.owned_geometry(source, id, OP)?;
        let frame = record.frame;
        let parent = record.parent;
        let orphans = record.child_geometries.len();

        self.geometries.shift_remove(&id);
        if let Some(f) = self.frames.get_mut(&frame) {
            f.geometries.shift_remove(&id);
        }
        if let Some(p) = parent.and_then(|p| self.geometries.get_mut(&p)) {
            p.child_geometries.shift_remove(&id);
        }
        if let Some(s) = self.sources.get_mut(&source) {
            s.geometries.shift_remove(&id);
        }
        self.filters.remove_geometry(id);
        self.geometry_world_poses.shift_remove(&id);
        self.touch();
        if orphans > 0 {
            warn!(
                geometry = id.get(),
                orphans,
                "removed geometry left nested geometries orphaned"
            );
        }
        debug!(source = source.get(), geometry = id.get(), "removed geometry");
        Ok(())
    }

    // ── Roles ───────────────────────────────────────────────────

    /// Assign a role to a geometry owned by `source`.
    ///
    /// Re-assigning a role the geometry already holds replaces its
    /// properties.
    pub fn assign_role(
        &mut self,
        source: SourceId,
        id: GeometryId,
        properties: RoleProperties,
    ) -> Result<(), GeometryError> {
        const OP: &str = "assign_role";
        self.owned_geometry(source, id, OP)?;
        let role = properties.role();
        if let Some(g) = self.geometries.get_mut(&id) {
            g.set_role(properties);
        }
        debug!(geometry = id.get(), role = %role, "assigned role");
        Ok(())
    }

    // ── Collision filters ───────────────────────────────────────

    /// Expand `set` to the proximity-role geometries it currently covers.
    fn resolve_proximity(
        &self,
        set: &GeometrySet,
        operation: &'static str,
    ) -> Result<Vec<GeometryId>, GeometryError> {
        let mut ids = indexmap::IndexSet::new();
        for f in set.frames() {
            let frame = self.frame_record(f, operation)?;
            ids.extend(frame.geometries.iter().copied());
        }
        for g in set.geometries() {
            self.geometry_record(g, operation)?;
            ids.insert(g);
        }
        Ok(ids
            .into_iter()
            .filter(|g| self.geometries.get(g).is_some_and(|r| r.proximity.is_some()))
            .collect())
    }

    /// Exclude every pair of proximity geometries covered by `set`.
    pub fn exclude_collisions_within(&mut self, set: &GeometrySet) -> Result<(), GeometryError> {
        let ids = self.resolve_proximity(set, "exclude_collisions_within")?;
        let added = self.filters.exclude_within(&ids);
        debug!(geometries = ids.len(), pairs = added, "excluded collisions within set");
        Ok(())
    }

    /// Exclude every pair of proximity geometries with one member covered by
    /// `set_a` and the other by `set_b`.
    pub fn exclude_collisions_between(
        &mut self,
        set_a: &GeometrySet,
        set_b: &GeometrySet,
    ) -> Result<(), GeometryError> {
        const OP: &str = "exclude_collisions_between";
        let a = self.resolve_proximity(set_a, OP)?;
        let b = self.resolve_proximity(set_b, OP)?;
        let added = self.filters.exclude_between(&a, &b);
        debug!(
            set_a = a.len(),
            set_b = b.len(),
            pairs = added,
            "excluded collisions between sets"
        );
        Ok(())
    }
}

impl<T: Scalar> Default for GeometryState<T> {
    fn default() -> Self {
        Self::new(StateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenic_core::{Role, Shape, Vec3};

    fn sphere(name: &str) -> GeometryInstance {
        GeometryInstance::new(Pose::identity(), Shape::sphere(1.0), name)
    }

    fn state_with_frame() -> (GeometryState<f64>, SourceId, FrameId) {
        let mut state = GeometryState::default();
        let s = state.register_source(None).unwrap();
        let f = state.register_frame(s, GeometryFrame::new("f")).unwrap();
        (state, s, f)
    }

    #[test]
    fn generated_source_names_never_collide() {
        let mut state = GeometryState::<f64>::default();
        let a = state.register_source(None).unwrap();
        let b = state.register_source(None).unwrap();
        let names: Vec<_> = [a, b]
            .iter()
            .map(|s| state.sources[s].name().to_string())
            .collect();
        assert_ne!(names[0], names[1]);
        assert!(names[0].starts_with("source_"));
    }

    #[test]
    fn duplicate_explicit_name_rejected() {
        let mut state = GeometryState::<f64>::default();
        state.register_source(Some("robot")).unwrap();
        let err = state.register_source(Some("robot")).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DuplicateSourceName {
                name: "robot".into()
            }
        );
        assert_eq!(state.sources.len(), 1);
    }

    #[test]
    fn padded_source_name_rejected() {
        let mut state = GeometryState::<f64>::default();
        assert!(matches!(
            state.register_source(Some(" robot")),
            Err(GeometryError::InvalidName { .. })
        ));
        assert!(matches!(
            state.register_source(Some("")),
            Err(GeometryError::InvalidName { .. })
        ));
    }

    #[test]
    fn frame_for_unknown_source_fails() {
        let mut state = GeometryState::<f64>::default();
        let ghost = SourceId::next();
        let err = state
            .register_frame(ghost, GeometryFrame::new("f"))
            .unwrap_err();
        assert!(matches!(err, GeometryError::UnknownSource { id, .. } if id == ghost));
        assert_eq!(state.frames.len(), 1);
    }

    #[test]
    fn frame_under_foreign_parent_fails() {
        let (mut state, _, f) = state_with_frame();
        let other = state.register_source(None).unwrap();
        let err = state
            .register_child_frame(other, f, GeometryFrame::new("g"))
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::NotOwner {
                source: other,
                entity: f.into()
            }
        );
    }

    #[test]
    fn nested_geometry_resolves_to_root_frame() {
        let (mut state, s, f) = state_with_frame();
        let offset = Pose::from_translation(Vec3::from_f64(0.0, 0.0, 1.0));
        let g1 = state
            .register_geometry(s, f, GeometryInstance::new(offset, Shape::sphere(1.0), "g1"))
            .unwrap();
        let g2 = state
            .register_geometry(s, g1, GeometryInstance::new(offset, Shape::sphere(1.0), "g2"))
            .unwrap();
        assert_eq!(state.geometries[&g2].frame, f);
        assert_eq!(state.geometries[&g2].parent, Some(g1));
        let expected = Pose::from_translation(Vec3::from_f64(0.0, 0.0, 2.0));
        assert!(state.geometries[&g2].pose_in_frame.approx_eq(&expected, 1e-12));
        assert_eq!(state.frames[&f].geometries.len(), 2);
    }

    #[test]
    fn duplicate_name_on_resolved_frame_rejected() {
        let (mut state, s, f) = state_with_frame();
        let g1 = state.register_geometry(s, f, sphere("ball")).unwrap();
        let err = state.register_geometry(s, g1, sphere("ball")).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DuplicateGeometryName {
                frame: f,
                name: "ball".into()
            }
        );
        let f2 = state.register_frame(s, GeometryFrame::new("f2")).unwrap();
        assert!(state.register_geometry(s, f2, sphere("ball")).is_ok());
    }

    #[test]
    fn unknown_anchor_and_bad_shape_leave_state_untouched() {
        let (mut state, s, f) = state_with_frame();
        let version = state.topology_version();
        let missing = GeometryId::next();
        assert_eq!(
            state.register_geometry(s, missing, sphere("x")).unwrap_err(),
            GeometryError::UnknownAnchor {
                anchor: missing.into()
            }
        );
        let bad = GeometryInstance::new(Pose::identity(), Shape::sphere(-1.0), "bad");
        assert!(matches!(
            state.register_geometry(s, f, bad),
            Err(GeometryError::InvalidShape { .. })
        ));
        assert_eq!(state.topology_version(), version);
        assert!(state.geometries.is_empty());
    }

    #[test]
    fn anchored_geometry_allowed_for_any_source() {
        let (mut state, s, _) = state_with_frame();
        let g = state.register_anchored_geometry(s, sphere("floor")).unwrap();
        assert_eq!(state.geometries[&g].frame, FrameId::WORLD);
        assert!(state.geometries[&g].is_anchored());
    }

    #[test]
    fn removal_requires_ownership() {
        let (mut state, s, f) = state_with_frame();
        let g = state.register_geometry(s, f, sphere("g")).unwrap();
        let other = state.register_source(None).unwrap();
        assert_eq!(
            state.remove_geometry(other, g).unwrap_err(),
            GeometryError::NotOwner {
                source: other,
                entity: g.into()
            }
        );
        state.remove_geometry(s, g).unwrap();
        assert!(matches!(
            state.remove_geometry(s, g),
            Err(GeometryError::UnknownGeometry { id, .. }) if id == g
        ));
    }

    #[test]
    fn removal_orphans_children() {
        let (mut state, s, f) = state_with_frame();
        let parent = state.register_geometry(s, f, sphere("p")).unwrap();
        let child = state.register_geometry(s, parent, sphere("c")).unwrap();
        state.remove_geometry(s, parent).unwrap();
        assert_eq!(state.geometries[&child].parent, Some(parent));
        assert!(state.frames[&f].geometries.contains(&child));
    }

    #[test]
    fn role_assignment_is_idempotent() {
        let (mut state, s, f) = state_with_frame();
        let g = state.register_geometry(s, f, sphere("g")).unwrap();
        state.assign_role(s, g, RoleProperties::proximity()).unwrap();
        state.assign_role(s, g, RoleProperties::proximity()).unwrap();
        assert!(state.geometries[&g].has_role(Role::Proximity));
        assert!(!state.geometries[&g].has_role(Role::Illustration));
    }

    #[test]
    fn filters_skip_geometries_without_proximity() {
        let (mut state, s, f) = state_with_frame();
        let a = state
            .register_geometry(s, f, sphere("a").with_role(RoleProperties::proximity()))
            .unwrap();
        let b = state
            .register_geometry(s, f, sphere("b").with_role(RoleProperties::proximity()))
            .unwrap();
        let c = state.register_geometry(s, f, sphere("c")).unwrap();
        state
            .exclude_collisions_within(&GeometrySet::from(f))
            .unwrap();
        assert!(state.filters.is_filtered(a, b));
        assert!(!state.filters.is_filtered(a, c));
        assert_eq!(state.filters.len(), 1);
    }

    #[test]
    fn filter_with_unknown_member_fails_without_effect() {
        let (mut state, s, f) = state_with_frame();
        let a = state
            .register_geometry(s, f, sphere("a").with_role(RoleProperties::proximity()))
            .unwrap();
        let ghost = GeometryId::next();
        let set = GeometrySet::new().with(a).with(ghost);
        assert!(matches!(
            state.exclude_collisions_within(&set),
            Err(GeometryError::UnknownGeometry { id, .. }) if id == ghost
        ));
        assert!(state.filters.is_empty());
    }
}
