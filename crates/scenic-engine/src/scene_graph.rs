//! The scene graph: model ownership, pose ports and context allocation.

use indexmap::IndexMap;
use scenic_core::{
    AutoDiff, EntityId, FrameId, GeometryError, GeometryId, PosePort, RoleProperties, Scalar,
    SourceId,
};
use scenic_state::{
    GeometryFrame, GeometryInstance, GeometrySet, GeometryState, PoseUpdateStats,
    SceneGraphInspector,
};
use tracing::debug;

use crate::bundle::PoseBundle;
use crate::config::{ConfigError, SceneGraphConfig};
use crate::context::GeometryContext;
use crate::ingress::PoseIngress;

/// Owner of the model topology and the per-source pose ports.
///
/// Model forms of the mutating operations change only the model, so they
/// affect contexts allocated afterwards and never existing ones. The `*_in`
/// forms change only the context passed to them.
#[derive(Clone, Debug)]
pub struct SceneGraph<T: Scalar> {
    model: GeometryState<T>,
    ports: IndexMap<SourceId, PosePort>,
    config: SceneGraphConfig,
}

impl<T: Scalar> SceneGraph<T> {
    /// A scene graph with the default configuration.
    pub fn new() -> Self {
        let config = SceneGraphConfig::default();
        Self {
            model: GeometryState::new(config.state.clone()),
            ports: IndexMap::new(),
            config,
        }
    }

    /// A scene graph with a validated configuration.
    pub fn with_config(config: SceneGraphConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            model: GeometryState::new(config.state.clone()),
            ports: IndexMap::new(),
            config,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &SceneGraphConfig {
        &self.config
    }

    /// Topology queries against the model.
    pub fn model_inspector(&self) -> SceneGraphInspector<'_, T> {
        self.model.inspector()
    }

    /// The model's geometry state.
    pub fn model(&self) -> &GeometryState<T> {
        &self.model
    }

    // ── Sources and ports ───────────────────────────────────────

    /// Register a source in the model and bind it a pose port.
    ///
    /// Sources exist only in the model; contexts allocated earlier never see
    /// them.
    pub fn register_source(&mut self, name: Option<&str>) -> Result<SourceId, GeometryError> {
        let id = self.model.register_source(name)?;
        let port = PosePort(self.ports.len() as u32);
        self.ports.insert(id, port);
        debug!(source = id.get(), port = port.0, "bound pose port");
        Ok(id)
    }

    /// Whether the source is registered in the model.
    pub fn source_is_registered(&self, id: SourceId) -> bool {
        self.model.source_is_registered(id)
    }

    /// The reserved world frame.
    pub fn world_frame_id(&self) -> FrameId {
        FrameId::WORLD
    }

    /// The pose port bound to `source`.
    pub fn source_pose_port(&self, source: SourceId) -> Result<PosePort, GeometryError> {
        self.ports
            .get(&source)
            .copied()
            .ok_or(GeometryError::UnknownSource {
                id: source,
                operation: "source_pose_port",
            })
    }

    /// Number of pose ports, one per registered source.
    pub fn num_input_ports(&self) -> usize {
        self.ports.len()
    }

    /// A pose channel sized by the configured ingress capacity.
    pub fn pose_ingress(&self) -> PoseIngress<T> {
        PoseIngress::new(self.config.ingress_capacity)
    }

    // ── Model mutation ──────────────────────────────────────────

    /// Register a frame under the world frame in the model.
    pub fn register_frame(
        &mut self,
        source: SourceId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        self.model.register_frame(source, frame)
    }

    /// Register a frame under `parent` in the model.
    pub fn register_child_frame(
        &mut self,
        source: SourceId,
        parent: FrameId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        self.model.register_child_frame(source, parent, frame)
    }

    /// Register a geometry on a frame or geometry in the model.
    pub fn register_geometry(
        &mut self,
        source: SourceId,
        anchor: impl Into<EntityId>,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        self.model.register_geometry(source, anchor, instance)
    }

    /// Register a world-fixed geometry in the model.
    pub fn register_anchored_geometry(
        &mut self,
        source: SourceId,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        self.model.register_anchored_geometry(source, instance)
    }

    /// Remove a geometry from the model.
    pub fn remove_geometry(
        &mut self,
        source: SourceId,
        id: GeometryId,
    ) -> Result<(), GeometryError> {
        self.model.remove_geometry(source, id)
    }

    /// Assign a role in the model.
    pub fn assign_role(
        &mut self,
        source: SourceId,
        id: GeometryId,
        properties: RoleProperties,
    ) -> Result<(), GeometryError> {
        self.model.assign_role(source, id, properties)
    }

    /// Filter collisions within a set in the model.
    pub fn exclude_collisions_within(&mut self, set: &GeometrySet) -> Result<(), GeometryError> {
        self.model.exclude_collisions_within(set)
    }

    /// Filter collisions between two sets in the model.
    pub fn exclude_collisions_between(
        &mut self,
        set_a: &GeometrySet,
        set_b: &GeometrySet,
    ) -> Result<(), GeometryError> {
        self.model.exclude_collisions_between(set_a, set_b)
    }

    // ── Context mutation ────────────────────────────────────────

    /// Register a frame under the world frame in `ctx` only.
    pub fn register_frame_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        ctx.state_mut().register_frame(source, frame)
    }

    /// Register a frame under `parent` in `ctx` only.
    pub fn register_child_frame_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        parent: FrameId,
        frame: GeometryFrame,
    ) -> Result<FrameId, GeometryError> {
        ctx.state_mut().register_child_frame(source, parent, frame)
    }

    /// Register a geometry in `ctx` only.
    pub fn register_geometry_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        anchor: impl Into<EntityId>,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        ctx.state_mut().register_geometry(source, anchor, instance)
    }

    /// Register a world-fixed geometry in `ctx` only.
    pub fn register_anchored_geometry_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        instance: GeometryInstance,
    ) -> Result<GeometryId, GeometryError> {
        ctx.state_mut().register_anchored_geometry(source, instance)
    }

    /// Remove a geometry from `ctx` only.
    pub fn remove_geometry_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        id: GeometryId,
    ) -> Result<(), GeometryError> {
        ctx.state_mut().remove_geometry(source, id)
    }

    /// Assign a role in `ctx` only.
    pub fn assign_role_in(
        &self,
        ctx: &mut GeometryContext<T>,
        source: SourceId,
        id: GeometryId,
        properties: RoleProperties,
    ) -> Result<(), GeometryError> {
        ctx.state_mut().assign_role(source, id, properties)
    }

    /// Filter collisions within a set in `ctx` only.
    pub fn exclude_collisions_within_in(
        &self,
        ctx: &mut GeometryContext<T>,
        set: &GeometrySet,
    ) -> Result<(), GeometryError> {
        ctx.state_mut().exclude_collisions_within(set)
    }

    /// Filter collisions between two sets in `ctx` only.
    pub fn exclude_collisions_between_in(
        &self,
        ctx: &mut GeometryContext<T>,
        set_a: &GeometrySet,
        set_b: &GeometrySet,
    ) -> Result<(), GeometryError> {
        ctx.state_mut().exclude_collisions_between(set_a, set_b)
    }

    // ── Contexts ────────────────────────────────────────────────

    /// Deep-copy the model into a new, independent context.
    pub fn allocate_context(&self) -> GeometryContext<T> {
        let inspector = self.model.inspector();
        debug!(
            sources = inspector.num_sources(),
            frames = inspector.num_frames(),
            geometries = inspector.num_geometries(),
            "allocated context"
        );
        GeometryContext::new(self.model.clone(), self.ports.clone())
    }

    /// Validate `ctx`'s pose inputs and recompute its world poses.
    pub fn full_pose_update(
        &self,
        ctx: &mut GeometryContext<T>,
    ) -> Result<PoseUpdateStats, GeometryError> {
        ctx.full_pose_update()
    }

    /// A pose bundle sized from the model, holding identity poses.
    pub fn make_pose_bundle(&self) -> Result<PoseBundle<T>, GeometryError> {
        PoseBundle::new(self.model.inspector())
    }

    /// Run a full pose update on `ctx` and report the world poses of its
    /// illustration frames.
    pub fn calc_pose_bundle(
        &self,
        ctx: &mut GeometryContext<T>,
    ) -> Result<PoseBundle<T>, GeometryError> {
        ctx.full_pose_update()?;
        PoseBundle::from_state(ctx.state())
    }

    // ── Transmogrification ──────────────────────────────────────

    /// A structurally identical scene graph over scalar type `U`, with the
    /// same IDs, ports and configuration.
    pub fn transmogrify<U: Scalar>(&self) -> SceneGraph<U> {
        debug!(
            frames = self.model.inspector().num_frames(),
            ports = self.ports.len(),
            "transmogrified scene graph"
        );
        SceneGraph {
            model: self.model.transmogrify(),
            ports: self.ports.clone(),
            config: self.config.clone(),
        }
    }
}

impl SceneGraph<f64> {
    /// [`transmogrify`](SceneGraph::transmogrify) into `N`-variable
    /// forward-mode derivatives.
    pub fn to_autodiff<const N: usize>(&self) -> SceneGraph<AutoDiff<N>> {
        self.transmogrify()
    }
}

impl<T: Scalar> Default for SceneGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenic_core::{Pose, Shape};

    #[test]
    fn ports_follow_registration_order() {
        let mut graph = SceneGraph::<f64>::new();
        let a = graph.register_source(Some("a")).unwrap();
        let b = graph.register_source(None).unwrap();
        assert_eq!(graph.source_pose_port(a).unwrap(), PosePort(0));
        assert_eq!(graph.source_pose_port(b).unwrap(), PosePort(1));
        assert_eq!(graph.num_input_ports(), 2);
    }

    #[test]
    fn unknown_source_has_no_port() {
        let graph = SceneGraph::<f64>::new();
        let ghost = SourceId::next();
        assert_eq!(
            graph.source_pose_port(ghost).unwrap_err().to_string(),
            format!("Can't acquire pose port for unknown source id: {ghost}.")
        );
    }

    #[test]
    fn duplicate_source_does_not_consume_port() {
        let mut graph = SceneGraph::<f64>::new();
        graph.register_source(Some("dup")).unwrap();
        assert!(graph.register_source(Some("dup")).is_err());
        assert_eq!(graph.num_input_ports(), 1);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SceneGraphConfig {
            ingress_capacity: 0,
            ..SceneGraphConfig::default()
        };
        assert_eq!(
            SceneGraph::<f64>::with_config(config).unwrap_err(),
            ConfigError::IngressCapacityZero
        );
    }

    #[test]
    fn transmogrify_preserves_ports() {
        let mut graph = SceneGraph::<f64>::new();
        let s = graph.register_source(None).unwrap();
        let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
        graph
            .register_geometry(
                s,
                f,
                GeometryInstance::new(Pose::identity(), Shape::sphere(1.0), "g"),
            )
            .unwrap();
        let ad = graph.to_autodiff::<3>();
        assert_eq!(ad.source_pose_port(s).unwrap(), PosePort(0));
        assert_eq!(ad.model_inspector().num_geometries(), 1);
        assert_eq!(ad.model_inspector().get_name(f).unwrap(), "f");
    }
}
