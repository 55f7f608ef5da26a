//! Runtime contexts: independent snapshots of the model.

use std::time::Instant;

use indexmap::IndexMap;
use scenic_core::{GeometryError, PosePort, Scalar, SourceId};
use scenic_state::{
    FramePoseVector, GeometryState, PoseProvider, PoseUpdateStats, SceneGraphInspector,
};
use tracing::{debug, trace, warn};

use crate::metrics::PoseUpdateMetrics;
use crate::query::QueryObject;

// Compile-time assertion: contexts move between simulation threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<GeometryContext<f64>>();
        assert_send::<GeometryContext<scenic_core::AutoDiff<6>>>();
    }
};

/// A runtime snapshot of the topology plus the pose inputs of one running
/// instance.
///
/// Owns its own [`GeometryState`]; nothing is shared with the model or with
/// sibling contexts, so independent contexts may be used from different
/// threads concurrently.
#[derive(Clone, Debug)]
pub struct GeometryContext<T: Scalar> {
    state: GeometryState<T>,
    /// Port bindings of the sources present at allocation.
    ports: IndexMap<SourceId, PosePort>,
    pose_inputs: IndexMap<PosePort, FramePoseVector<T>>,
    metrics: PoseUpdateMetrics,
}

/// Pose inputs looked up through the context's port bindings.
struct PortInputs<'a, T: Scalar> {
    ports: &'a IndexMap<SourceId, PosePort>,
    inputs: &'a IndexMap<PosePort, FramePoseVector<T>>,
}

impl<T: Scalar> PoseProvider<T> for PortInputs<'_, T> {
    fn poses_for(&self, source: SourceId) -> Option<&FramePoseVector<T>> {
        self.ports.get(&source).and_then(|port| self.inputs.get(port))
    }

    fn supplied_sources(&self) -> Vec<SourceId> {
        self.ports
            .iter()
            .filter(|(_, port)| self.inputs.contains_key(*port))
            .map(|(source, _)| *source)
            .collect()
    }
}

impl<T: Scalar> GeometryContext<T> {
    pub(crate) fn new(state: GeometryState<T>, ports: IndexMap<SourceId, PosePort>) -> Self {
        Self {
            state,
            ports,
            pose_inputs: IndexMap::new(),
            metrics: PoseUpdateMetrics::default(),
        }
    }

    /// The context's private geometry state.
    pub fn state(&self) -> &GeometryState<T> {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut GeometryState<T> {
        &mut self.state
    }

    /// Topology queries against this context only.
    pub fn inspector(&self) -> SceneGraphInspector<'_, T> {
        self.state.inspector()
    }

    /// Topology and world-pose queries against this context.
    pub fn query_object(&self) -> QueryObject<'_, T> {
        QueryObject::new(&self.state)
    }

    /// Metrics of the most recent full pose update.
    pub fn last_metrics(&self) -> &PoseUpdateMetrics {
        &self.metrics
    }

    // ── Pose inputs ─────────────────────────────────────────────

    /// The pose port bound to `source` in this context.
    pub fn source_pose_port(&self, source: SourceId) -> Result<PosePort, GeometryError> {
        self.ports
            .get(&source)
            .copied()
            .ok_or(GeometryError::UnknownSource {
                id: source,
                operation: "source_pose_port",
            })
    }

    /// Fix the pose record read from `port` by subsequent updates.
    ///
    /// The record must belong to the source bound to the port.
    pub fn set_pose_input(
        &mut self,
        port: PosePort,
        poses: FramePoseVector<T>,
    ) -> Result<(), GeometryError> {
        let expected = self
            .ports
            .iter()
            .find(|(_, p)| **p == port)
            .map(|(s, _)| *s)
            .ok_or(GeometryError::UnknownPort { port })?;
        if poses.source_id() != expected {
            return Err(GeometryError::PortSourceMismatch {
                port,
                expected,
                actual: poses.source_id(),
            });
        }
        self.pose_inputs.insert(port, poses);
        Ok(())
    }

    /// The record currently fixed on `port`.
    pub fn pose_input(&self, port: PosePort) -> Option<&FramePoseVector<T>> {
        self.pose_inputs.get(&port)
    }

    /// Drop every fixed pose record.
    pub fn clear_pose_inputs(&mut self) {
        self.pose_inputs.clear();
    }

    // ── Pose update ─────────────────────────────────────────────

    /// Validate the fixed inputs of every source registered in this context
    /// and recompute all world poses.
    pub fn full_pose_update(&mut self) -> Result<PoseUpdateStats, GeometryError> {
        let start = Instant::now();
        let inputs = PortInputs {
            ports: &self.ports,
            inputs: &self.pose_inputs,
        };
        let result = self.state.full_pose_update(&inputs);
        self.metrics.total_us = start.elapsed().as_micros() as u64;
        match &result {
            Ok(stats) => {
                self.metrics.frames_updated = stats.frames_updated;
                self.metrics.geometries_updated = stats.geometries_updated;
                self.metrics.updates += 1;
                trace!(
                    frames = stats.frames_updated,
                    geometries = stats.geometries_updated,
                    total_us = self.metrics.total_us,
                    "context pose update"
                );
            }
            Err(e) => {
                self.metrics.rejected_updates += 1;
                warn!(error = %e, "context pose update rejected");
            }
        }
        result
    }

    // ── Transmogrification ──────────────────────────────────────

    /// A copy of this context over scalar type `U`: same IDs, ports,
    /// topology and pose inputs.
    ///
    /// Pose inputs go through [`Scalar::convert`], so their derivatives are
    /// kept when `U` is `T` and dropped otherwise.
    pub fn transmogrify<U: Scalar>(&self) -> GeometryContext<U> {
        GeometryContext {
            state: self.state.transmogrify(),
            ports: self.ports.clone(),
            pose_inputs: self
                .pose_inputs
                .iter()
                .map(|(port, poses)| (*port, poses.cast()))
                .collect(),
            metrics: self.metrics.clone(),
        }
    }

    /// Replace this context's topology and pose inputs with those of a
    /// context of another scalar type.
    ///
    /// Derivatives in the copied inputs survive only when `U` is `T`.
    pub fn set_state_from<U: Scalar>(&mut self, other: &GeometryContext<U>) {
        self.state = other.state.transmogrify();
        self.ports = other.ports.clone();
        self.pose_inputs = other
            .pose_inputs
            .iter()
            .map(|(port, poses)| (*port, poses.cast()))
            .collect();
        debug!(
            frames = self.state.inspector().num_frames(),
            geometries = self.state.inspector().num_geometries(),
            "copied context state across scalar types"
        );
    }
}
