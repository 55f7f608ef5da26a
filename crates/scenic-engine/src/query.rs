//! World-pose queries for collision and visualization consumers.

use scenic_core::{EntityId, FrameId, GeometryError, GeometryId, Pose, Role, Scalar};
use scenic_state::{GeometryState, SceneGraphInspector};

/// Read-only access to a context's topology and its world poses as of the
/// last full pose update.
#[derive(Debug)]
pub struct QueryObject<'a, T: Scalar> {
    state: &'a GeometryState<T>,
}

impl<T: Scalar> Clone for QueryObject<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for QueryObject<'_, T> {}

impl<'a, T: Scalar> QueryObject<'a, T> {
    pub(crate) fn new(state: &'a GeometryState<T>) -> Self {
        Self { state }
    }

    /// Topology queries.
    pub fn inspector(&self) -> SceneGraphInspector<'a, T> {
        GeometryState::inspector(self.state)
    }

    /// `X_WE` of a frame or geometry.
    ///
    /// Fails with [`GeometryError::PoseNotAvailable`] if no full pose update
    /// has run since the topology last changed.
    pub fn pose_in_world(&self, entity: impl Into<EntityId>) -> Result<Pose<T>, GeometryError> {
        match entity.into() {
            EntityId::Frame(f) => self.state.frame_world_pose(f),
            EntityId::Geometry(g) => self.state.geometry_world_pose(g),
        }
    }

    /// `X_AB`: the pose of frame `b` measured in frame `a`.
    pub fn relative_pose(&self, a: FrameId, b: FrameId) -> Result<Pose<T>, GeometryError> {
        let x_wa = self.state.frame_world_pose(a)?;
        let x_wb = self.state.frame_world_pose(b)?;
        Ok(x_wa.inverse().compose(&x_wb))
    }

    /// Unordered pairs of proximity geometries that are not collision
    /// filtered, in registration order.
    pub fn collision_candidates(&self) -> Vec<(GeometryId, GeometryId)> {
        let ids = self.state.inspector().geometries_with_role(Role::Proximity);
        let filter = self.state.collision_filter();
        let mut pairs = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if !filter.is_filtered(a, b) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}
