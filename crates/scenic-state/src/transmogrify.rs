//! Rebuilding a state over another scalar type.

use scenic_core::Scalar;

use crate::state::GeometryState;

impl<T: Scalar> GeometryState<T> {
    /// A structurally identical state whose poses are expressed in `U`.
    ///
    /// Every ID, name, parent link, role, filter pair and the topology
    /// version carry over unchanged, so IDs cross-reference between the two
    /// states. Pose values are converted with [`Scalar::convert`]:
    /// derivatives survive only when `U` is `T`.
    pub fn transmogrify<U: Scalar>(&self) -> GeometryState<U> {
        GeometryState {
            config: self.config.clone(),
            sources: self.sources.clone(),
            frames: self
                .frames
                .iter()
                .map(|(id, f)| (*id, f.cast()))
                .collect(),
            geometries: self
                .geometries
                .iter()
                .map(|(id, g)| (*id, g.cast()))
                .collect(),
            filters: self.filters.clone(),
            frame_world_poses: self
                .frame_world_poses
                .iter()
                .map(|(id, p)| (*id, p.cast()))
                .collect(),
            geometry_world_poses: self
                .geometry_world_poses
                .iter()
                .map(|(id, p)| (*id, p.cast()))
                .collect(),
            topology_version: self.topology_version,
            posed_version: self.posed_version,
        }
    }
}
