//! Full pose update and world-pose lookup.
//!
//! A full pose update checks every source's record against its registered
//! frames, then recomputes every world pose from scratch in topological
//! order. Nothing is cached between updates: registration may happen between
//! any two evaluations.

use indexmap::{IndexMap, IndexSet};
use scenic_core::{EntityId, FrameId, GeometryError, GeometryId, Pose, Scalar};
use tracing::{trace, warn};

use crate::pose_vector::PoseProvider;
use crate::state::GeometryState;

const OP: &str = "full_pose_update";

/// Counts reported by a successful full pose update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoseUpdateStats {
    /// Dynamic frames whose world pose was computed (the world frame is not
    /// counted).
    pub frames_updated: usize,
    /// Geometries whose world pose was computed, anchored ones included.
    pub geometries_updated: usize,
}

impl<T: Scalar> GeometryState<T> {
    /// Check that `inputs` holds exactly one complete, finite record for
    /// every source with registered frames, and nothing else.
    pub fn validate_pose_inputs<P>(&self, inputs: &P) -> Result<(), GeometryError>
    where
        P: PoseProvider<T> + ?Sized,
    {
        let mut seen = IndexSet::new();
        for supplied in inputs.supplied_sources() {
            self.source_record(supplied, OP)?;
            if !seen.insert(supplied) {
                return Err(GeometryError::DuplicatePoseInput { source: supplied });
            }
        }
        for (&source, record) in &self.sources {
            let vector = inputs.poses_for(source);
            if let Some(v) = vector.filter(|v| v.source_id() != source) {
                return Err(GeometryError::PoseRecordMismatch {
                    source,
                    record_source: v.source_id(),
                });
            }
            if record.frames.is_empty() {
                if let Some(frame) = vector.and_then(|v| v.frame_ids().next()) {
                    return Err(GeometryError::UnexpectedPoseInput { source, frame });
                }
                continue;
            }
            let Some(vector) = vector else {
                return Err(GeometryError::MissingPoseInput {
                    source,
                    missing: Vec::new(),
                });
            };
            let missing: Vec<FrameId> = record
                .frames
                .iter()
                .copied()
                .filter(|f| !vector.contains(*f))
                .collect();
            if !missing.is_empty() {
                return Err(GeometryError::MissingPoseInput { source, missing });
            }
            if let Some(frame) = vector.frame_ids().find(|f| !record.owns_frame(*f)) {
                return Err(GeometryError::UnexpectedPoseInput { source, frame });
            }
            if self.config.reject_non_finite_poses {
                if let Some((frame, _)) = vector.iter().find(|(_, p)| !p.is_finite()) {
                    return Err(GeometryError::NonFinitePose { source, frame });
                }
            }
        }
        Ok(())
    }

    /// Validate `inputs` and recompute the world pose of every frame and
    /// geometry.
    ///
    /// `X_WF = X_WP * X_PF` for each frame, with `X_PF` taken from the owning
    /// source's record; `X_WG = X_WA * X_AG` for each geometry, where `A` is
    /// its frame or parent geometry. On error no stored pose changes.
    pub fn full_pose_update<P>(&mut self, inputs: &P) -> Result<PoseUpdateStats, GeometryError>
    where
        P: PoseProvider<T> + ?Sized,
    {
        if let Err(e) = self.validate_pose_inputs(inputs) {
            warn!(error = %e, "rejected pose update");
            return Err(e);
        }

        let mut frame_poses: IndexMap<FrameId, Pose<T>> =
            IndexMap::with_capacity(self.frames.len());
        frame_poses.insert(FrameId::WORLD, Pose::identity());
        for (&id, frame) in &self.frames {
            if id.is_world() {
                continue;
            }
            let x_pf = frame
                .source
                .and_then(|s| inputs.poses_for(s))
                .and_then(|v| v.value(id))
                .copied()
                .unwrap_or(frame.pose_in_parent);
            let x_wp = frame_poses
                .get(&frame.parent)
                .copied()
                .ok_or(GeometryError::UnknownFrame {
                    id: frame.parent,
                    operation: OP,
                })?;
            frame_poses.insert(id, x_wp.compose(&x_pf));
        }

        let mut geometry_poses: IndexMap<GeometryId, Pose<T>> =
            IndexMap::with_capacity(self.geometries.len());
        for (&id, geometry) in &self.geometries {
            let x_wa = match geometry.parent {
                Some(parent) => geometry_poses.get(&parent).copied().ok_or(
                    GeometryError::OrphanedGeometry {
                        geometry: id,
                        missing_parent: parent,
                    },
                )?,
                None => frame_poses.get(&geometry.frame).copied().ok_or(
                    GeometryError::UnknownFrame {
                        id: geometry.frame,
                        operation: OP,
                    },
                )?,
            };
            geometry_poses.insert(id, x_wa.compose(&geometry.pose_in_parent));
        }

        let stats = PoseUpdateStats {
            frames_updated: frame_poses.len() - 1,
            geometries_updated: geometry_poses.len(),
        };
        self.frame_world_poses = frame_poses;
        self.geometry_world_poses = geometry_poses;
        self.posed_version = Some(self.topology_version);
        trace!(
            frames = stats.frames_updated,
            geometries = stats.geometries_updated,
            "full pose update"
        );
        Ok(stats)
    }

    /// `X_WF` of a frame as of the last full pose update.
    ///
    /// The world frame is always the identity. Any other frame fails with
    /// [`GeometryError::PoseNotAvailable`] if the topology changed since the
    /// last successful update.
    pub fn frame_world_pose(&self, id: FrameId) -> Result<Pose<T>, GeometryError> {
        self.frame_record(id, "frame_world_pose")?;
        if id.is_world() {
            return Ok(Pose::identity());
        }
        self.cached_pose(id.into(), self.frame_world_poses.get(&id))
    }

    /// `X_WG` of a geometry as of the last full pose update.
    pub fn geometry_world_pose(&self, id: GeometryId) -> Result<Pose<T>, GeometryError> {
        self.geometry_record(id, "geometry_world_pose")?;
        self.cached_pose(id.into(), self.geometry_world_poses.get(&id))
    }

    fn cached_pose(
        &self,
        entity: EntityId,
        pose: Option<&Pose<T>>,
    ) -> Result<Pose<T>, GeometryError> {
        match pose {
            Some(pose) if self.poses_current() => Ok(*pose),
            _ => Err(GeometryError::PoseNotAvailable { entity }),
        }
    }
}
