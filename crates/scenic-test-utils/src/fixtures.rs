//! Reusable geometry fixtures.
//!
//! - [`sphere_instance`]: a named unit-radius sphere with no roles.
//! - [`proximity_sphere`] / [`illustrated_sphere`]: the same with one role.
//! - [`MockPoseSource`]: a source owning one or more frames that can be
//!   told to omit some of them from its output or to report frames it does
//!   not own.

use scenic_core::{FrameId, GeometryError, Pose, RoleProperties, Scalar, Shape, SourceId};
use scenic_engine::{GeometryContext, SceneGraph};
use scenic_state::{FramePoseVector, GeometryFrame, GeometryInstance};

pub fn sphere_instance(name: &str) -> GeometryInstance {
    GeometryInstance::new(Pose::identity(), Shape::sphere(1.0), name)
}

pub fn proximity_sphere(name: &str) -> GeometryInstance {
    sphere_instance(name).with_role(RoleProperties::proximity())
}

pub fn illustrated_sphere(name: &str) -> GeometryInstance {
    sphere_instance(name).with_role(RoleProperties::illustration())
}

/// A pose-producing source with a configurable output.
///
/// Registers itself with one frame on construction. Frames added with
/// `reported = false` are registered but left out of [`poses`]; frames
/// passed to [`add_extra_pose`] appear in the output even though the source
/// never registered them.
///
/// [`poses`]: MockPoseSource::poses
/// [`add_extra_pose`]: MockPoseSource::add_extra_pose
pub struct MockPoseSource {
    source: SourceId,
    reported: Vec<(FrameId, Pose<f64>)>,
    unreported: Vec<FrameId>,
    extra: Vec<FrameId>,
}

impl MockPoseSource {
    pub fn new<T: Scalar>(graph: &mut SceneGraph<T>, name: &str) -> Result<Self, GeometryError> {
        let source = graph.register_source(Some(name))?;
        let frame = graph.register_frame(source, GeometryFrame::new(format!("{name}_frame_0")))?;
        Ok(Self {
            source,
            reported: vec![(frame, Pose::identity())],
            unreported: Vec::new(),
            extra: Vec::new(),
        })
    }

    pub fn source_id(&self) -> SourceId {
        self.source
    }

    /// Every frame registered through this mock, reported ones first.
    pub fn frame_ids(&self) -> Vec<FrameId> {
        self.reported
            .iter()
            .map(|(f, _)| *f)
            .chain(self.unreported.iter().copied())
            .collect()
    }

    /// The first frame registered on construction.
    pub fn root_frame(&self) -> FrameId {
        self.reported[0].0
    }

    /// Register another frame under the world frame in the model.
    pub fn add_frame<T: Scalar>(
        &mut self,
        graph: &mut SceneGraph<T>,
        reported: bool,
    ) -> Result<FrameId, GeometryError> {
        let index = self.reported.len() + self.unreported.len();
        let name = format!("{}_frame_{index}", self.source);
        let frame = graph.register_frame(self.source, GeometryFrame::new(name))?;
        if reported {
            self.reported.push((frame, Pose::identity()));
        } else {
            self.unreported.push(frame);
        }
        Ok(frame)
    }

    /// Report a pose for `frame` whether or not this source owns it.
    pub fn add_extra_pose(&mut self, frame: FrameId) {
        self.extra.push(frame);
    }

    /// Set the pose reported for one of the reported frames.
    pub fn set_pose(&mut self, frame: FrameId, pose: Pose<f64>) {
        if let Some(entry) = self.reported.iter_mut().find(|(f, _)| *f == frame) {
            entry.1 = pose;
        }
    }

    pub fn poses<T: Scalar>(&self) -> FramePoseVector<T> {
        let mut poses = FramePoseVector::new(self.source);
        for (frame, pose) in &self.reported {
            poses.set_value(*frame, pose.cast());
        }
        for frame in &self.extra {
            poses.set_value(*frame, Pose::identity());
        }
        poses
    }

    /// Fix this source's output on its port in `ctx`.
    pub fn write_to<T: Scalar>(
        &self,
        graph: &SceneGraph<T>,
        ctx: &mut GeometryContext<T>,
    ) -> Result<(), GeometryError> {
        let port = graph.source_pose_port(self.source)?;
        ctx.set_pose_input(port, self.poses())
    }
}
