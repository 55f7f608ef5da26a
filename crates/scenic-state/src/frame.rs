//! Frames: the registration descriptor and the stored record.

use indexmap::IndexSet;
use scenic_core::{FrameId, GeometryId, Pose, Scalar, SourceId};

/// Description of a frame to register.
///
/// The pose is the frame's initial pose in its parent; at runtime the owning
/// source supplies the current value on every full pose update.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryFrame {
    name: String,
    pose: Pose<f64>,
    frame_group: i32,
}

impl GeometryFrame {
    /// A frame with the identity initial pose and frame group 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose: Pose::identity(),
            frame_group: 0,
        }
    }

    /// Set the initial pose in the parent frame.
    pub fn with_pose(mut self, pose: Pose<f64>) -> Self {
        self.pose = pose;
        self
    }

    /// Set the frame group (an opaque tag for consumers).
    pub fn with_frame_group(mut self, frame_group: i32) -> Self {
        self.frame_group = frame_group;
        self
    }

    /// Frame name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial pose in the parent frame.
    pub fn pose(&self) -> &Pose<f64> {
        &self.pose
    }

    /// Frame group tag.
    pub fn frame_group(&self) -> i32 {
        self.frame_group
    }
}

/// Stored frame record.
#[derive(Clone, Debug)]
pub(crate) struct InternalFrame<T: Scalar> {
    pub(crate) id: FrameId,
    /// `None` only for the world frame.
    pub(crate) source: Option<SourceId>,
    pub(crate) name: String,
    /// The world frame is its own parent.
    pub(crate) parent: FrameId,
    pub(crate) frame_group: i32,
    pub(crate) pose_in_parent: Pose<T>,
    pub(crate) child_frames: IndexSet<FrameId>,
    /// Every live geometry resolving to this frame, nested ones included.
    pub(crate) geometries: IndexSet<GeometryId>,
}

impl<T: Scalar> InternalFrame<T> {
    pub(crate) fn world() -> Self {
        Self {
            id: FrameId::WORLD,
            source: None,
            name: "world".to_string(),
            parent: FrameId::WORLD,
            frame_group: 0,
            pose_in_parent: Pose::identity(),
            child_frames: IndexSet::new(),
            geometries: IndexSet::new(),
        }
    }

    pub(crate) fn cast<U: Scalar>(&self) -> InternalFrame<U> {
        InternalFrame {
            id: self.id,
            source: self.source,
            name: self.name.clone(),
            parent: self.parent,
            frame_group: self.frame_group,
            pose_in_parent: self.pose_in_parent.cast(),
            child_frames: self.child_frames.clone(),
            geometries: self.geometries.clone(),
        }
    }
}
