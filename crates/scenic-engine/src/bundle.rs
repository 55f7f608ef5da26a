//! Visualization output: world poses of frames carrying illustration
//! geometry.

use scenic_core::{FrameId, GeometryError, Pose, Role, Scalar};
use scenic_state::{GeometryState, SceneGraphInspector};

/// One frame's entry in a [`PoseBundle`].
#[derive(Clone, Debug, PartialEq)]
pub struct PoseBundleEntry<T: Scalar> {
    /// The frame.
    pub frame: FrameId,
    /// The frame's name.
    pub name: String,
    /// The frame's group tag.
    pub frame_group: i32,
    /// `X_WF` of the frame; identity until filled.
    pub pose: Pose<T>,
}

/// World poses of every dynamic frame with at least one illustration-role
/// geometry.
///
/// The world frame is never included, and neither are frames whose only
/// geometries lack the illustration role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseBundle<T: Scalar> {
    entries: Vec<PoseBundleEntry<T>>,
}

impl<T: Scalar> PoseBundle<T> {
    /// A bundle sized from `inspector`, holding identity poses.
    pub fn new(inspector: SceneGraphInspector<'_, T>) -> Result<Self, GeometryError> {
        let entries = inspector
            .frames_with_role(Role::Illustration)
            .into_iter()
            .map(|frame| {
                Ok(PoseBundleEntry {
                    frame,
                    name: inspector.get_name(frame)?.to_string(),
                    frame_group: inspector.frame_group(frame)?,
                    pose: Pose::identity(),
                })
            })
            .collect::<Result<Vec<_>, GeometryError>>()?;
        Ok(Self { entries })
    }

    /// A bundle sized from `state` and filled with its current world poses.
    pub(crate) fn from_state(state: &GeometryState<T>) -> Result<Self, GeometryError> {
        let mut bundle = Self::new(state.inspector())?;
        for entry in &mut bundle.entries {
            entry.pose = state.frame_world_pose(entry.frame)?;
        }
        Ok(bundle)
    }

    /// Number of frames in the bundle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle holds no frames.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in frame registration order.
    pub fn entries(&self) -> &[PoseBundleEntry<T>] {
        &self.entries
    }

    /// The entry for `frame`, if present.
    pub fn get(&self, frame: FrameId) -> Option<&PoseBundleEntry<T>> {
        self.entries.iter().find(|e| e.frame == frame)
    }
}
