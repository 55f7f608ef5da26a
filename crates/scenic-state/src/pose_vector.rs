//! Per-source pose input records.

use indexmap::IndexMap;
use scenic_core::{FrameId, Pose, Scalar, SourceId};

/// Poses `X_PF` of one source's dynamic frames, each in its parent frame.
///
/// A full pose update expects exactly one entry per frame the source has
/// registered in the state being updated.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePoseVector<T: Scalar> {
    source: SourceId,
    poses: IndexMap<FrameId, Pose<T>>,
}

impl<T: Scalar> FramePoseVector<T> {
    /// An empty record for `source`.
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            poses: IndexMap::new(),
        }
    }

    /// A record holding the identity pose for each of `frames`.
    pub fn with_frames(source: SourceId, frames: impl IntoIterator<Item = FrameId>) -> Self {
        Self {
            source,
            poses: frames.into_iter().map(|f| (f, Pose::identity())).collect(),
        }
    }

    /// The source this record belongs to.
    pub fn source_id(&self) -> SourceId {
        self.source
    }

    /// Set the pose of `frame`, inserting it if absent.
    pub fn set_value(&mut self, frame: FrameId, pose: Pose<T>) {
        self.poses.insert(frame, pose);
    }

    /// The pose of `frame`, if present.
    pub fn value(&self, frame: FrameId) -> Option<&Pose<T>> {
        self.poses.get(&frame)
    }

    /// Whether `frame` has an entry.
    pub fn contains(&self, frame: FrameId) -> bool {
        self.poses.contains_key(&frame)
    }

    /// Frames with an entry, in insertion order.
    pub fn frame_ids(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.poses.keys().copied()
    }

    /// `(frame, pose)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Pose<T>)> {
        self.poses.iter().map(|(f, p)| (*f, p))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.poses.clear();
    }

    /// Carry the record into another scalar type.
    pub fn cast<U: Scalar>(&self) -> FramePoseVector<U> {
        FramePoseVector {
            source: self.source,
            poses: self.poses.iter().map(|(f, p)| (*f, p.cast())).collect(),
        }
    }
}

/// Anything that can hand a full pose update the record for a source.
pub trait PoseProvider<T: Scalar> {
    /// The record supplied for `source`, if any.
    fn poses_for(&self, source: SourceId) -> Option<&FramePoseVector<T>>;

    /// Sources with a record, used to detect records for unknown sources.
    fn supplied_sources(&self) -> Vec<SourceId>;
}

impl<T: Scalar> PoseProvider<T> for IndexMap<SourceId, FramePoseVector<T>> {
    fn poses_for(&self, source: SourceId) -> Option<&FramePoseVector<T>> {
        self.get(&source)
    }

    fn supplied_sources(&self) -> Vec<SourceId> {
        self.keys().copied().collect()
    }
}

impl<T: Scalar> PoseProvider<T> for [FramePoseVector<T>] {
    fn poses_for(&self, source: SourceId) -> Option<&FramePoseVector<T>> {
        self.iter().find(|v| v.source_id() == source)
    }

    fn supplied_sources(&self) -> Vec<SourceId> {
        self.iter().map(FramePoseVector::source_id).collect()
    }
}

impl<T: Scalar> PoseProvider<T> for Vec<FramePoseVector<T>> {
    fn poses_for(&self, source: SourceId) -> Option<&FramePoseVector<T>> {
        self.as_slice().poses_for(source)
    }

    fn supplied_sources(&self) -> Vec<SourceId> {
        self.as_slice().supplied_sources()
    }
}
