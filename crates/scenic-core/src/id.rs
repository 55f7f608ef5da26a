//! Strongly-typed identifiers and the [`FrameChain`] type alias.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`SourceId`] allocation.
static SOURCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`FrameId`] allocation. Starts at 1; 0 is the world frame.
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`GeometryId`] allocation.
static GEOMETRY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies a registration principal (a geometry source).
///
/// Allocated from a monotonic atomic counter via [`SourceId::next`]. IDs are
/// never reused, so an ID minted by one state can never alias an unrelated
/// source in the model, a context, or a transmogrified copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    /// Allocate a fresh, unique source ID. Thread-safe.
    pub fn next() -> Self {
        Self(SOURCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a coordinate frame.
///
/// [`FrameId::WORLD`] is reserved for the single immovable world frame that
/// every state contains. All other IDs come from [`FrameId::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// The world frame, shared by all sources.
    pub const WORLD: Self = Self(0);

    /// Allocate a fresh, unique frame ID. Thread-safe.
    pub fn next() -> Self {
        Self(FRAME_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Whether this is the world frame.
    pub fn is_world(self) -> bool {
        self == Self::WORLD
    }

    /// The raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a geometry (a shape instance attached to a frame or to another
/// geometry).
///
/// Removal invalidates the ID; it is never handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(u64);

impl GeometryId {
    /// Allocate a fresh, unique geometry ID. Thread-safe.
    pub fn next() -> Self {
        Self(GEOMETRY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Either a frame or a geometry.
///
/// Used as the anchor argument of geometry registration and as the subject of
/// ownership and name queries that accept both kinds of entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    /// A coordinate frame.
    Frame(FrameId),
    /// A geometry.
    Geometry(GeometryId),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(id) => write!(f, "frame {id}"),
            Self::Geometry(id) => write!(f, "geometry {id}"),
        }
    }
}

impl From<FrameId> for EntityId {
    fn from(v: FrameId) -> Self {
        Self::Frame(v)
    }
}

impl From<GeometryId> for EntityId {
    fn from(v: GeometryId) -> Self {
        Self::Geometry(v)
    }
}

/// Index of a per-source pose input port.
///
/// Ports are numbered in source registration order and keep their index
/// across transmogrification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PosePort(pub u32);

impl fmt::Display for PosePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PosePort {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A chain of frames from some frame up to (and including) the world frame.
///
/// Uses `SmallVec<[FrameId; 8]>` so typical kinematic trees do not touch
/// the heap; deeper chains spill transparently.
pub type FrameChain = SmallVec<[FrameId; 8]>;
