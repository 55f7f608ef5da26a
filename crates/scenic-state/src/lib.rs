//! Arena registry of geometric state for Scenic.
//!
//! [`GeometryState`] owns every source, frame, geometry, role assignment and
//! collision filter of one view of the topology. Entities live in
//! insertion-ordered arenas keyed by their stable IDs; there are no
//! back-references between entities beyond those IDs, so cloning a state is
//! a linear, fully independent deep copy. That clone is what the engine hands
//! out as a runtime context.
//!
//! # Layout
//!
//! ```text
//! GeometryState<T>
//! ├── sources:    SourceId   → SourceRecord (name, owned frames/geometries)
//! ├── frames:     FrameId    → InternalFrame<T> (parent, X_PF, child sets)
//! ├── geometries: GeometryId → InternalGeometry<T> (anchor, X_AG, shape, roles)
//! ├── filters:    CollisionFilter (symmetric excluded pairs)
//! └── poses:      X_WF / X_WG from the last full pose update
//! ```
//!
//! The state is generic over the [`Scalar`](scenic_core::Scalar) poses are
//! expressed in; [`GeometryState::transmogrify`] rebuilds it over another
//! scalar type with identical IDs and structure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod filter;
pub mod frame;
pub mod geometry;
pub mod geometry_set;
pub mod inspector;
pub mod pose_vector;
pub mod source;
pub mod state;
mod transmogrify;
pub mod update;

// Public re-exports for the primary API surface.
pub use config::StateConfig;
pub use filter::CollisionFilter;
pub use frame::GeometryFrame;
pub use geometry::GeometryInstance;
pub use geometry_set::GeometrySet;
pub use inspector::SceneGraphInspector;
pub use pose_vector::{FramePoseVector, PoseProvider};
pub use source::SourceRecord;
pub use state::GeometryState;
pub use update::PoseUpdateStats;
