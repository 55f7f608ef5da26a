//! Scenic: a scene graph of pose sources, frames and geometries.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Scenic sub-crates. For most users, adding `scenic` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use scenic::prelude::*;
//!
//! // Model: one source driving one frame with a proximity sphere.
//! let mut graph = SceneGraph::<f64>::new();
//! let source = graph.register_source(Some("arm")).unwrap();
//! let link = graph.register_frame(source, GeometryFrame::new("link")).unwrap();
//! let tip = graph
//!     .register_geometry(
//!         source,
//!         link,
//!         GeometryInstance::new(
//!             Pose::from_translation(Vec3::from_f64(0.5, 0.0, 0.0)),
//!             Shape::sphere(0.05),
//!             "tip",
//!         )
//!         .with_role(RoleProperties::proximity()),
//!     )
//!     .unwrap();
//!
//! // Context: fix the source's pose output and update world poses.
//! let mut ctx = graph.allocate_context();
//! let mut poses = FramePoseVector::new(source);
//! poses.set_value(link, Pose::from_translation(Vec3::from_f64(0.0, 1.0, 0.0)));
//! let port = graph.source_pose_port(source).unwrap();
//! ctx.set_pose_input(port, poses).unwrap();
//! graph.full_pose_update(&mut ctx).unwrap();
//!
//! let x_wg = ctx.query_object().pose_in_world(tip).unwrap();
//! assert!(x_wg.approx_eq(&Pose::from_translation(Vec3::from_f64(0.5, 1.0, 0.0)), 1e-12));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `scenic-core` | IDs, errors, scalars, autodiff, pose math, shapes, roles |
//! | [`state`] | `scenic-state` | Geometry registry, collision filters, inspector |
//! | [`engine`] | `scenic-engine` | Scene graph model, contexts, pose ingress, bundles |
//! | [`constraints`] | `scenic-constraints` | Constraints evaluated on world poses |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`scenic-core`).
///
/// IDs, [`types::GeometryError`], the [`types::Scalar`] trait with its
/// [`types::AutoDiff`] implementation, and pose math.
pub use scenic_core as types;

/// The geometry registry (`scenic-state`).
///
/// [`state::GeometryState`] holds sources, frames, geometries and collision
/// filters; [`state::SceneGraphInspector`] is its read-only view.
pub use scenic_state as state;

/// Model and runtime contexts (`scenic-engine`).
///
/// [`engine::SceneGraph`] owns the model and allocates
/// [`engine::GeometryContext`]s.
pub use scenic_engine as engine;

/// Constraints on world poses (`scenic-constraints`).
pub use scenic_constraints as constraints;

/// Common imports for typical Scenic usage.
///
/// ```rust
/// use scenic::prelude::*;
/// ```
pub mod prelude {
    // Ids and errors
    pub use scenic_core::{EntityId, FrameId, GeometryError, GeometryId, PosePort, SourceId};

    // Numerics
    pub use scenic_core::{AutoDiff, Pose, Rotation, Scalar, Vec3};

    // Shapes and roles
    pub use scenic_core::{PropertyBundle, PropertyValue, Role, RoleProperties, Shape};

    // Registry
    pub use scenic_state::{
        FramePoseVector, GeometryFrame, GeometryInstance, GeometrySet, SceneGraphInspector,
    };

    // Engine
    pub use scenic_engine::{
        GeometryContext, PoseBundle, PoseIngress, PoseSender, QueryObject, SceneGraph,
        SceneGraphConfig,
    };

    // Constraints
    pub use scenic_constraints::{ConstraintError, OrientationConstraint};
}
