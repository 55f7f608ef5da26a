//! Core types and traits for the Scenic geometry engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Scenic workspace:
//! entity IDs, error types, the [`Scalar`] trait with its forward-mode
//! [`AutoDiff`] implementation, rigid-transform math, and the shape and
//! role descriptions attached to geometries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod autodiff;
pub mod error;
pub mod id;
pub mod pose;
pub mod role;
pub mod rotation;
pub mod scalar;
pub mod shape;
pub mod vec3;

pub use autodiff::AutoDiff;
pub use error::GeometryError;
pub use id::{EntityId, FrameChain, FrameId, GeometryId, PosePort, SourceId};
pub use pose::Pose;
pub use role::{PropertyBundle, PropertyValue, Role, RoleProperties};
pub use rotation::Rotation;
pub use scalar::Scalar;
pub use shape::Shape;
pub use vec3::Vec3;
