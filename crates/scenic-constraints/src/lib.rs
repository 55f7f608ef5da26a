//! Kinematic constraints for the Scenic scene graph.
//!
//! Constraints are built against a topology view (to validate the frames
//! they reference) and evaluated against a [`QueryObject`] after a full
//! pose update. Every constraint is generic over [`Scalar`], so evaluating
//! it on a context transmogrified to `AutoDiff<N>` yields its gradient with
//! respect to whatever the pose inputs were seeded with.
//!
//! [`QueryObject`]: scenic_engine::QueryObject
//! [`Scalar`]: scenic_core::Scalar

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod orientation;

pub use error::ConstraintError;
pub use orientation::OrientationConstraint;
