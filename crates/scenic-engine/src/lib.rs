//! Scene graph engine for Scenic.
//!
//! [`SceneGraph`] owns the long-lived *model*: the topology every runtime
//! instance starts from. [`SceneGraph::allocate_context`] deep-copies the
//! model into a [`GeometryContext`], which a running simulation mutates and
//! updates independently of the model and of every other context.
//!
//! # Data flow
//!
//! ```text
//!  producers ──PoseSender──> PoseIngress ──drain_into──┐
//!                                                      v
//!  SceneGraph (model) ──allocate_context──> GeometryContext
//!       │                                     │  pose inputs per port
//!       │ *_in(ctx, ..) mutations ───────────>│  full_pose_update()
//!       │                                     v
//!       └── make_pose_bundle()          QueryObject / PoseBundle
//! ```
//!
//! Model-form mutations (`register_frame`, `register_geometry`, ...) only
//! change the model and therefore only affect contexts allocated afterwards.
//! Context forms (`register_frame_in`, `register_geometry_in`, ...) only
//! change the addressed context.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bundle;
pub mod config;
pub mod context;
pub mod ingress;
pub mod metrics;
pub mod query;
pub mod scene_graph;

pub use bundle::{PoseBundle, PoseBundleEntry};
pub use config::{ConfigError, SceneGraphConfig};
pub use context::GeometryContext;
pub use ingress::{IngressError, PoseIngress, PoseSender};
pub use metrics::PoseUpdateMetrics;
pub use query::QueryObject;
pub use scene_graph::SceneGraph;
