//! Benchmark scenes for the Scenic scene graph.
//!
//! - [`reference_profile`]: 10 sources, each a 10-deep frame chain with two
//!   proximity spheres per frame (100 frames, 200 geometries)
//! - [`stress_profile`]: 100 sources of the same shape (1K frames, 2K
//!   geometries)
//! - [`BenchScene::poses_at`]: deterministic pose records for every source

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use scenic_core::{
    FrameId, GeometryError, Pose, RoleProperties, Rotation, Scalar, Shape, SourceId, Vec3,
};
use scenic_engine::SceneGraph;
use scenic_state::{FramePoseVector, GeometryFrame, GeometryInstance, GeometrySet};

/// A populated scene graph plus the frames each source must report.
pub struct BenchScene<T: Scalar> {
    /// The model.
    pub graph: SceneGraph<T>,
    /// Frames per source, root first.
    pub chains: Vec<(SourceId, Vec<FrameId>)>,
}

impl<T: Scalar> BenchScene<T> {
    /// One pose record per source at time `t`: each frame swings about z
    /// and is offset 0.1 m along x from its parent.
    pub fn poses_at(&self, t: f64) -> Vec<FramePoseVector<T>> {
        self.chains
            .iter()
            .map(|(source, frames)| {
                let mut poses = FramePoseVector::new(*source);
                for (depth, frame) in frames.iter().enumerate() {
                    let angle = T::from_f64((t + depth as f64 * 0.1).sin());
                    let rotation =
                        Rotation::from_axis_angle(Vec3::from_f64(0.0, 0.0, 1.0), angle);
                    poses.set_value(
                        *frame,
                        Pose::new(rotation, Vec3::from_f64(0.1, 0.0, 0.0)),
                    );
                }
                poses
            })
            .collect()
    }

    /// Total number of dynamic frames.
    pub fn num_frames(&self) -> usize {
        self.chains.iter().map(|(_, frames)| frames.len()).sum()
    }
}

/// Build `sources` frame chains of length `depth`, each frame carrying
/// `geometries_per_frame` proximity spheres. Collisions within each chain
/// are filtered.
pub fn chain_profile<T: Scalar>(
    sources: usize,
    depth: usize,
    geometries_per_frame: usize,
) -> Result<BenchScene<T>, GeometryError> {
    let mut graph = SceneGraph::new();
    let mut chains = Vec::with_capacity(sources);
    for s in 0..sources {
        let source = graph.register_source(Some(&format!("chain_{s}")))?;
        let mut frames = Vec::with_capacity(depth);
        let mut parent = FrameId::WORLD;
        for d in 0..depth {
            let frame = GeometryFrame::new(format!("link_{d}"));
            let id = if parent.is_world() {
                graph.register_frame(source, frame)?
            } else {
                graph.register_child_frame(source, parent, frame)?
            };
            for g in 0..geometries_per_frame {
                let instance = GeometryInstance::new(
                    Pose::from_translation(Vec3::from_f64(0.0, 0.0, 0.05 * g as f64)),
                    Shape::sphere(0.05),
                    format!("sphere_{g}"),
                )
                .with_role(RoleProperties::proximity());
                graph.register_geometry(source, id, instance)?;
            }
            frames.push(id);
            parent = id;
        }
        graph.exclude_collisions_within(&frames.iter().copied().collect::<GeometrySet>())?;
        chains.push((source, frames));
    }
    Ok(BenchScene { graph, chains })
}

/// 10 sources × 10-deep chains × 2 spheres.
pub fn reference_profile() -> Result<BenchScene<f64>, GeometryError> {
    chain_profile(10, 10, 2)
}

/// 100 sources × 10-deep chains × 2 spheres.
pub fn stress_profile() -> Result<BenchScene<f64>, GeometryError> {
    chain_profile(100, 10, 2)
}
