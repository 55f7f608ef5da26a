//! Orientation constraints evaluated against live contexts.

use proptest::prelude::*;
use scenic_constraints::{ConstraintError, OrientationConstraint};
use scenic_core::{AutoDiff, FrameId, GeometryError, Pose, Rotation, Scalar, Vec3};
use scenic_engine::{GeometryContext, SceneGraph};
use scenic_state::{FramePoseVector, GeometryFrame};
use scenic_test_utils::init_tracing;

fn z_rotation<T: Scalar>(angle: T) -> Rotation<T> {
    Rotation::from_axis_angle(Vec3::from_f64(0.0, 0.0, 1.0), angle)
}

/// A graph with frames `a` and `b` of one source; `b` is rotated by
/// `angle` about z, `a` stays at the identity.
fn posed_pair<T: Scalar>(angle: T) -> (SceneGraph<T>, GeometryContext<T>, FrameId, FrameId) {
    let mut graph = SceneGraph::<T>::new();
    let s = graph.register_source(Some("pair")).unwrap();
    let a = graph.register_frame(s, GeometryFrame::new("a")).unwrap();
    let b = graph.register_frame(s, GeometryFrame::new("b")).unwrap();
    let mut ctx = graph.allocate_context();
    let mut poses = FramePoseVector::new(s);
    poses.set_value(a, Pose::identity());
    poses.set_value(b, Pose::from_rotation(z_rotation(angle)));
    let port = graph.source_pose_port(s).unwrap();
    ctx.set_pose_input(port, poses).unwrap();
    graph.full_pose_update(&mut ctx).unwrap();
    (graph, ctx, a, b)
}

#[test]
fn satisfied_within_bound() {
    init_tracing();
    let (graph, ctx, a, b) = posed_pair(0.2_f64);
    let c = OrientationConstraint::new(
        &graph.model_inspector(),
        a,
        Rotation::identity(),
        b,
        Rotation::identity(),
        0.3,
    )
    .unwrap();
    let query = ctx.query_object();
    let trace = c.eval(&query).unwrap();
    assert!((trace - (1.0 + 2.0 * 0.2_f64.cos())).abs() < 1e-12);
    assert!(c.check_satisfied(&query, 0.0).unwrap());

    let tight = OrientationConstraint::new(
        &graph.model_inspector(),
        a,
        Rotation::identity(),
        b,
        Rotation::identity(),
        0.1,
    )
    .unwrap();
    assert!(!tight.check_satisfied(&query, 1e-9).unwrap());
}

#[test]
fn fixed_offsets_cancel_pose_rotation() {
    let (graph, ctx, a, b) = posed_pair(0.7_f64);
    // R_BbarB undoes the rotation of Bbar, so A and B align.
    let c = OrientationConstraint::new(
        &graph.model_inspector(),
        a,
        Rotation::identity(),
        b,
        z_rotation(-0.7),
        0.0,
    )
    .unwrap();
    let trace = c.eval(&ctx.query_object()).unwrap();
    assert!((trace - 3.0).abs() < 1e-12);
    assert!(c.check_satisfied(&ctx.query_object(), 1e-9).unwrap());
}

#[test]
fn world_frame_may_be_referenced() {
    let (graph, ctx, _, b) = posed_pair(0.4_f64);
    let c = OrientationConstraint::new(
        &graph.model_inspector(),
        FrameId::WORLD,
        Rotation::identity(),
        b,
        Rotation::identity(),
        0.5,
    )
    .unwrap();
    assert!(c.check_satisfied(&ctx.query_object(), 0.0).unwrap());
}

#[test]
fn eval_before_update_reports_missing_pose() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let a = graph.register_frame(s, GeometryFrame::new("a")).unwrap();
    let ctx = graph.allocate_context();
    let c = OrientationConstraint::new(
        &ctx.inspector(),
        a,
        Rotation::identity(),
        FrameId::WORLD,
        Rotation::identity(),
        1.0,
    )
    .unwrap();
    assert_eq!(
        c.eval(&ctx.query_object()).unwrap_err(),
        ConstraintError::Geometry(GeometryError::PoseNotAvailable { entity: a.into() })
    );
}

#[test]
fn autodiff_trace_has_analytic_derivative() {
    let theta = 0.4;
    let (graph, ctx, a, b) = posed_pair(AutoDiff::<1>::variable(theta, 0));
    let c = OrientationConstraint::new(
        &graph.model_inspector(),
        a,
        Rotation::identity(),
        b,
        Rotation::identity(),
        0.5,
    )
    .unwrap();
    let trace = c.eval(&ctx.query_object()).unwrap();
    assert!((trace.value() - (1.0 + 2.0 * theta.cos())).abs() < 1e-12);
    assert!((trace.derivative(0) + 2.0 * theta.sin()).abs() < 1e-9);
}

proptest! {
    #[test]
    fn trace_stays_in_valid_range(angle in -3.0f64..3.0) {
        let (graph, ctx, a, b) = posed_pair(angle);
        let c = OrientationConstraint::new(
            &graph.model_inspector(),
            a,
            Rotation::identity(),
            b,
            Rotation::identity(),
            std::f64::consts::PI,
        )
        .unwrap();
        let trace = c.eval(&ctx.query_object()).unwrap();
        prop_assert!((-1.0 - 1e-9..=3.0 + 1e-9).contains(&trace));
        prop_assert!(c.check_satisfied(&ctx.query_object(), 1e-9).unwrap());
    }
}
