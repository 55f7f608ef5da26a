//! Model/context isolation: allocation copies, context-only mutation and
//! per-view registration status.

use proptest::prelude::*;
use scenic_core::{FrameId, GeometryError, Role, RoleProperties};
use scenic_engine::SceneGraph;
use scenic_state::{GeometryFrame, GeometrySet};
use scenic_test_utils::{init_tracing, proximity_sphere, sphere_instance};

#[test]
fn context_geometry_does_not_leak_into_model() {
    init_tracing();
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(Some("source")).unwrap();
    let f1 = graph.register_frame(s, GeometryFrame::new("f1")).unwrap();
    graph
        .register_anchored_geometry(s, sphere_instance("g1"))
        .unwrap();
    graph.register_geometry(s, f1, sphere_instance("g2")).unwrap();
    assert_eq!(graph.model_inspector().num_geometries_for_frame(f1).unwrap(), 1);

    let mut ctx = graph.allocate_context();
    graph
        .register_geometry_in(&mut ctx, s, f1, sphere_instance("g3"))
        .unwrap();
    assert_eq!(ctx.inspector().num_geometries_for_frame(f1).unwrap(), 2);
    assert_eq!(graph.model_inspector().num_geometries_for_frame(f1).unwrap(), 1);
}

#[test]
fn model_mutation_after_allocation_only_affects_future_contexts() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    let early = graph.allocate_context();

    let g = graph.register_geometry(s, f, sphere_instance("late")).unwrap();
    let late = graph.allocate_context();

    assert!(matches!(
        early.inspector().get_frame_id(g),
        Err(GeometryError::UnknownGeometry { id, .. }) if id == g
    ));
    assert_eq!(late.inspector().get_frame_id(g).unwrap(), f);
}

#[test]
fn removal_is_scoped_to_the_view_that_performed_it() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    let g = graph.register_geometry(s, f, sphere_instance("g")).unwrap();
    let mut ctx_a = graph.allocate_context();
    let ctx_b = graph.allocate_context();

    graph.remove_geometry_in(&mut ctx_a, s, g).unwrap();
    assert!(matches!(
        ctx_a.inspector().belongs_to_source(g, s),
        Err(GeometryError::UnknownGeometry { .. })
    ));
    assert!(ctx_b.inspector().belongs_to_source(g, s).unwrap());
    assert!(graph.model_inspector().belongs_to_source(g, s).unwrap());

    graph.remove_geometry(s, g).unwrap();
    assert!(graph.model_inspector().get_frame_id(g).is_err());
    assert_eq!(ctx_b.inspector().get_frame_id(g).unwrap(), f);
}

#[test]
fn source_registered_after_allocation_is_unknown_to_context() {
    let mut graph = SceneGraph::<f64>::new();
    let mut ctx = graph.allocate_context();
    let s = graph.register_source(Some("late")).unwrap();

    assert!(graph.source_is_registered(s));
    assert!(!ctx.inspector().source_is_registered(s));
    assert!(matches!(
        ctx.inspector().get_source_name(s),
        Err(GeometryError::UnknownSource { id, .. }) if id == s
    ));
    assert!(matches!(
        graph.register_frame_in(&mut ctx, s, GeometryFrame::new("f")),
        Err(GeometryError::UnknownSource { .. })
    ));
    assert!(ctx.source_pose_port(s).is_err());
}

#[test]
fn topology_edit_after_allocation_changes_model_only() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let ctx = graph.allocate_context();
    let frames_before = ctx.inspector().num_frames();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    graph.register_geometry(s, f, sphere_instance("g")).unwrap();
    assert_eq!(ctx.inspector().num_frames(), frames_before);
    assert_eq!(ctx.inspector().num_geometries(), 0);
    assert_eq!(graph.model_inspector().num_frames(), frames_before + 1);
}

#[test]
fn context_collision_filters_are_private() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    let g1 = graph.register_geometry(s, f, proximity_sphere("g1")).unwrap();
    let g2 = graph.register_geometry(s, f, proximity_sphere("g2")).unwrap();
    let g3 = graph
        .register_anchored_geometry(s, proximity_sphere("g3"))
        .unwrap();
    let mut ctx = graph.allocate_context();

    let pair = GeometrySet::new().with(g1).with(g2);
    graph.exclude_collisions_within_in(&mut ctx, &pair).unwrap();
    graph
        .exclude_collisions_between_in(&mut ctx, &pair, &GeometrySet::from(g3))
        .unwrap();

    let inspector = ctx.inspector();
    assert!(inspector.collision_filtered(g1, g2).unwrap());
    assert!(inspector.collision_filtered(g1, g3).unwrap());
    assert!(inspector.collision_filtered(g2, g3).unwrap());
    assert!(!graph.model_inspector().collision_filtered(g1, g2).unwrap());
}

#[test]
fn filter_set_containing_a_frame_is_accepted_after_allocation() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    let mut ctx = graph.allocate_context();
    let set = GeometrySet::from(f);
    graph.exclude_collisions_within_in(&mut ctx, &set).unwrap();
    graph
        .exclude_collisions_between_in(&mut ctx, &set, &set)
        .unwrap();
    graph.exclude_collisions_within(&set).unwrap();
}

#[test]
fn role_assigned_in_context_stays_there() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
    let g = graph.register_geometry(s, f, sphere_instance("g")).unwrap();
    let mut ctx = graph.allocate_context();
    graph
        .assign_role_in(&mut ctx, s, g, RoleProperties::illustration())
        .unwrap();
    assert!(ctx.inspector().has_role(g, Role::Illustration).unwrap());
    assert!(!graph.model_inspector().has_role(g, Role::Illustration).unwrap());
}

#[test]
fn context_frame_uses_context_parent() {
    let mut graph = SceneGraph::<f64>::new();
    let s = graph.register_source(None).unwrap();
    let mut ctx = graph.allocate_context();
    let parent = graph
        .register_frame_in(&mut ctx, s, GeometryFrame::new("parent"))
        .unwrap();
    let child = graph
        .register_child_frame_in(&mut ctx, s, parent, GeometryFrame::new("child"))
        .unwrap();
    assert_eq!(ctx.inspector().get_parent_frame(child).unwrap(), parent);
    assert!(matches!(
        graph.register_child_frame(s, parent, GeometryFrame::new("x")),
        Err(GeometryError::UnknownFrame { id, .. }) if id == parent
    ));
    assert_eq!(graph.world_frame_id(), FrameId::WORLD);
}

proptest! {
    #[test]
    fn allocation_is_independent(
        model_edits in 0usize..5,
        context_edits in 0usize..5,
    ) {
        let mut graph = SceneGraph::<f64>::new();
        let s = graph.register_source(None).unwrap();
        let f = graph.register_frame(s, GeometryFrame::new("f")).unwrap();
        graph.register_geometry(s, f, sphere_instance("base")).unwrap();
        let mut ctx = graph.allocate_context();

        for i in 0..model_edits {
            graph.register_geometry(s, f, sphere_instance(&format!("m{i}"))).unwrap();
        }
        for i in 0..context_edits {
            graph
                .register_geometry_in(&mut ctx, s, f, sphere_instance(&format!("c{i}")))
                .unwrap();
        }

        prop_assert_eq!(
            graph.model_inspector().num_geometries_for_frame(f).unwrap(),
            1 + model_edits
        );
        prop_assert_eq!(
            ctx.inspector().num_geometries_for_frame(f).unwrap(),
            1 + context_edits
        );
    }
}
