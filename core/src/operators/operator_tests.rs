//! Tests for the group membership operators
//!
//! Covers selection preservation, the forced tool weight and input
//! validation leaving the mesh untouched.

use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::host::{InteractionMode, Region, Viewport};
use crate::mesh::Vertex;
use crate::panel::vertex_box;

/// Ten vertices, groups "Head" and "Neck"; vertex 7 is in both
fn make_viewport() -> Viewport {
    let mut mesh = EditMesh::new("Body");
    mesh.new_group("Head");
    mesh.new_group("Neck");
    for i in 0..10 {
        mesh.push_vertex(Vertex::new(i, [i as f32, 0.0, 0.0]));
    }
    let v7 = mesh.vertex_mut(7).unwrap();
    v7.set_weight(0, 0.5);
    v7.set_weight(1, 0.25);
    Viewport::new(mesh, Region::default())
}

fn select(vp: &mut Viewport, indices: &[u32]) {
    for &i in indices {
        vp.mesh.select(i, true);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Remove
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn remove_preserves_selection() {
    let mut vp = make_viewport();
    select(&mut vp, &[3, 7, 9]);
    vp.mesh.vertex_mut(3).unwrap().set_weight(0, 1.0);

    remove_from_group(&mut vp, 7, 0).unwrap();

    assert_eq!(vp.mesh.selected_indices(), BTreeSet::from([3, 7, 9]));
    assert_eq!(vp.mesh.select_history, vec![3, 7, 9]);
    assert_eq!(vp.mesh.vertex(7).unwrap().weight(0), None);
    assert_eq!(vp.mesh.vertex(7).unwrap().weight(1), Some(0.25));
    // other selected vertices keep their memberships
    assert_eq!(vp.mesh.vertex(3).unwrap().weight(0), Some(1.0));
}

#[test]
fn remove_non_member_is_rejected() {
    let mut vp = make_viewport();
    select(&mut vp, &[2]);
    let before = vp.mesh.clone();

    let err = remove_from_group(&mut vp, 2, 0).unwrap_err();
    assert_eq!(
        err,
        OperatorError::Validation(ValidationError::NotAMember {
            vertex: 2,
            group: 0
        })
    );
    assert_eq!(vp.mesh, before);
}

#[test]
fn remove_unknown_group_is_rejected() {
    let mut vp = make_viewport();
    let err = remove_from_group(&mut vp, 7, 9).unwrap_err();
    assert_eq!(
        err,
        OperatorError::Validation(ValidationError::UnknownGroup(9))
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Add
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_to_existing_group_uses_full_weight() {
    let mut vp = make_viewport();
    vp.tool_settings.vertex_group_weight = 0.3;
    select(&mut vp, &[1, 4]);

    let outcome = add_to_group(&mut vp, 4, GroupChoice::Existing(1)).unwrap();

    assert_eq!(outcome, AddOutcome::Assigned { group_index: 1 });
    assert_eq!(vp.mesh.vertex(4).unwrap().weight(1), Some(1.0));
    assert_eq!(vp.mesh.vertex(1).unwrap().weight(1), None);
    assert_eq!(vp.tool_settings.vertex_group_weight, 0.3);
    assert_eq!(vp.mesh.selected_indices(), BTreeSet::from([1, 4]));
    assert_eq!(vp.mesh.active_group_index, Some(1));
}

#[test]
fn add_to_new_group_creates_it() {
    let mut vp = make_viewport();
    select(&mut vp, &[5]);

    let outcome = add_to_group(&mut vp, 5, GroupChoice::NewGroup).unwrap();

    assert_eq!(outcome, AddOutcome::Assigned { group_index: 2 });
    assert_eq!(vp.mesh.group(2).unwrap().name, "Group");
    assert_eq!(vp.mesh.vertex(5).unwrap().weight(2), Some(1.0));

    add_to_group(&mut vp, 6, GroupChoice::NewGroup).unwrap();
    assert_eq!(vp.mesh.group(3).unwrap().name, "Group.001");
    // vertex 6 was not selected before and is not selected after
    assert_eq!(vp.mesh.selected_indices(), BTreeSet::from([5]));
}

#[test]
fn add_existing_member_changes_nothing() {
    let mut vp = make_viewport();
    select(&mut vp, &[7]);
    let before = vp.mesh.clone();

    let outcome = add_to_group(&mut vp, 7, GroupChoice::Existing(0)).unwrap();

    assert_eq!(outcome, AddOutcome::AlreadyMember { group_index: 0 });
    assert_eq!(vp.mesh, before);
}

#[test]
fn add_outside_edit_mode_fails() {
    let mut vp = make_viewport();
    vp.mode = InteractionMode::Object;
    let err = add_to_group(&mut vp, 1, GroupChoice::NewGroup).unwrap_err();
    assert_eq!(err, OperatorError::Context(ContextError::NotEditMode));
    assert_eq!(vp.mesh.groups.len(), 2);
}

#[test]
fn candidates_exclude_current_memberships() {
    let mut vp = make_viewport();
    vp.mesh.new_group("Spine");

    let labels: Vec<String> = available_groups(&vp.mesh, 7)
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(labels, vec!["New Vertex Group", "Spine"]);

    let choices: Vec<GroupChoice> = available_groups(&vp.mesh, 0)
        .unwrap()
        .into_iter()
        .map(|c| c.choice)
        .collect();
    assert_eq!(
        choices,
        vec![
            GroupChoice::NewGroup,
            GroupChoice::Existing(0),
            GroupChoice::Existing(1),
            GroupChoice::Existing(2),
        ]
    );

    assert_eq!(
        available_groups(&vp.mesh, 42),
        Err(ValidationError::UnknownVertex(42))
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Assign
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn assign_overwrites_every_membership() {
    let mut vp = make_viewport();
    let request = AssignRequest {
        vertex_index: 7,
        weights: BTreeMap::from([(0, 0.9), (1, 0.1)]),
    };

    assert_eq!(assign_weights(&mut vp, &request).unwrap(), 2);

    let vertex = vp.mesh.vertex(7).unwrap();
    assert_eq!(vertex.weight(0), Some(0.9));
    assert_eq!(vertex.weight(1), Some(0.1));
}

#[test]
fn panel_request_round_trips_through_assign() {
    let mut vp = make_viewport();
    let mut request = vertex_box(&vp.mesh, 7).unwrap().assign_request().unwrap();
    request.weights.insert(1, 0.8);

    assign_weights(&mut vp, &request).unwrap();
    assert_eq!(vp.mesh.vertex(7).unwrap().weight(1), Some(0.8));
}

#[test]
fn assign_validation_leaves_mesh_unchanged() {
    let mut vp = make_viewport();
    let before = vp.mesh.clone();

    let cases = [
        (
            AssignRequest {
                vertex_index: 99,
                weights: BTreeMap::new(),
            },
            ValidationError::UnknownVertex(99),
        ),
        (
            AssignRequest {
                vertex_index: 7,
                weights: BTreeMap::from([(0, 0.9)]),
            },
            ValidationError::MissingWeight { vertex: 7, group: 1 },
        ),
        (
            AssignRequest {
                vertex_index: 7,
                weights: BTreeMap::from([(0, 1.5), (1, 0.1)]),
            },
            ValidationError::WeightOutOfRange {
                group: 0,
                weight: 1.5,
            },
        ),
        (
            AssignRequest {
                vertex_index: 2,
                weights: BTreeMap::from([(0, 0.5)]),
            },
            ValidationError::NotAMember { vertex: 2, group: 0 },
        ),
        (
            AssignRequest {
                vertex_index: 7,
                weights: BTreeMap::from([(0, 0.5), (1, 0.5), (4, 0.5)]),
            },
            ValidationError::UnknownGroup(4),
        ),
    ];

    for (request, expected) in cases {
        let err = assign_weights(&mut vp, &request).unwrap_err();
        assert_eq!(err, OperatorError::Validation(expected));
        assert_eq!(vp.mesh, before);
    }
}

#[test]
fn assign_rejects_nan() {
    let mut vp = make_viewport();
    let request = AssignRequest {
        vertex_index: 7,
        weights: BTreeMap::from([(0, f32::NAN), (1, 0.1)]),
    };
    let err = assign_weights(&mut vp, &request).unwrap_err();
    assert!(matches!(
        err,
        OperatorError::Validation(ValidationError::WeightOutOfRange { group: 0, .. })
    ));
}
