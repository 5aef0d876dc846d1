// Hover/select state machine, both in isolation and driven through the viewer.

mod common;

use common::*;
use glam::Vec2;
use pano_core::{
    Cursor, HoverTransition, InteractionState, MarkerId, MarkerState, SelectOutcome, ViewerEvent,
    MARKER_SIZE_ACTIVE, MARKER_SIZE_NORMAL,
};

const A: MarkerId = MarkerId(1);
const B: MarkerId = MarkerId(2);

#[test]
fn hover_sequence_pairs_every_enter_with_one_exit() {
    let mut state = InteractionState::default();
    let mut seen = Vec::new();
    for hit in [Some(A), Some(A), Some(B), None, Some(B)] {
        seen.extend(state.poll(hit));
    }
    assert_eq!(
        seen,
        vec![
            HoverTransition::Enter(A),
            HoverTransition::Exit(A),
            HoverTransition::Enter(B),
            HoverTransition::Exit(B),
            HoverTransition::Enter(B),
        ]
    );
}

#[test]
fn staying_on_a_marker_is_silent() {
    let mut state = InteractionState::default();
    assert_eq!(state.poll(Some(A)).len(), 1);
    for _ in 0..10 {
        assert!(state.poll(Some(A)).is_empty());
    }
    assert!(state.poll(None).len() == 1);
    assert!(state.poll(None).is_empty());
}

#[test]
fn click_toggles_and_switches_selection() {
    let mut state = InteractionState::default();
    assert_eq!(state.click(), None, "nothing hovered");

    state.poll(Some(A));
    assert_eq!(
        state.click(),
        Some(SelectOutcome::Selected {
            previous: None,
            current: A
        })
    );
    assert_eq!(state.click(), Some(SelectOutcome::Deselected(A)));
    state.click();

    state.poll(Some(B));
    assert_eq!(
        state.click(),
        Some(SelectOutcome::Selected {
            previous: Some(A),
            current: B
        })
    );
    assert_eq!(state.state_of(A), MarkerState::Normal);
    assert_eq!(state.state_of(B), MarkerState::Selected);
}

#[test]
fn retain_drops_references_to_dead_markers() {
    let mut state = InteractionState::default();
    state.poll(Some(A));
    state.click();
    assert_eq!(state.retain(|id| id != A), (true, true));
    assert_eq!(state.hovered(), None);
    assert_eq!(state.selected(), None);
    assert_eq!(state.retain(|_| false), (false, false));
}

#[test]
fn viewer_hover_follows_the_camera_under_a_still_pointer() {
    let mut viewer = viewer();
    let events = record(&mut viewer);
    let list = vec![poi_at(1, 0.0), poi_at(2, 90.0)];
    viewer.refresh_points_of_interest(&list).unwrap();

    // A, A, B, none, B
    for lng in [0.0, 0.0, 90.0, 45.0, 90.0] {
        look_at(&mut viewer, lng);
        viewer.tick();
    }
    assert_eq!(
        take(&events),
        vec![
            ViewerEvent::HoverEnter { slot: 0 },
            ViewerEvent::HoverExit,
            ViewerEvent::HoverEnter { slot: 1 },
            ViewerEvent::HoverExit,
            ViewerEvent::HoverEnter { slot: 1 },
        ]
    );
    assert_eq!(viewer.hovered_slot(), Some(1));
    assert_eq!(viewer.scene().cursor, Cursor::Pointer);
}

#[test]
fn hover_follows_the_pointer_under_a_still_camera() {
    let mut viewer = viewer();
    let events = record(&mut viewer);
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();

    viewer.set_pointer_ndc(Vec2::new(0.9, 0.0));
    viewer.tick();
    assert!(take(&events).is_empty());

    viewer.set_pointer_ndc(Vec2::ZERO);
    viewer.tick();
    assert_eq!(take(&events), vec![ViewerEvent::HoverEnter { slot: 0 }]);
    assert_eq!(viewer.pointer_ndc(), Vec2::ZERO);
}

#[test]
fn at_most_one_marker_is_hovered_per_frame() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&ring(6)).unwrap();
    for step in 0..40 {
        look_at(&mut viewer, step as f32 * 3.0);
        viewer.tick();
        let hovered = viewer
            .registry()
            .live()
            .filter(|(_, m)| m.state == MarkerState::Hovered)
            .count();
        assert!(hovered <= 1, "frame {step}: {hovered} hovered markers");
    }
}

#[test]
fn hovered_marker_grows_and_shrinks_back() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();
    let id = viewer.registry().get(0).unwrap().id;

    look_at(&mut viewer, 0.0);
    viewer.tick();
    assert_eq!(viewer.scene().size_of(id), Some(MARKER_SIZE_ACTIVE));

    look_at(&mut viewer, 60.0);
    viewer.tick();
    assert_eq!(viewer.scene().size_of(id), Some(MARKER_SIZE_NORMAL));
    assert_eq!(viewer.scene().cursor, Cursor::Default);
}

#[test]
fn selected_marker_stays_enlarged_after_hover_leaves() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();
    let id = viewer.registry().get(0).unwrap().id;

    look_at(&mut viewer, 0.0);
    viewer.tick();
    viewer.click(true);
    look_at(&mut viewer, 60.0);
    viewer.tick();

    assert_eq!(viewer.hovered_slot(), None);
    assert_eq!(viewer.selected_slot(), Some(0));
    assert_eq!(viewer.scene().size_of(id), Some(MARKER_SIZE_ACTIVE));
    assert_eq!(viewer.registry().get(0).unwrap().state, MarkerState::Selected);
}

#[test]
fn nearest_marker_wins_when_two_line_up() {
    let mut viewer = viewer();
    let far = poi_at(1, 0.0);
    let mut near = poi_at(2, 0.0);
    near.position *= 0.5;
    viewer.refresh_points_of_interest(&[far, near]).unwrap();
    let events = record(&mut viewer);
    look_at(&mut viewer, 0.0);
    viewer.tick();
    assert_eq!(take(&events), vec![ViewerEvent::HoverEnter { slot: 1 }]);
}
