// End-to-end host scenarios driven through `Viewer`.

mod common;

use common::*;
use glam::Vec3;
use pano_core::{
    Panorama, Permissions, PointOfInterest, ViewerConfig, ViewerError, ViewerEvent, Viewer,
    MARKER_SIZE_ACTIVE, MARKER_SIZE_NORMAL,
};

fn panorama(id: u32, pois: Vec<PointOfInterest>) -> Panorama {
    Panorama {
        id,
        floor_id: 1,
        image_source: format!("pano-images/0000{id}-pano.jpeg"),
        points_of_interest: pois,
    }
}

#[test]
fn clicking_the_hovered_marker_toggles_selection() {
    let mut viewer = viewer();
    viewer
        .refresh_points_of_interest(&[poi_at(1, 0.0), poi_at(2, 90.0)])
        .unwrap();
    let a = viewer.registry().get(0).unwrap().id;
    let events = record(&mut viewer);
    look_at(&mut viewer, 0.0);
    viewer.tick();
    take(&events);

    viewer.click(true);
    viewer.click(true);
    viewer.click(true);
    assert_eq!(
        take(&events),
        vec![
            ViewerEvent::Select { slot: Some(0) },
            ViewerEvent::Select { slot: None },
            ViewerEvent::Select { slot: Some(0) },
        ]
    );

    // switching goes straight to the new slot without a deselect in between
    look_at(&mut viewer, 90.0);
    viewer.tick();
    take(&events);
    viewer.click(true);
    assert_eq!(take(&events), vec![ViewerEvent::Select { slot: Some(1) }]);
    assert_eq!(viewer.scene().size_of(a), Some(MARKER_SIZE_NORMAL));
    assert_eq!(viewer.selected_slot(), Some(1));
}

#[test]
fn clicking_the_background_keeps_the_selection() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();
    let events = record(&mut viewer);
    viewer.tick();
    viewer.click(true);
    look_at(&mut viewer, 180.0);
    viewer.tick();
    take(&events);

    viewer.click(true);
    assert!(take(&events).is_empty());
    assert_eq!(viewer.selected_slot(), Some(0));
}

#[test]
fn created_poi_round_trips_through_the_host() {
    let mut viewer = viewer();
    let events = record(&mut viewer);
    let mut host: Vec<PointOfInterest> = Vec::new();

    look_at(&mut viewer, 0.0);
    viewer.tick();
    viewer.double_click(true);

    let created = take(&events);
    let [ViewerEvent::Create { poi }] = created.as_slice() else {
        panic!("expected a single create event, got {created:?}");
    };
    assert_eq!(poi.id, 1);
    assert!(poi.position.abs_diff_eq(Vec3::new(20.0, 0.0, 0.0), 1e-3));
    assert_eq!(viewer.registry().len(), 1);

    host.push(poi.clone());
    let report = viewer.refresh_points_of_interest(&host).unwrap();
    assert!(report.is_noop());

    // the new marker is under the pointer on the next frame
    viewer.tick();
    assert_eq!(take(&events), vec![ViewerEvent::HoverEnter { slot: 0 }]);
}

#[test]
fn created_ids_follow_the_marker_count() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&ring(2)).unwrap();
    let events = record(&mut viewer);
    look_at(&mut viewer, 200.0);
    viewer.tick();
    viewer.double_click(true);
    match take(&events).as_slice() {
        [ViewerEvent::Create { poi }] => assert_eq!(poi.id, 3),
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn double_click_removes_a_selected_marker_in_order() {
    let mut viewer = viewer();
    let mut host = vec![poi_at(1, 0.0), poi_at(2, 90.0)];
    viewer.refresh_points_of_interest(&host).unwrap();
    let events = record(&mut viewer);
    look_at(&mut viewer, 0.0);
    viewer.tick();
    viewer.click(true);
    take(&events);

    viewer.double_click(true);
    assert_eq!(
        take(&events),
        vec![
            ViewerEvent::Select { slot: None },
            ViewerEvent::Remove { slot: 0 },
            ViewerEvent::HoverExit,
        ]
    );
    assert_eq!(viewer.registry().len(), 1);
    assert_eq!(viewer.hovered_slot(), None);

    host.remove(0);
    assert!(viewer.refresh_points_of_interest(&host).unwrap().is_noop());
    assert_eq!(viewer.scene().live.len(), 1);
}

#[test]
fn host_removal_of_an_active_marker_clears_hover_and_selection() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();
    let events = record(&mut viewer);
    viewer.tick();
    viewer.click(true);
    take(&events);

    let report = viewer.refresh_points_of_interest(&[]).unwrap();
    assert_eq!(report.removed, vec![0]);
    assert_eq!(
        take(&events),
        vec![ViewerEvent::Select { slot: None }, ViewerEvent::HoverExit]
    );
    assert_eq!(viewer.selected_slot(), None);
    assert_eq!(viewer.scene().cursor, pano_core::Cursor::Default);
}

#[test]
fn switching_panoramas_drops_every_marker() {
    let mut viewer = viewer();
    viewer.init(panorama(1, ring(3)), Permissions::default());
    viewer.refresh_points_of_interest(&ring(3)).unwrap();
    let events = record(&mut viewer);
    viewer.tick();
    take(&events);

    viewer.load_panorama(panorama(2, Vec::new()));
    assert_eq!(viewer.registry().len(), 0);
    assert!(viewer.scene().live.is_empty());
    assert_eq!(viewer.scene().texture.as_deref(), Some("pano-images/00002-pano.jpeg"));
    assert_eq!(viewer.current_panorama().map(|p| p.id), Some(2));
    assert_eq!(take(&events), vec![ViewerEvent::HoverExit]);
}

#[test]
fn add_point_of_interest_appends_or_overwrites() {
    let mut viewer = viewer();
    assert_eq!(viewer.add_point_of_interest(&poi_at(1, 0.0), None), 0);
    assert_eq!(viewer.add_point_of_interest(&poi_at(2, 40.0), None), 1);
    assert_eq!(viewer.add_point_of_interest(&poi_at(3, 80.0), Some(3)), 3);
    assert_eq!(viewer.registry().tombstones(), 1);

    let replaced = viewer.registry().get(1).unwrap().id;
    viewer.add_point_of_interest(&poi_at(4, 120.0), Some(1));
    assert!(!viewer.scene().live.contains_key(&replaced));
    assert_eq!(
        viewer.registry().get(1).map(|m| m.position),
        Some(horizon(120.0))
    );
    assert_eq!(viewer.scene().live.len(), 3);
}

#[test]
fn remove_point_of_interest_with_and_without_shrinking() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&ring(3)).unwrap();
    viewer.remove_point_of_interest(1, false);
    assert_eq!(viewer.registry().len(), 3);
    assert_eq!(viewer.registry().tombstones(), 1);

    viewer.remove_point_of_interest(0, true);
    assert_eq!(viewer.registry().len(), 2);
    assert!(viewer.registry().get(0).is_none());
    assert_eq!(viewer.registry().get(1).map(|m| m.position), Some(horizon(40.0)));
}

#[test]
fn refresh_always_leaves_the_registry_aligned() {
    let mut viewer = viewer();
    viewer.add_point_of_interest(&poi_at(1, 0.0), Some(4));
    let list = ring(2);
    let report = viewer.refresh_points_of_interest(&list);
    assert!(report.is_ok(), "{report:?}");
    assert_eq!(viewer.registry().len(), 2);
    assert_eq!(viewer.registry().tombstones(), 0);
}

#[test]
fn selected_marker_keeps_its_size_through_refresh() {
    let mut viewer = viewer();
    let list = ring(3);
    viewer.refresh_points_of_interest(&list).unwrap();
    viewer.tick();
    viewer.click(true);
    let id = viewer.registry().get(0).unwrap().id;

    viewer.refresh_points_of_interest(&list).unwrap();
    assert_eq!(viewer.selected_slot(), Some(0));
    assert_eq!(viewer.scene().size_of(id), Some(MARKER_SIZE_ACTIVE));
}

#[test]
fn unsubscribed_listeners_hear_nothing() {
    let mut viewer = viewer();
    viewer.refresh_points_of_interest(&[poi_at(1, 0.0)]).unwrap();
    let kept = record(&mut viewer);
    let dropped = std::rc::Rc::new(std::cell::RefCell::new(0));
    let counter = dropped.clone();
    let id = viewer.subscribe(move |_| *counter.borrow_mut() += 1);
    assert!(viewer.unsubscribe(id));
    assert!(!viewer.unsubscribe(id));

    viewer.tick();
    assert_eq!(*dropped.borrow(), 0);
    assert_eq!(take(&kept).len(), 1);
}

#[test]
fn invalid_config_is_rejected() {
    let config = ViewerConfig {
        min_fov_deg: 80.0,
        ..ViewerConfig::default()
    };
    let err = Viewer::new(RecordingScene::default(), config).err();
    assert!(matches!(err, Some(ViewerError::InvalidConfig(_))));
}

#[test]
fn resize_updates_aspect_and_pointer_mapping() {
    let mut viewer = viewer();
    viewer.resize(pano_core::SurfaceRect::new(0.0, 0.0, 800.0, 400.0));
    assert_eq!(viewer.camera().aspect(), 2.0);

    viewer.pointer_move(glam::Vec2::new(800.0, 0.0));
    assert_eq!(viewer.pointer_ndc(), glam::Vec2::new(1.0, 1.0));

    // zero-sized surfaces keep the previous aspect
    viewer.resize(pano_core::SurfaceRect::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(viewer.camera().aspect(), 2.0);
}
