// Shared test doubles for the core integration tests.

#![allow(dead_code)]

use glam::Vec3;
use pano_core::{Cursor, MarkerId, PointOfInterest, Scene, Viewer, ViewerConfig, ViewerEvent};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum SceneOp {
    Add(MarkerId),
    Remove(MarkerId),
    Size(MarkerId, f32),
    Texture(String),
    Cursor(Cursor),
}

/// Scene that records every call and mirrors the markers it would draw.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub ops: Vec<SceneOp>,
    pub live: BTreeMap<MarkerId, (Vec3, f32)>,
    pub cursor: Cursor,
    pub texture: Option<String>,
}

impl RecordingScene {
    /// Marker add/remove calls recorded so far.
    pub fn marker_ops(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SceneOp::Add(_) | SceneOp::Remove(_)))
            .count()
    }

    pub fn size_of(&self, id: MarkerId) -> Option<f32> {
        self.live.get(&id).map(|(_, size)| *size)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Scene for RecordingScene {
    fn add_marker(&mut self, id: MarkerId, position: Vec3, size: f32) {
        assert!(self.live.insert(id, (position, size)).is_none(), "marker {id:?} added twice");
        self.ops.push(SceneOp::Add(id));
    }

    fn remove_marker(&mut self, id: MarkerId) {
        assert!(self.live.remove(&id).is_some(), "marker {id:?} removed twice");
        self.ops.push(SceneOp::Remove(id));
    }

    fn set_marker_size(&mut self, id: MarkerId, size: f32) {
        if let Some(entry) = self.live.get_mut(&id) {
            entry.1 = size;
        }
        self.ops.push(SceneOp::Size(id, size));
    }

    fn load_texture(&mut self, uri: &str) {
        self.texture = Some(uri.to_string());
        self.ops.push(SceneOp::Texture(uri.to_string()));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.ops.push(SceneOp::Cursor(cursor));
    }
}

pub type Events = Rc<RefCell<Vec<ViewerEvent>>>;

pub fn viewer() -> Viewer<RecordingScene> {
    Viewer::new(RecordingScene::default(), ViewerConfig::default()).expect("default config is valid")
}

pub fn record(viewer: &mut Viewer<RecordingScene>) -> Events {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    viewer.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
    events
}

pub fn take(events: &Events) -> Vec<ViewerEvent> {
    std::mem::take(&mut *events.borrow_mut())
}

/// Point on the horizon of the background sphere, `lng_deg` around +Y.
pub fn horizon(lng_deg: f32) -> Vec3 {
    let theta = lng_deg.to_radians();
    Vec3::new(theta.cos(), 0.0, theta.sin()) * pano_core::SPHERE_RADIUS
}

pub fn poi_at(id: u32, lng_deg: f32) -> PointOfInterest {
    PointOfInterest::new(id, horizon(lng_deg))
}

/// `n` POIs spread 20° apart along the horizon.
pub fn ring(n: usize) -> Vec<PointOfInterest> {
    (0..n).map(|i| poi_at(i as u32 + 1, i as f32 * 20.0)).collect()
}

/// Aim the camera (and so the centred pointer) at a horizon longitude.
pub fn look_at(viewer: &mut Viewer<RecordingScene>, lng_deg: f32) {
    viewer.camera_mut().set_orientation(0.0, lng_deg);
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
