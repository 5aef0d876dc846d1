use fnv::FnvHashMap;
use glam::Vec3;
use pano_core::{Cursor, MarkerId, Scene};

/// A `Scene` with nothing to draw: it logs each call and keeps the marker set
/// so the session can report what a renderer would show.
#[derive(Debug, Default)]
pub struct LogScene {
    markers: FnvHashMap<MarkerId, (Vec3, f32)>,
    texture: Option<String>,
    cursor: Cursor,
}

impl LogScene {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl Scene for LogScene {
    fn add_marker(&mut self, id: MarkerId, position: Vec3, size: f32) {
        log::debug!(
            "[scene] add {:?} at ({:.1}, {:.1}, {:.1}) size {}",
            id,
            position.x,
            position.y,
            position.z,
            size
        );
        self.markers.insert(id, (position, size));
    }

    fn remove_marker(&mut self, id: MarkerId) {
        if self.markers.remove(&id).is_none() {
            log::warn!("[scene] remove of unknown marker {:?}", id);
        } else {
            log::debug!("[scene] remove {:?}", id);
        }
    }

    fn set_marker_size(&mut self, id: MarkerId, size: f32) {
        if let Some(entry) = self.markers.get_mut(&id) {
            entry.1 = size;
        }
        log::debug!("[scene] size {:?} -> {}", id, size);
    }

    fn load_texture(&mut self, uri: &str) {
        log::info!("[scene] texture {}", uri);
        self.texture = Some(uri.to_string());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        log::debug!("[scene] cursor {}", cursor.as_css());
    }
}
