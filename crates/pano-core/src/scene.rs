//! Boundary with the rendering engine.
//!
//! The core never draws anything itself; it tells a `Scene` which point
//! markers exist, how large they are and which background image to show.

use crate::registry::MarkerId;
use glam::Vec3;

/// Pointer cursor shown over the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    /// Shown while a marker is hovered.
    Pointer,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

pub trait Scene {
    /// Create a point marker and add it to the rendered scene.
    fn add_marker(&mut self, id: MarkerId, position: Vec3, size: f32);

    fn remove_marker(&mut self, id: MarkerId);

    fn set_marker_size(&mut self, id: MarkerId, size: f32);

    /// Start loading a new background image. Fire-and-forget: the previous
    /// image stays visible until the new one has arrived.
    fn load_texture(&mut self, uri: &str);

    fn set_cursor(&mut self, cursor: Cursor);
}
