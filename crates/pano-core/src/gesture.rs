//! Drag-to-pan, wheel-to-zoom and click/drag discrimination.
//!
//! Click and double-click semantics need the hover/select state and the
//! registry, so they live on `Viewer`; this module owns the parts that only
//! touch the camera.

use crate::camera::PanoramaCamera;
use crate::config::ViewerConfig;
use crate::constants::{MIN_FOV_DEG, WHEEL_LINE_PX, WHEEL_PAGE_PX};
use glam::Vec2;

/// Unit of a standard wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map the DOM `deltaMode` code.
    pub fn from_dom(code: u32) -> Self {
        match code {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

/// A wheel step as reported by one of the browser wheel APIs. The variants
/// disagree on sign and unit; `fov_delta` folds them into one signed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelInput {
    /// Standard `deltaY`; positive scrolls down.
    Standard { delta_y: f32, mode: DeltaMode },
    /// WebKit `wheelDeltaY`; positive scrolls up.
    WebKit { wheel_delta_y: f32 },
    /// Legacy `wheelDelta`; positive scrolls up.
    Legacy { wheel_delta: f32 },
    /// `detail` in lines; positive scrolls down.
    Detail { detail: f32 },
}

impl WheelInput {
    /// Field-of-view change in degrees: scrolling up zooms in (negative).
    pub fn fov_delta(&self, config: &ViewerConfig) -> f32 {
        match *self {
            WheelInput::Standard { delta_y, mode } => {
                let px = match mode {
                    DeltaMode::Pixel => delta_y,
                    DeltaMode::Line => delta_y * WHEEL_LINE_PX,
                    DeltaMode::Page => delta_y * WHEEL_PAGE_PX,
                };
                px * config.wheel_delta_factor
            }
            WheelInput::WebKit { wheel_delta_y } => -wheel_delta_y * config.wheel_delta_factor,
            WheelInput::Legacy { wheel_delta } => -wheel_delta * config.wheel_delta_factor,
            WheelInput::Detail { detail } => detail * config.wheel_detail_factor,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    start: Vec2,
    lat: f32,
    lng: f32,
    travelled: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureInterpreter {
    drag: Option<DragAnchor>,
    swallow_click: bool,
}

impl GestureInterpreter {
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer pressed. Only presses on the rendering surface start a drag.
    pub fn press(&mut self, client: Vec2, on_surface: bool, camera: &PanoramaCamera) {
        self.swallow_click = false;
        self.drag = on_surface.then(|| DragAnchor {
            start: client,
            lat: camera.lat(),
            lng: camera.lng(),
            travelled: 0.0,
        });
    }

    /// Pan the camera relative to where the drag started. Sensitivity grows
    /// with the field of view so a zoomed-in view pans slowly. Returns whether
    /// the camera moved.
    pub fn drag_to(
        &mut self,
        client: Vec2,
        camera: &mut PanoramaCamera,
        config: &ViewerConfig,
    ) -> bool {
        let Some(anchor) = self.drag.as_mut() else {
            return false;
        };
        let delta = client - anchor.start;
        anchor.travelled = anchor.travelled.max(delta.length());
        let factor = config.drag_sensitivity_base
            + (camera.fov() - MIN_FOV_DEG) * config.drag_sensitivity_per_fov;
        camera.set_orientation(delta.y * factor + anchor.lat, -delta.x * factor + anchor.lng);
        true
    }

    /// Pointer released. A press that travelled past the threshold was a
    /// drag, so the click the platform fires next is swallowed.
    pub fn release(&mut self, client: Vec2, config: &ViewerConfig) {
        if let Some(anchor) = self.drag.take() {
            let travelled = anchor.travelled.max((client - anchor.start).length());
            self.swallow_click = travelled > config.click_drag_threshold_px;
        }
    }

    /// Consume a click; `false` when it ended a drag.
    pub fn accept_click(&mut self) -> bool {
        !std::mem::take(&mut self.swallow_click)
    }
}
