use pano_core::{DeltaMode, SurfaceRect, WheelInput};

/// Wheel fields read off a DOM event. Browsers disagree on which of these
/// exist, so every one is optional.
#[derive(Default, Clone, Copy, Debug)]
pub struct RawWheel {
    /// `deltaY` of a standard `wheel` event.
    pub delta_y: Option<f64>,
    pub delta_mode: u32,
    /// WebKit `wheelDeltaY`.
    pub wheel_delta_y: Option<f64>,
    /// Legacy `wheelDelta`.
    pub wheel_delta: Option<f64>,
    /// Firefox `DOMMouseScroll` `detail`.
    pub detail: Option<f64>,
}

/// Pick the most precise delta the event carries. Standard deltas win, then
/// WebKit, legacy and finally `detail`. Non-finite or zero values are skipped.
#[inline]
pub fn classify_wheel(raw: &RawWheel) -> Option<WheelInput> {
    let usable = |v: Option<f64>| v.filter(|d| d.is_finite() && *d != 0.0).map(|d| d as f32);
    if let Some(delta_y) = usable(raw.delta_y) {
        return Some(WheelInput::Standard {
            delta_y,
            mode: DeltaMode::from_dom(raw.delta_mode),
        });
    }
    if let Some(wheel_delta_y) = usable(raw.wheel_delta_y) {
        return Some(WheelInput::WebKit { wheel_delta_y });
    }
    if let Some(wheel_delta) = usable(raw.wheel_delta) {
        return Some(WheelInput::Legacy { wheel_delta });
    }
    usable(raw.detail).map(|detail| WheelInput::Detail { detail })
}

/// Backing-store size in device pixels for a CSS-sized surface. Never zero so
/// the GPU surface can always be configured.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let px = |css: f64| ((css.max(0.0) * dpr).round() as u32).max(1);
    (px(css_width), px(css_height))
}

/// Surface bounds from a bounding client rect's `(left, top, width, height)`.
#[inline]
pub fn surface_from_rect(left: f64, top: f64, width: f64, height: f64) -> SurfaceRect {
    SurfaceRect::new(left as f32, top as f32, width as f32, height as f32)
}
