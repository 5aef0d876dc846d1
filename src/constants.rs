/// Web front-end rendering and wiring constants.
///
/// Interaction tuning (fov limits, marker sizes, drag sensitivity) lives in the
/// core crate's `ViewerConfig`; these only concern how the browser side draws
/// and measures things.

// Canvas the viewer renders into when the host does not name one.
pub const DEFAULT_CANVAS_ID: &str = "panorama-canvas";

// Background shown before the first panorama image finishes loading.
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.03];
pub const PLACEHOLDER_TEXEL: [u8; 4] = [24, 24, 28, 255];

// Markers are white discs; the edge band (fraction of the radius) is
// anti-aliased.
pub const MARKER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
pub const MARKER_ACTIVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const MARKER_EDGE_SOFTNESS: f32 = 0.12;

// Instance buffer starts with room for this many markers and doubles on demand.
pub const INITIAL_MARKER_CAPACITY: usize = 64;

// Device pixel ratio is clamped so very dense screens do not allocate huge
// surfaces.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
