// Shared viewer tuning constants used by both web and native frontends.

// Camera
pub const DEFAULT_FOV_DEG: f32 = 50.0; // initial vertical field of view
pub const MIN_FOV_DEG: f32 = 15.0; // zoom-in limit
pub const MAX_FOV_DEG: f32 = 75.0; // zoom-out limit
pub const PITCH_LIMIT_DEG: f32 = 85.0; // keeps the camera off the poles
pub const LOOK_DISTANCE: f32 = 500.0; // distance of the look-at target from the eye
pub const NEAR_CLIP: f32 = 0.01;
pub const FAR_CLIP: f32 = 1000.0;

// Scene layout
pub const SPHERE_RADIUS: f32 = 20.0; // background sphere, camera sits at its centre

// Marker sizing (screen pixels, no distance attenuation)
pub const MARKER_SIZE_NORMAL: f32 = 20.0;
pub const MARKER_SIZE_ACTIVE: f32 = 30.0; // hovered or selected

// Interaction
pub const POINT_PICK_THRESHOLD: f32 = 1.0; // max ray-to-point distance for a marker hit
pub const DRAG_SENSITIVITY_BASE: f32 = 0.025; // degrees per pixel at the zoom-in limit
pub const DRAG_SENSITIVITY_PER_FOV: f32 = 0.00125; // extra degrees per pixel per degree of fov
pub const WHEEL_DELTA_FOV_FACTOR: f32 = 0.05; // fov degrees per wheel-delta unit
pub const WHEEL_DETAIL_FOV_FACTOR: f32 = 1.0; // fov degrees per legacy `detail` line
pub const WHEEL_LINE_PX: f32 = 40.0; // pixel equivalent of one wheel line
pub const WHEEL_PAGE_PX: f32 = 800.0; // pixel equivalent of one wheel page
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0; // press travel beyond this is a drag, not a click

// Frame loop
pub const TICK_HZ: f64 = 60.0; // hover poll rate
pub const MAX_CATCH_UP_TICKS: u32 = 4; // ticks run at most per frame after a stall
