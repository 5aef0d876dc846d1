//! Viewer configuration.
//!
//! Every field defaults to the matching value in `constants.rs`, so a host
//! only needs to send the fields it wants to change.

use crate::constants::*;
use crate::error::{Result, ViewerError};
use crate::registry::MarkerState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub initial_fov_deg: f32,
    pub min_fov_deg: f32,
    pub max_fov_deg: f32,
    pub pitch_limit_deg: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    pub sphere_radius: f32,
    pub marker_size_normal: f32,
    pub marker_size_active: f32,
    pub point_pick_threshold: f32,
    pub drag_sensitivity_base: f32,
    pub drag_sensitivity_per_fov: f32,
    pub wheel_delta_factor: f32,
    pub wheel_detail_factor: f32,
    pub click_drag_threshold_px: f32,
    pub tick_hz: f64,
    pub max_catch_up_ticks: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_fov_deg: DEFAULT_FOV_DEG,
            min_fov_deg: MIN_FOV_DEG,
            max_fov_deg: MAX_FOV_DEG,
            pitch_limit_deg: PITCH_LIMIT_DEG,
            near_clip: NEAR_CLIP,
            far_clip: FAR_CLIP,
            sphere_radius: SPHERE_RADIUS,
            marker_size_normal: MARKER_SIZE_NORMAL,
            marker_size_active: MARKER_SIZE_ACTIVE,
            point_pick_threshold: POINT_PICK_THRESHOLD,
            drag_sensitivity_base: DRAG_SENSITIVITY_BASE,
            drag_sensitivity_per_fov: DRAG_SENSITIVITY_PER_FOV,
            wheel_delta_factor: WHEEL_DELTA_FOV_FACTOR,
            wheel_detail_factor: WHEEL_DETAIL_FOV_FACTOR,
            click_drag_threshold_px: CLICK_DRAG_THRESHOLD_PX,
            tick_hz: TICK_HZ,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

impl ViewerConfig {
    /// Rendered size for a marker in the given visual state.
    #[inline]
    pub fn marker_size(&self, state: MarkerState) -> f32 {
        match state {
            MarkerState::Normal => self.marker_size_normal,
            MarkerState::Hovered | MarkerState::Selected => self.marker_size_active,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(ViewerError::InvalidConfig(msg));
        if !(self.min_fov_deg > 0.0 && self.min_fov_deg <= self.max_fov_deg && self.max_fov_deg < 180.0) {
            return fail(format!(
                "fov range [{}, {}] must satisfy 0 < min <= max < 180",
                self.min_fov_deg, self.max_fov_deg
            ));
        }
        if !(self.min_fov_deg..=self.max_fov_deg).contains(&self.initial_fov_deg) {
            return fail(format!(
                "initial fov {} outside [{}, {}]",
                self.initial_fov_deg, self.min_fov_deg, self.max_fov_deg
            ));
        }
        if !(self.pitch_limit_deg > 0.0 && self.pitch_limit_deg < 90.0) {
            return fail(format!("pitch limit {} must be in (0, 90)", self.pitch_limit_deg));
        }
        if !(self.near_clip > 0.0 && self.near_clip < self.sphere_radius && self.sphere_radius < self.far_clip) {
            return fail(format!(
                "clip planes [{}, {}] must enclose sphere radius {}",
                self.near_clip, self.far_clip, self.sphere_radius
            ));
        }
        if self.point_pick_threshold < 0.0 || self.click_drag_threshold_px < 0.0 {
            return fail("thresholds must not be negative".to_string());
        }
        if self.tick_hz <= 0.0 {
            return fail(format!("tick rate {} must be positive", self.tick_hz));
        }
        Ok(())
    }
}
