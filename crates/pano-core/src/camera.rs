//! Panorama camera.
//!
//! The eye sits fixed at the centre of the background sphere and looks along a
//! latitude/longitude direction. Dragging changes `lat`/`lng`, the wheel
//! changes the field of view. Both are clamped here so callers never have to.

use crate::config::ViewerConfig;
use crate::constants::LOOK_DISTANCE;
use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera with yaw/pitch expressed in degrees.
#[derive(Clone, Debug)]
pub struct PanoramaCamera {
    lat_deg: f32,
    lng_deg: f32,
    fov_deg: f32,
    aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    min_fov_deg: f32,
    max_fov_deg: f32,
    pitch_limit_deg: f32,
}

impl PanoramaCamera {
    pub fn new(config: &ViewerConfig, aspect: f32) -> Self {
        let mut camera = Self {
            lat_deg: 0.0,
            lng_deg: 0.0,
            fov_deg: config.initial_fov_deg,
            aspect: 1.0,
            znear: config.near_clip,
            zfar: config.far_clip,
            min_fov_deg: config.min_fov_deg,
            max_fov_deg: config.max_fov_deg,
            pitch_limit_deg: config.pitch_limit_deg,
        };
        camera.set_aspect(aspect);
        camera
    }

    #[inline]
    pub fn lat(&self) -> f32 {
        self.lat_deg
    }

    #[inline]
    pub fn lng(&self) -> f32 {
        self.lng_deg
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_deg
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Point the camera; pitch is clamped to the configured limit so the view
    /// never flips over a pole.
    pub fn set_orientation(&mut self, lat_deg: f32, lng_deg: f32) {
        self.lat_deg = lat_deg.clamp(-self.pitch_limit_deg, self.pitch_limit_deg);
        self.lng_deg = lng_deg;
    }

    pub fn set_fov(&mut self, fov_deg: f32) {
        self.fov_deg = fov_deg.clamp(self.min_fov_deg, self.max_fov_deg);
    }

    /// Positive deltas zoom out, negative zoom in.
    pub fn zoom_by(&mut self, delta_deg: f32) {
        if delta_deg.is_finite() {
            self.set_fov(self.fov_deg + delta_deg);
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let phi = (90.0 - self.lat_deg).to_radians(); // polar angle from +Y
        let theta = self.lng_deg.to_radians(); // around +Y
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    }

    pub fn target(&self) -> Vec3 {
        self.forward() * LOOK_DISTANCE
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::ZERO, self.target(), Vec3::Y)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.znear, self.zfar)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// Built from the camera basis rather than by unprojecting, which keeps
    /// the direction exact regardless of the near/far ratio.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        let half_h = (self.fov_deg.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Ray::new(Vec3::ZERO, dir)
    }
}
