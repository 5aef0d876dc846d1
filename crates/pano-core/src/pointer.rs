use glam::Vec2;

/// Bounds of the rendering surface in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Width over height, or `None` for a collapsed surface.
    pub fn aspect(&self) -> Option<f32> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }
}

/// Map a client-space pointer position into normalized device coordinates:
/// x grows rightwards, y grows upwards, both in `[-1, 1]` over the surface.
/// A collapsed surface maps everything to the centre.
#[inline]
pub fn to_ndc(client: Vec2, surface: &SurfaceRect) -> Vec2 {
    if surface.width <= 0.0 || surface.height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = ((client.x - surface.left) / surface.width) * 2.0 - 1.0;
    let y = -((client.y - surface.top) / surface.height) * 2.0 + 1.0;
    Vec2::new(x, y)
}

/// Remembers the latest pointer position so the per-tick hover poll can cast
/// a ray even when no pointer event arrived that frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    surface: SurfaceRect,
    ndc: Vec2,
}

impl PointerTracker {
    pub fn new(surface: SurfaceRect) -> Self {
        Self {
            surface,
            ndc: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    pub fn set_ndc(&mut self, ndc: Vec2) {
        self.ndc = ndc;
    }

    pub fn track(&mut self, client: Vec2) -> Vec2 {
        self.ndc = to_ndc(client, &self.surface);
        self.ndc
    }
}
