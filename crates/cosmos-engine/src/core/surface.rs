use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the host layout box a view draws into.
///
/// `width` and `height` are layout (CSS) pixels; `pixel_ratio` is the
/// device-pixel-ratio the backing store is scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        self
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Backing-store dimensions in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(0.0) as u32,
            (self.height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }

    /// A box that has not been laid out yet reports zero area.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
