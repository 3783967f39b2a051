//! Canvas layout: where tracks land in pixel space
//!
//! Tracks are drawn inside a fixed rectangle centered in the canvas. Pixel
//! coordinates have their origin at the top-left with y pointing down.

use glam::Vec2;

use crate::consts::{DRAW_HEIGHT, DRAW_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Track;

/// Affine map from normalized track space into the draw rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawLayout {
    /// Full canvas size in pixels
    pub canvas: Vec2,
    /// Drawable sub-region size in pixels
    pub draw: Vec2,
}

impl Default for DrawLayout {
    fn default() -> Self {
        Self {
            canvas: Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
            draw: Vec2::new(DRAW_WIDTH, DRAW_HEIGHT),
        }
    }
}

impl DrawLayout {
    /// Top-left corner of the draw rectangle
    pub fn border(&self) -> Vec2 {
        (self.canvas - self.draw) / 2.0
    }

    /// Normalized (x, height) in [0, 1]² to pixels
    pub fn normalized_to_pixel(&self, x: f32, height: f32) -> Vec2 {
        self.border() + Vec2::new(x * self.draw.x, (1.0 - height) * self.draw.y)
    }

    /// Pixel position of sample `index` on `track`
    pub fn sample_to_pixel(&self, track: &Track, index: usize) -> Vec2 {
        let last = track.segment_count().max(1);
        self.normalized_to_pixel(index as f32 / last as f32, track.heights[index])
    }

    /// Physical track coordinates (meters) to pixels
    pub fn world_to_pixel(&self, track: &Track, pos: Vec2) -> Vec2 {
        self.normalized_to_pixel(pos.x / track.width, pos.y / track.height)
    }

    /// Canvas pixels to normalized device coordinates for a canvas of this size
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.canvas.x * 2.0 - 1.0,
            1.0 - pixel.y / self.canvas.y * 2.0,
        )
    }
}
