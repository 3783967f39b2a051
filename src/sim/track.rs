//! Arc track geometry
//!
//! A track is a normalized height profile sampled at evenly spaced x positions
//! over [0, 1]. The profile approximates a circular arc through the top-left
//! corner (0, 1) and the bottom-right corner (1, 0), bowed away from the
//! straight chord by the deflection:
//! - positive deflection bows toward the lower-left (steep start, flat finish)
//! - negative deflection bows toward the upper-right (flat start, steep finish)
//!
//! Physical coordinates scale x by `width` and heights by `height`.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::consts::MIN_DEFLECTION;

/// Largest deflection magnitude: the arc becomes a semicircle over the chord
pub const MAX_DEFLECTION: f32 = FRAC_1_SQRT_2 as f32;

/// Most samples a single track may hold
pub const MAX_RESOLUTION: usize = 1_000_000;

/// A sampled ramp profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Normalized heights, first is 1.0 (top), last is 0.0 (bottom)
    pub heights: Vec<f32>,
    /// Horizontal span in meters
    pub width: f32,
    /// Vertical drop in meters
    pub height: f32,
    /// Deflection the profile was generated with (after the zero clamp)
    pub deflection: f32,
}

/// One straight piece of a track, in physical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.delta().length()
    }

    /// dy / L: negative going downhill
    pub fn slope_sine(&self) -> f32 {
        let len = self.length();
        if len > 0.0 { self.delta().y / len } else { 0.0 }
    }

    /// Point `distance` meters from the segment start, clamped to the segment
    pub fn point_at(&self, distance: f32) -> Vec2 {
        let len = self.length();
        if len <= 0.0 {
            return self.start;
        }
        self.start.lerp(self.end, (distance / len).clamp(0.0, 1.0))
    }
}

impl Track {
    /// Sample an arc-shaped track.
    ///
    /// Deflections smaller than [`MIN_DEFLECTION`] are raised to it, keeping
    /// their sign (zero bows downward): a straight chord has no finite circle
    /// and huge radii lose every digit to cancellation. Width and height must match: the arc is defined on a
    /// unit square.
    pub fn arc(
        deflection: f32,
        width: f32,
        height: f32,
        resolution: usize,
    ) -> Result<Self, SimError> {
        if width != height {
            return Err(SimError::DimensionMismatch { width, height });
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(SimError::InvalidDimension(width));
        }
        if resolution < 2 {
            return Err(SimError::ResolutionTooLow(resolution));
        }
        if resolution > MAX_RESOLUTION {
            return Err(SimError::ResolutionTooHigh {
                got: resolution,
                max: MAX_RESOLUTION,
            });
        }
        if !deflection.is_finite() || deflection.abs() > MAX_DEFLECTION {
            return Err(SimError::DeflectionOutOfRange(deflection));
        }

        let deflection = if deflection == 0.0 {
            MIN_DEFLECTION
        } else if deflection.abs() < MIN_DEFLECTION {
            MIN_DEFLECTION.copysign(deflection)
        } else {
            deflection
        };
        let d = f64::from(deflection);

        // Sagitta d over a chord of length √2
        let chord = SQRT_2;
        let radius = (chord * chord / 4.0 + d * d) / (2.0 * d);
        // Center sits on the y = x diagonal
        let center = 0.5 + (radius - d) * FRAC_1_SQRT_2;

        let last = resolution - 1;
        let mut heights = Vec::with_capacity(resolution);
        heights.push(1.0);
        for i in 1..last {
            let x = i as f64 / last as f64;
            let offset = (radius * radius - (center - x).powi(2)).max(0.0).sqrt();
            let y = if d > 0.0 { center - offset } else { center + offset };
            heights.push(y as f32);
        }
        heights.push(0.0);

        Ok(Self {
            heights,
            width,
            height,
            deflection,
        })
    }

    /// Build `count` tracks with deflections spread evenly over
    /// `[-max_deflection, max_deflection]`
    pub fn sweep(
        count: usize,
        max_deflection: f32,
        size: f32,
        resolution: usize,
    ) -> Result<Vec<Self>, SimError> {
        (0..count)
            .map(|i| Self::arc(sweep_deflection(i, count, max_deflection), size, size, resolution))
            .collect()
    }

    /// Number of samples
    pub fn resolution(&self) -> usize {
        self.heights.len()
    }

    pub fn segment_count(&self) -> usize {
        self.heights.len().saturating_sub(1)
    }

    /// Physical position of sample `index`
    pub fn point(&self, index: usize) -> Vec2 {
        let last = self.segment_count().max(1);
        Vec2::new(
            index as f32 / last as f32 * self.width,
            self.heights[index] * self.height,
        )
    }

    pub fn segment(&self, index: usize) -> Segment {
        Segment {
            start: self.point(index),
            end: self.point(index + 1),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).map(|i| self.segment(i))
    }

    /// Total vertical drop from first to last sample
    pub fn drop_height(&self) -> f32 {
        match (self.heights.first(), self.heights.last()) {
            (Some(top), Some(bottom)) => (top - bottom) * self.height,
            _ => 0.0,
        }
    }
}

/// Deflection of track `index` in an evenly spaced sweep
pub fn sweep_deflection(index: usize, count: usize, max_deflection: f32) -> f32 {
    if count < 2 {
        return 0.0;
    }
    let mid = (count - 1) as f32 / 2.0;
    (index as f32 - mid) / mid * max_deflection
}

/// Generate an arc track (see [`Track::arc`])
pub fn gen_arc_track(
    deflection: f32,
    width: f32,
    height: f32,
    resolution: usize,
) -> Result<Track, SimError> {
    Track::arc(deflection, width, height, resolution)
}
