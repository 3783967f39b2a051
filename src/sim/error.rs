//! Simulation input errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("arc track must have width == height (got width {width}, height {height})")]
    DimensionMismatch { width: f32, height: f32 },

    #[error("track size must be positive and finite (got {0})")]
    InvalidDimension(f32),

    #[error("track resolution must be at least 2 samples (got {0})")]
    ResolutionTooLow(usize),

    #[error("track resolution must be at most {max} samples (got {got})")]
    ResolutionTooHigh { got: usize, max: usize },

    #[error("deflection {0} is outside the arc's range (|d| <= 0.7071)")]
    DeflectionOutOfRange(f32),

    #[error("invalid rolling body: {0}")]
    InvalidBody(&'static str),

    #[error("gravity must be positive and finite (got {0})")]
    InvalidGravity(f32),
}
