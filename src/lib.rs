//! Ramp Descent - rolling-ball descent over arc-shaped ramps
//!
//! Core modules:
//! - `sim`: Track generation, batch descent timing, fixed-tick stepwise simulation
//! - `renderer`: wgpu rendering of tracks and balls
//! - `settings`: Data-driven run configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BodySettings, Settings};

/// Program configuration constants
pub mod consts {
    /// Fixed simulation timestep for the animated view (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame fed to the accumulator (window drags, debugger pauses).
    /// Must stay below `MAX_SUBSTEPS * SIM_DT` so the backlog drains.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Window canvas, in pixels
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;
    /// Drawable sub-region centered in the canvas
    pub const DRAW_WIDTH: f32 = 400.0;
    pub const DRAW_HEIGHT: f32 = 400.0;
    /// Diameter of a track sample dot
    pub const DOT_WIDTH: f32 = 10.0;
    /// Thickness of the line between samples
    pub const LINE_WIDTH: f32 = 1.5;
    /// Radius of the animated ball marker
    pub const BALL_MARKER_RADIUS: f32 = 7.0;

    /// Standard gravity (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// Substitute for a zero deflection (a straight chord has no circle)
    pub const MIN_DEFLECTION: f32 = 0.001;
}
