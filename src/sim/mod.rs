//! Deterministic descent simulation
//!
//! Everything here is a pure function of its inputs:
//! - Tracks are sampled analytically
//! - Batch timing solves each segment in closed form
//! - The animated view only ever advances by the fixed timestep
//! - No rendering or platform dependencies

pub mod body;
pub mod descent;
pub mod error;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod track;

pub use body::{RollingBody, validate_gravity};
pub use descent::{DescentOutcome, report_line, run_batch, simulate_descent};
pub use error::SimError;
pub use state::{BallPhase, BallProgress, SimState};
pub use tick::{FixedStep, advance_ball, tick};
pub use track::{MAX_DEFLECTION, MAX_RESOLUTION, Segment, Track, gen_arc_track, sweep_deflection};
