//! Stepwise simulation state
//!
//! One ball per track, each driven through a small state machine by the
//! fixed-timestep tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RollingBody;
use super::track::Track;

/// Phase of a ball on its track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Still rolling
    Running,
    /// Came to rest partway down (could not climb the current segment)
    Stalled,
    /// Left the last segment at the bottom
    Finished,
}

/// Progress of a single ball along its track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallProgress {
    /// Segment the ball is on
    pub segment: usize,
    pub phase: BallPhase,
    /// Speed along the track (m/s, never negative)
    pub speed: f32,
    /// Distance covered along the current segment (m)
    pub distance: f32,
    /// Simulated time since release (s); frozen once settled
    pub elapsed: f32,
    /// Path length covered since release (m)
    #[serde(default)]
    pub travelled: f32,
}

impl Default for BallProgress {
    fn default() -> Self {
        Self {
            segment: 0,
            phase: BallPhase::Running,
            speed: 0.0,
            distance: 0.0,
            elapsed: 0.0,
            travelled: 0.0,
        }
    }
}

impl BallProgress {
    pub fn is_running(&self) -> bool {
        self.phase == BallPhase::Running
    }

    /// Physical position on `track`
    pub fn position(&self, track: &Track) -> Vec2 {
        if track.segment_count() == 0 {
            return Vec2::ZERO;
        }
        if self.phase == BallPhase::Finished || self.segment >= track.segment_count() {
            return track.point(track.segment_count());
        }
        track.segment(self.segment).point_at(self.distance)
    }

    /// Angle the body has turned through while rolling without slipping
    pub fn roll_angle(&self, radius: f32) -> f32 {
        if radius > 0.0 {
            self.travelled / radius
        } else {
            0.0
        }
    }

    /// Velocity vector on `track`
    pub fn velocity(&self, track: &Track) -> Vec2 {
        if self.phase != BallPhase::Running || self.segment >= track.segment_count() {
            return Vec2::ZERO;
        }
        track.segment(self.segment).delta().normalize_or_zero() * self.speed
    }
}

/// Everything the animated view advances each tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub tracks: Vec<Track>,
    /// One entry per track, same order
    pub balls: Vec<BallProgress>,
    pub body: RollingBody,
    pub gravity: f32,
    /// Ticks since the last reset
    pub tick_count: u64,
}

impl SimState {
    pub fn new(tracks: Vec<Track>, body: RollingBody, gravity: f32) -> Self {
        let balls = vec![BallProgress::default(); tracks.len()];
        Self {
            tracks,
            balls,
            body,
            gravity,
            tick_count: 0,
        }
    }

    /// Put every ball back at the top, at rest
    pub fn reset(&mut self) {
        self.balls.fill(BallProgress::default());
        self.tick_count = 0;
    }

    /// Number of balls still rolling
    pub fn running_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_running()).count()
    }

    /// True once every ball has finished or stalled
    pub fn all_settled(&self) -> bool {
        self.running_count() == 0
    }
}
