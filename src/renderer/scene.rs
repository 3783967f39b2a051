//! Frame assembly: tracks and balls to canvas-space vertices

use glam::Vec2;

use super::layout::DrawLayout;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BALL_MARKER_RADIUS, DOT_WIDTH, LINE_WIDTH};
use crate::sim::{BallPhase, BallProgress, SimState, Track};

/// Stripe thickness across the ball marker (px)
const STRIPE_WIDTH: f32 = 2.0;

/// Dots at every sample, joined by lines
pub fn track_curve(track: &Track, layout: &DrawLayout) -> Vec<Vertex> {
    let points: Vec<Vec2> = (0..track.resolution())
        .map(|i| layout.sample_to_pixel(track, i))
        .collect();
    shapes::dotted_polyline(
        &points,
        DOT_WIDTH / 2.0,
        colors::TRACK_DOT,
        LINE_WIDTH,
        colors::TRACK_LINE,
    )
}

/// Ball marker colored by phase, with a stripe turned by `roll_angle`
/// (radians, clockwise on screen as the ball rolls right)
pub fn ball_marker(
    ball: &BallProgress,
    track: &Track,
    layout: &DrawLayout,
    roll_angle: f32,
) -> Vec<Vertex> {
    let center = layout.world_to_pixel(track, ball.position(track));
    let color = match ball.phase {
        BallPhase::Running => colors::BALL_RUNNING,
        BallPhase::Finished => colors::BALL_FINISHED,
        BallPhase::Stalled => colors::BALL_STALLED,
    };

    let mut vertices = shapes::circle(center, BALL_MARKER_RADIUS, color, 20);
    let arm = Vec2::from_angle(roll_angle) * BALL_MARKER_RADIUS;
    vertices.extend(shapes::line(
        center - arm,
        center + arm,
        STRIPE_WIDTH,
        colors::BALL_STRIPE,
    ));
    // Halo marks balls that have stopped
    if ball.phase != BallPhase::Running {
        vertices.extend(shapes::ring(
            center,
            BALL_MARKER_RADIUS + 1.5,
            BALL_MARKER_RADIUS + 3.0,
            color,
            20,
        ));
    }
    vertices
}

/// Every vertex for one frame: all tracks, then the balls on top
pub fn build_frame(state: &SimState, layout: &DrawLayout, show_balls: bool) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for track in &state.tracks {
        vertices.extend(track_curve(track, layout));
    }
    if show_balls {
        for (ball, track) in state.balls.iter().zip(&state.tracks) {
            let angle = ball.roll_angle(state.body.radius);
            vertices.extend(ball_marker(ball, track, layout, angle));
        }
    }
    vertices
}
