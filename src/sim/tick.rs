//! Fixed timestep simulation tick
//!
//! Advances every running ball by exactly one timestep. Segment crossings
//! inside a tick are solved exactly, so the animation reaches the bottom at the
//! same time the batch simulator reports.

use super::body::RollingBody;
use super::kinematics::{stopping, time_to_cover};
use super::state::{BallPhase, BallProgress, SimState};
use super::track::Track;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, dt: f32) {
    state.tick_count += 1;
    let body = state.body;
    let gravity = state.gravity;

    for (index, (ball, track)) in state.balls.iter_mut().zip(&state.tracks).enumerate() {
        if !ball.is_running() {
            continue;
        }
        advance_ball(ball, track, &body, gravity, dt);

        match ball.phase {
            BallPhase::Finished => {
                log::info!("Ball {} finished in {:.4}s", index, ball.elapsed);
            }
            BallPhase::Stalled => {
                log::warn!(
                    "Ball {} stalled on segment {} after {:.4}s",
                    index,
                    ball.segment,
                    ball.elapsed
                );
            }
            BallPhase::Running => {}
        }
    }
}

/// Move one ball forward by `dt` seconds along its track
pub fn advance_ball(
    ball: &mut BallProgress,
    track: &Track,
    body: &RollingBody,
    gravity: f32,
    dt: f32,
) {
    let mut remaining = dt;

    while ball.is_running() && remaining > 0.0 {
        if ball.segment >= track.segment_count() {
            ball.phase = BallPhase::Finished;
            break;
        }

        let segment = track.segment(ball.segment);
        let accel = body.acceleration_along(segment.slope_sine(), gravity);
        let left = (segment.length() - ball.distance).max(0.0);

        // Reaches the end of the segment within this tick
        let arrival = time_to_cover(ball.speed, accel, left);
        if let Some(t) = arrival.filter(|t| *t <= remaining) {
            ball.elapsed += t;
            ball.travelled += left;
            ball.speed = (ball.speed + accel * t).max(0.0);
            ball.segment += 1;
            ball.distance = 0.0;
            remaining -= t;
            if ball.segment == track.segment_count() {
                ball.phase = BallPhase::Finished;
            }
            continue;
        }

        // Comes to rest before the end of the segment
        let stop = stopping(ball.speed, accel);
        if arrival.is_none() && stop.is_none() {
            // At rest on a flat piece
            ball.speed = 0.0;
            ball.phase = BallPhase::Stalled;
            break;
        }
        if let Some((t_stop, d_stop)) = stop.filter(|(t, _)| *t <= remaining) {
            ball.elapsed += t_stop;
            ball.distance += d_stop;
            ball.travelled += d_stop;
            ball.speed = 0.0;
            ball.phase = BallPhase::Stalled;
            break;
        }

        // Still on this segment at the end of the tick
        let step = ball.speed * remaining + 0.5 * accel * remaining * remaining;
        ball.distance += step;
        ball.travelled += step;
        ball.speed = (ball.speed + accel * remaining).max(0.0);
        ball.elapsed += remaining;
        remaining = 0.0;
    }
}

/// Accumulates frame time and runs whole fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Feed one rendered frame's duration, returning the number of ticks run
    pub fn advance(&mut self, state: &mut SimState, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop any backlog the substep cap left behind
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Frame time not yet consumed by a tick
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRAVITY;
    use crate::sim::descent::{DescentOutcome, run_batch, simulate_descent};
    use crate::sim::track::gen_arc_track;

    fn run_until_settled(state: &mut SimState) {
        for _ in 0..20_000 {
            if state.all_settled() {
                return;
            }
            tick(state, SIM_DT);
        }
        panic!("simulation did not settle");
    }

    #[test]
    fn test_stepwise_matches_batch() {
        let tracks = Track::sweep(11, 0.3, 10.0, 20).unwrap();
        let body = RollingBody::default();
        let batch = run_batch(&tracks, &body, GRAVITY);

        let mut state = SimState::new(tracks, body, GRAVITY);
        run_until_settled(&mut state);

        for (i, (ball, outcome)) in state.balls.iter().zip(&batch).enumerate() {
            assert_eq!(ball.phase, BallPhase::Finished, "ball {i}");
            let expected = outcome.time().unwrap();
            assert!(
                (ball.elapsed - expected).abs() < 1e-3 * expected.max(1.0),
                "ball {i}: {} vs {}",
                ball.elapsed,
                expected
            );
            assert_eq!(ball.position(&state.tracks[i]), state.tracks[i].point(19));
        }
    }

    #[test]
    fn test_ball_moves_downhill_each_tick() {
        let track = gen_arc_track(0.2, 10.0, 10.0, 20).unwrap();
        let mut state = SimState::new(vec![track], RollingBody::default(), GRAVITY);
        let mut last = state.balls[0].position(&state.tracks[0]);
        for _ in 0..10 {
            tick(&mut state, SIM_DT);
            let pos = state.balls[0].position(&state.tracks[0]);
            assert!(pos.y < last.y);
            assert!(pos.x > last.x);
            last = pos;
        }
        assert_eq!(state.tick_count, 10);
        assert!((state.balls[0].elapsed - 10.0 * SIM_DT).abs() < 1e-5);
    }

    #[test]
    fn test_stall_is_terminal() {
        let mut track = gen_arc_track(0.3, 10.0, 10.0, 20).unwrap();
        track.heights = vec![0.3, 0.2, 0.5, 0.0];
        let body = RollingBody::default();
        let batch = simulate_descent(&track, &body, GRAVITY);

        let mut state = SimState::new(vec![track], body, GRAVITY);
        run_until_settled(&mut state);
        let ball = state.balls[0].clone();
        assert_eq!(ball.phase, BallPhase::Stalled);
        assert_eq!(ball.speed, 0.0);
        assert!(ball.distance > 0.0);
        assert!(matches!(batch, DescentOutcome::Stalled { segment, .. } if segment == ball.segment));

        // Further ticks leave a settled ball alone
        tick(&mut state, SIM_DT);
        assert_eq!(state.balls[0].elapsed, ball.elapsed);
        assert_eq!(state.balls[0].distance, ball.distance);
    }

    #[test]
    fn test_rest_on_flat_stalls() {
        let mut track = gen_arc_track(0.3, 10.0, 10.0, 20).unwrap();
        track.heights = vec![0.5, 0.5, 0.0];
        let mut state = SimState::new(vec![track], RollingBody::default(), GRAVITY);
        tick(&mut state, SIM_DT);
        assert_eq!(state.balls[0].phase, BallPhase::Stalled);
        assert_eq!(state.balls[0].segment, 0);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let tracks = Track::sweep(1, 0.0, 10.0, 20).unwrap();
        let mut state = SimState::new(tracks, RollingBody::default(), GRAVITY);
        let mut stepper = FixedStep::default();

        assert_eq!(stepper.advance(&mut state, SIM_DT * 0.5), 0);
        assert_eq!(stepper.advance(&mut state, SIM_DT * 0.6), 1);
        assert_eq!(stepper.advance(&mut state, SIM_DT * 3.0), 3);
        assert_eq!(state.tick_count, 4);

        // Long stalls are capped
        stepper.reset();
        assert!(stepper.advance(&mut state, 5.0) <= MAX_SUBSTEPS);
        assert!(stepper.accumulator() < SIM_DT);
    }

    #[test]
    fn test_slow_frames_leave_no_backlog() {
        let tracks = Track::sweep(1, 0.0, 10.0, 20).unwrap();
        let mut state = SimState::new(tracks, RollingBody::default(), GRAVITY);
        let mut stepper = FixedStep::default();

        for _ in 0..100 {
            assert!(stepper.advance(&mut state, 0.25) <= MAX_SUBSTEPS);
            assert!(stepper.accumulator() <= SIM_DT);
        }
        // Back at full frame rate: one tick per frame, give or take rounding
        for _ in 0..100 {
            let ticks = stepper.advance(&mut state, SIM_DT);
            assert!(ticks <= 2, "ran {ticks} ticks");
            assert!(stepper.accumulator() <= SIM_DT);
        }
    }

    #[test]
    fn test_substep_cap_trims_backlog() {
        let tracks = Track::sweep(1, 0.0, 10.0, 20).unwrap();
        let mut state = SimState::new(tracks, RollingBody::default(), GRAVITY);
        let mut stepper = FixedStep {
            accumulator: SIM_DT * 20.0,
        };
        assert_eq!(stepper.advance(&mut state, 0.0), MAX_SUBSTEPS);
        assert!(stepper.accumulator() <= SIM_DT);
    }

    #[test]
    fn test_travelled_matches_track_length() {
        let track = gen_arc_track(0.2, 10.0, 10.0, 20).unwrap();
        let length: f32 = track.segments().map(|s| s.length()).sum();
        let mut state = SimState::new(vec![track], RollingBody::default(), GRAVITY);

        tick(&mut state, SIM_DT);
        let early = state.balls[0].travelled;
        assert!(early > 0.0 && early < length);

        run_until_settled(&mut state);
        assert_eq!(state.balls[0].phase, BallPhase::Finished);
        assert!((state.balls[0].travelled - length).abs() < 1e-3 * length);
    }
}
