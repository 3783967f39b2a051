//! Constant-acceleration motion along a straight segment
//!
//! With entry speed `v` and acceleration `a` along the segment (positive
//! downhill), the distance covered after `t` seconds is `v·t + a·t²/2`.
//! Reaching distance `L` means solving `a/2·t² + v·t − L = 0`.

/// Below this the acceleration is treated as zero (flat segment)
const FLAT_EPSILON: f32 = 1e-9;

/// Real roots of `a/2·t² + v·t − distance = 0`, ordered ascending.
///
/// Returns `None` when the discriminant `v² + 2·a·distance` is negative: the
/// body turns around before covering the distance.
pub fn arrival_roots(speed: f32, accel: f32, distance: f32) -> Option<(f32, f32)> {
    if accel.abs() < FLAT_EPSILON {
        if speed > 0.0 {
            let t = distance / speed;
            return Some((t, t));
        }
        return None;
    }

    let discriminant = speed * speed + 2.0 * accel * distance;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();

    // Stable pair: one root from the quadratic formula, the other from
    // Vieta's product (t1·t2 = −2·distance / a)
    let q = -0.5 * (speed + root.copysign(speed));
    let (t1, t2) = if q != 0.0 {
        (q / (0.5 * accel), -distance / q)
    } else {
        // speed == 0 and distance == 0
        (0.0, 0.0)
    };
    Some((t1.min(t2), t1.max(t2)))
}

/// Pick the physical arrival time: the smallest non-negative root
pub fn smallest_non_negative((t1, t2): (f32, f32)) -> Option<f32> {
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Time to cover `distance` from entry speed `speed` under constant `accel`
pub fn time_to_cover(speed: f32, accel: f32, distance: f32) -> Option<f32> {
    arrival_roots(speed, accel, distance).and_then(smallest_non_negative)
}

/// Time and distance until the body comes to rest, if it is decelerating
pub fn stopping(speed: f32, accel: f32) -> Option<(f32, f32)> {
    if accel < 0.0 && speed >= 0.0 {
        let t = speed / -accel;
        Some((t, speed * speed / (-2.0 * accel)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rest_downhill() {
        // d = a t²/2 → t = sqrt(2d/a)
        let t = time_to_cover(0.0, 2.0, 4.0).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_uphill_takes_first_arrival() {
        // v = 10, a = -2, d = 16: roots 2 and 8, the ball arrives at t = 2
        let roots = arrival_roots(10.0, -2.0, 16.0).unwrap();
        assert!((roots.0 - 2.0).abs() < 1e-5);
        assert!((roots.1 - 8.0).abs() < 1e-5);
        assert!((time_to_cover(10.0, -2.0, 16.0).unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_downhill_with_speed_skips_negative_root() {
        // v = 1, a = 2, d = 2: t² + t - 2 = 0 → t = 1 or t = -2
        let roots = arrival_roots(1.0, 2.0, 2.0).unwrap();
        assert!((roots.0 + 2.0).abs() < 1e-5);
        assert!((time_to_cover(1.0, 2.0, 2.0).unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_discriminant_is_unreachable() {
        // Stops after 25 m, never covers 30 m
        assert!(arrival_roots(10.0, -2.0, 30.0).is_none());
        assert!(time_to_cover(0.0, -1.0, 1.0).is_none());
    }

    #[test]
    fn test_flat_segment() {
        assert_eq!(time_to_cover(4.0, 0.0, 2.0), Some(0.5));
        assert_eq!(time_to_cover(0.0, 0.0, 2.0), None);
    }

    #[test]
    fn test_stopping() {
        let (t, d) = stopping(10.0, -2.0).unwrap();
        assert_eq!(t, 5.0);
        assert_eq!(d, 25.0);
        assert!(stopping(10.0, 2.0).is_none());
    }
}
