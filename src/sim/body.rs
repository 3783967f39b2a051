//! Rolling body parameters

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// A ball or cylinder rolling without slipping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingBody {
    /// Rolling radius (m)
    pub radius: f32,
    /// Mass (kg)
    pub mass: f32,
    /// Moment of inertia about the rolling axis (kg·m²); solid cylinder if unset
    pub inertia: Option<f32>,
}

impl Default for RollingBody {
    fn default() -> Self {
        Self {
            radius: 1.0,
            mass: 1.0,
            inertia: None,
        }
    }
}

impl RollingBody {
    pub fn new(radius: f32, mass: f32, inertia: Option<f32>) -> Result<Self, SimError> {
        let body = Self {
            radius,
            mass,
            inertia,
        };
        body.validate()?;
        Ok(body)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SimError::InvalidBody("radius must be positive"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::InvalidBody("mass must be positive"));
        }
        if let Some(inertia) = self.inertia {
            if !inertia.is_finite() || inertia < 0.0 {
                return Err(SimError::InvalidBody("moment of inertia must be non-negative"));
            }
        }
        Ok(())
    }

    /// Moment of inertia, defaulting to a solid cylinder (m·r²/2)
    pub fn moment_of_inertia(&self) -> f32 {
        self.inertia
            .unwrap_or(self.mass * self.radius * self.radius / 2.0)
    }

    /// Fraction of gravity available for linear acceleration: m / (m + I/r²)
    pub fn rolling_factor(&self) -> f32 {
        self.mass / (self.mass + self.moment_of_inertia() / (self.radius * self.radius))
    }

    /// Acceleration along a straight incline, positive downhill.
    ///
    /// `slope_sine` is dy/L of the segment, negative when descending.
    pub fn acceleration_along(&self, slope_sine: f32, gravity: f32) -> f32 {
        -slope_sine * gravity * self.rolling_factor()
    }
}

/// Gravity must pull downward with a finite strength
pub fn validate_gravity(gravity: f32) -> Result<f32, SimError> {
    if gravity.is_finite() && gravity > 0.0 {
        Ok(gravity)
    } else {
        Err(SimError::InvalidGravity(gravity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inertia_is_solid_cylinder() {
        let body = RollingBody::new(2.0, 3.0, None).unwrap();
        assert_eq!(body.moment_of_inertia(), 6.0);
        assert!((body.rolling_factor() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_inertia() {
        // Point mass sliding: no rotational term
        let body = RollingBody::new(1.0, 1.0, Some(0.0)).unwrap();
        assert_eq!(body.rolling_factor(), 1.0);
        // Thin hoop: I = m·r², half of gravity
        let hoop = RollingBody::new(0.5, 2.0, Some(0.5)).unwrap();
        assert!((hoop.rolling_factor() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_acceleration_sign() {
        let body = RollingBody::new(1.0, 1.0, Some(0.0)).unwrap();
        assert!((body.acceleration_along(-1.0, 9.8) - 9.8).abs() < 1e-6);
        assert!(body.acceleration_along(0.5, 9.8) < 0.0);
        assert_eq!(body.acceleration_along(0.0, 9.8), 0.0);
    }

    #[test]
    fn test_invalid_bodies() {
        assert!(RollingBody::new(0.0, 1.0, None).is_err());
        assert!(RollingBody::new(1.0, -1.0, None).is_err());
        assert!(RollingBody::new(1.0, 1.0, Some(-0.1)).is_err());
        assert!(RollingBody::new(1.0, 1.0, Some(f32::NAN)).is_err());
    }

    #[test]
    fn test_gravity_validation() {
        assert_eq!(validate_gravity(9.8), Ok(9.8));
        assert_eq!(validate_gravity(0.0), Err(SimError::InvalidGravity(0.0)));
        assert_eq!(validate_gravity(-9.8), Err(SimError::InvalidGravity(-9.8)));
        assert!(matches!(validate_gravity(f32::NAN), Err(SimError::InvalidGravity(_))));
        assert!(validate_gravity(f32::INFINITY).is_err());
    }
}
