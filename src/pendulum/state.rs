//! Integration state of the double pendulum.

use serde::{Deserialize, Serialize};

use crate::{Float, error::Error};

/// `[theta1, omega1, theta2, omega2]`: rod angles measured from the downward
/// vertical (rad) and their angular velocities (rad/s).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub theta1: Float,
    pub omega1: Float,
    pub theta2: Float,
    pub omega2: Float,
}

impl StateVector {
    pub fn new(theta1: Float, omega1: Float, theta2: Float, omega2: Float) -> Self {
        Self {
            theta1,
            omega1,
            theta2,
            omega2,
        }
    }

    /// Angles in degrees, angular velocities in rad/s.
    pub fn from_degrees(theta1: Float, omega1: Float, theta2: Float, omega2: Float) -> Self {
        Self::new(theta1.to_radians(), omega1, theta2.to_radians(), omega2)
    }

    pub fn to_array(self) -> [Float; 4] {
        [self.theta1, self.omega1, self.theta2, self.omega2]
    }

    /// Builds a state from the first four components of a solver state.
    pub fn from_slice(y: &[Float]) -> Self {
        Self::new(y[0], y[1], y[2], y[3])
    }

    /// The same configuration reflected through the vertical axis.
    pub fn mirrored(self) -> Self {
        Self::new(-self.theta1, -self.omega1, -self.theta2, -self.omega2)
    }

    /// Every component must be finite.
    pub fn validate(&self) -> Result<(), Error> {
        let named = [
            ("theta1", self.theta1),
            ("omega1", self.omega1),
            ("theta2", self.theta2),
            ("omega2", self.omega2),
        ];
        match named.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(name, value)) => Err(Error::invalid(name, value, "initial state must be finite")),
            None => Ok(()),
        }
    }
}

impl From<[Float; 4]> for StateVector {
    fn from(y: [Float; 4]) -> Self {
        Self::new(y[0], y[1], y[2], y[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn converts_degrees_to_radians() {
        let s = StateVector::from_degrees(90.0, 0.5, -90.0, 0.0);
        assert!((s.theta1 - FRAC_PI_2).abs() < 1e-15);
        assert!((s.theta2 + FRAC_PI_2).abs() < 1e-15);
        assert_eq!(s.omega1, 0.5);
    }

    #[test]
    fn array_layout_matches_solver_order() {
        let s = StateVector::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(StateVector::from_slice(&s.to_array()), s);
    }

    #[test]
    fn non_finite_components_are_rejected() {
        let err = StateVector::new(0.0, Float::NAN, 0.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "omega1", .. }));
    }
}
