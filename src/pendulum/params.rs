//! Physical configuration of a double pendulum.

use serde::Serialize;

use crate::{Float, error::Error};

/// Standard gravity, m/s².
pub const STANDARD_GRAVITY: Float = 9.81;

/// Masses (kg), rod lengths (m) and gravitational acceleration (m/s²).
///
/// Point masses sit at the end of massless rigid rods hanging from
/// frictionless pivots. Every value is validated to be positive and finite
/// at construction, and the struct is immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhysicalParameters {
    m1: Float,
    m2: Float,
    #[serde(rename = "L1")]
    l1: Float,
    #[serde(rename = "L2")]
    l2: Float,
    g: Float,
}

impl PhysicalParameters {
    pub fn new(m1: Float, m2: Float, l1: Float, l2: Float, g: Float) -> Result<Self, Error> {
        positive("m1", m1)?;
        positive("m2", m2)?;
        positive("L1", l1)?;
        positive("L2", l2)?;
        positive("g", g)?;
        Ok(Self { m1, m2, l1, l2, g })
    }

    /// Unit masses and lengths under standard gravity.
    pub fn unit() -> Self {
        Self {
            m1: 1.0,
            m2: 1.0,
            l1: 1.0,
            l2: 1.0,
            g: STANDARD_GRAVITY,
        }
    }

    pub fn m1(&self) -> Float {
        self.m1
    }

    pub fn m2(&self) -> Float {
        self.m2
    }

    pub fn l1(&self) -> Float {
        self.l1
    }

    pub fn l2(&self) -> Float {
        self.l2
    }

    pub fn g(&self) -> Float {
        self.g
    }

    /// Combined mass `m1 + m2`.
    pub fn total_mass(&self) -> Float {
        self.m1 + self.m2
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self::unit()
    }
}

fn positive(name: &'static str, value: Float) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(name, value, "must be positive and finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        let p = PhysicalParameters::new(1.0, 2.0, 0.5, 1.5, 9.81).unwrap();
        assert_eq!(p.m2(), 2.0);
        assert_eq!(p.l1(), 0.5);
        assert_eq!(p.total_mass(), 3.0);
    }

    #[test]
    fn rejects_zero_length() {
        let err = PhysicalParameters::new(1.0, 1.0, 0.0, 1.0, 9.81).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "L1", .. }));
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert!(PhysicalParameters::new(-1.0, 1.0, 1.0, 1.0, 9.81).is_err());
        assert!(PhysicalParameters::new(1.0, Float::NAN, 1.0, 1.0, 9.81).is_err());
        assert!(PhysicalParameters::new(1.0, 1.0, 1.0, Float::INFINITY, 9.81).is_err());
        assert!(PhysicalParameters::new(1.0, 1.0, 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn serializes_lengths_with_capitalised_names() {
        let json = serde_json::to_value(PhysicalParameters::unit()).unwrap();
        assert_eq!(json["L1"], 1.0);
        assert_eq!(json["g"], 9.81);
    }
}
