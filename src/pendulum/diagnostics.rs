//! Accuracy and motion diagnostics computed from a finished trajectory.
//!
//! Nothing here feeds back into the integration; these are reports for the
//! caller.

use serde::{Deserialize, Serialize};

use crate::{Float, pendulum::trajectory::Trajectory};

/// Change in total energy between the first and last sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyDrift {
    pub initial: Float,
    pub last: Float,
    /// `|last - initial|`
    pub absolute: Float,
    /// `absolute / max(|initial|, energy_scale)`.
    ///
    /// The total energy can sit at or near zero (both rods horizontal and at
    /// rest), so it is floored by the pendulum's characteristic energy
    /// [`Trajectory::energy_scale`].
    pub relative: Float,
}

impl EnergyDrift {
    /// `None` for an empty trajectory.
    pub fn from_trajectory(trajectory: &Trajectory) -> Option<Self> {
        let initial = *trajectory.energy.first()?;
        let last = *trajectory.energy.last()?;
        Some(Self::new(initial, last, trajectory.energy_scale))
    }

    pub fn new(initial: Float, last: Float, energy_scale: Float) -> Self {
        let absolute = (last - initial).abs();
        let reference = initial.abs().max(energy_scale.abs());
        let relative = if reference > 0.0 {
            absolute / reference
        } else {
            absolute
        };
        Self {
            initial,
            last,
            absolute,
            relative,
        }
    }

    pub fn grade(&self, thresholds: &EnergyThresholds) -> EnergyQuality {
        thresholds.grade(self.relative)
    }
}

/// Upper bounds on relative energy drift for each quality grade.
///
/// These are reporting heuristics, not error bounds derived from the
/// solver tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyThresholds {
    pub excellent: Float,
    pub good: Float,
    pub acceptable: Float,
}

impl Default for EnergyThresholds {
    fn default() -> Self {
        Self {
            excellent: 1e-4,
            good: 1e-3,
            acceptable: 1e-2,
        }
    }
}

impl EnergyThresholds {
    pub fn grade(&self, relative_drift: Float) -> EnergyQuality {
        if relative_drift < self.excellent {
            EnergyQuality::Excellent
        } else if relative_drift < self.good {
            EnergyQuality::Good
        } else if relative_drift < self.acceptable {
            EnergyQuality::Acceptable
        } else {
            EnergyQuality::Poor
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyQuality {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

/// Extremes reached by the bobs and angles over a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionStats {
    pub max_x1: Float,
    pub min_y1: Float,
    pub max_x2: Float,
    pub min_y2: Float,
    pub theta1_range: (Float, Float),
    pub theta2_range: (Float, Float),
}

impl MotionStats {
    /// `None` for an empty trajectory.
    pub fn from_trajectory(trajectory: &Trajectory) -> Option<Self> {
        if trajectory.is_empty() {
            return None;
        }
        Some(Self {
            max_x1: max(&trajectory.x1),
            min_y1: min(&trajectory.y1),
            max_x2: max(&trajectory.x2),
            min_y2: min(&trajectory.y2),
            theta1_range: (min(&trajectory.theta1), max(&trajectory.theta1)),
            theta2_range: (min(&trajectory.theta2), max(&trajectory.theta2)),
        })
    }
}

fn max(values: &[Float]) -> Float {
    values.iter().copied().fold(Float::NEG_INFINITY, Float::max)
}

fn min(values: &[Float]) -> Float {
    values.iter().copied().fold(Float::INFINITY, Float::min)
}

/// Distance between the final positions of the second bob of two runs.
pub fn divergence(a: &Trajectory, b: &Trajectory) -> Option<Float> {
    let (ax, ay) = a.final_bob2()?;
    let (bx, by) = b.final_bob2()?;
    Some((ax - bx).hypot(ay - by))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_follow_thresholds() {
        let t = EnergyThresholds::default();
        assert_eq!(t.grade(5e-5), EnergyQuality::Excellent);
        assert_eq!(t.grade(5e-4), EnergyQuality::Good);
        assert_eq!(t.grade(5e-3), EnergyQuality::Acceptable);
        assert_eq!(t.grade(0.5), EnergyQuality::Poor);
    }

    #[test]
    fn near_zero_initial_energy_uses_the_energy_scale() {
        // Horizontal release of the unit pendulum: E0 is zero up to rounding.
        let drift = EnergyDrift::new(-1.8e-15, 1.2e-6, 3.0 * 9.81);
        assert!((drift.relative - 1.2e-6 / (3.0 * 9.81)).abs() < 1e-18);
        assert_eq!(drift.grade(&EnergyThresholds::default()), EnergyQuality::Excellent);
    }

    #[test]
    fn large_initial_energy_is_its_own_reference() {
        let drift = EnergyDrift::new(-100.0, -99.0, 29.43);
        assert_eq!(drift.absolute, 1.0);
        assert_eq!(drift.relative, 0.01);
    }

    #[test]
    fn custom_thresholds_deserialize_with_defaults() {
        let t: EnergyThresholds = serde_json::from_str(r#"{"excellent": 1e-6}"#).unwrap();
        assert_eq!(t.excellent, 1e-6);
        assert_eq!(t.good, 1e-3);
        assert_eq!(t.grade(1e-5), EnergyQuality::Good);
    }
}
