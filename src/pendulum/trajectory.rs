//! Sampled output of one simulation run.

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    error::Error,
    pendulum::{
        diagnostics::{EnergyDrift, MotionStats},
        kinematics::{bob_positions, energy_scale, total_energy},
        params::PhysicalParameters,
        state::StateVector,
    },
    solve::IVPSolution,
};

/// Solver work counters for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
}

impl From<&IVPSolution> for SolverStats {
    fn from(sol: &IVPSolution) -> Self {
        Self {
            nfev: sol.nfev,
            nstep: sol.nstep,
            naccpt: sol.naccpt,
            nrejct: sol.nrejct,
        }
    }
}

/// Time series of a double pendulum run.
///
/// Every per-sample sequence has the same length; `time[i] = i * dt`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub time: Vec<Float>,
    pub theta1: Vec<Float>,
    pub theta2: Vec<Float>,
    pub x1: Vec<Float>,
    pub y1: Vec<Float>,
    pub x2: Vec<Float>,
    pub y2: Vec<Float>,
    pub energy: Vec<Float>,
    pub dt: Float,
    #[serde(rename = "L1")]
    pub l1: Float,
    #[serde(rename = "L2")]
    pub l2: Float,
    /// Characteristic energy `(m1 + m2) g L1 + m2 g L2` of the pendulum.
    pub energy_scale: Float,
    pub stats: SolverStats,
    /// Right-hand side evaluations whose denominator was clamped.
    pub clamped_evaluations: usize,
}

impl Trajectory {
    /// Derive positions and energy from sampled states.
    ///
    /// Fails with [`Error::NumericalInstability`] on the first sample with a
    /// non-finite state or energy.
    pub(crate) fn from_samples(
        params: &PhysicalParameters,
        dt: Float,
        time: Vec<Float>,
        states: &[Vec<Float>],
        stats: SolverStats,
        clamped_evaluations: usize,
    ) -> Result<Self, Error> {
        let n = time.len();
        let mut trajectory = Self {
            time: Vec::new(),
            theta1: Vec::with_capacity(n),
            theta2: Vec::with_capacity(n),
            x1: Vec::with_capacity(n),
            y1: Vec::with_capacity(n),
            x2: Vec::with_capacity(n),
            y2: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
            dt,
            l1: params.l1(),
            l2: params.l2(),
            energy_scale: energy_scale(params),
            stats,
            clamped_evaluations,
        };

        for (&t, y) in time.iter().zip(states) {
            let state = StateVector::from_slice(y);
            if state.validate().is_err() {
                return Err(Error::NumericalInstability {
                    time: t,
                    detail: format!("non-finite state {:?}", state.to_array()),
                });
            }
            let energy = total_energy(params, &state);
            if !energy.is_finite() {
                return Err(Error::NumericalInstability {
                    time: t,
                    detail: "non-finite energy".to_string(),
                });
            }
            let pos = bob_positions(params, state.theta1, state.theta2);
            trajectory.theta1.push(state.theta1);
            trajectory.theta2.push(state.theta2);
            trajectory.x1.push(pos.x1);
            trajectory.y1.push(pos.y1);
            trajectory.x2.push(pos.x2);
            trajectory.y2.push(pos.y2);
            trajectory.energy.push(energy);
        }
        trajectory.time = time;
        Ok(trajectory)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Position of the second bob at the last sample.
    pub fn final_bob2(&self) -> Option<(Float, Float)> {
        Some((*self.x2.last()?, *self.y2.last()?))
    }

    pub fn energy_drift(&self) -> Option<EnergyDrift> {
        EnergyDrift::from_trajectory(self)
    }

    pub fn motion_stats(&self) -> Option<MotionStats> {
        MotionStats::from_trajectory(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_positions_and_energy_per_sample() {
        let p = PhysicalParameters::unit();
        let states = vec![vec![0.0, 0.0, 0.0, 0.0], vec![0.1, 0.0, 0.2, 0.0]];
        let traj = Trajectory::from_samples(
            &p,
            0.5,
            vec![0.0, 0.5],
            &states,
            SolverStats::default(),
            0,
        )
        .unwrap();
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.y2[0], -2.0);
        assert_eq!(traj.energy[0], -3.0 * 9.81);
        assert!(traj.energy[1] > traj.energy[0]);
        assert_eq!(traj.l1, 1.0);
        assert_eq!(traj.energy_scale, 3.0 * 9.81);
    }

    #[test]
    fn non_finite_sample_is_an_instability() {
        let p = PhysicalParameters::unit();
        let states = vec![vec![0.0; 4], vec![Float::NAN, 0.0, 0.0, 0.0]];
        let err = Trajectory::from_samples(
            &p,
            0.1,
            vec![0.0, 0.1],
            &states,
            SolverStats::default(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NumericalInstability { time, .. } if time == 0.1));
    }
}
