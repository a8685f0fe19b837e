//! Integration driver: runs the equations of motion through `solve_ivp` and
//! turns the sampled states into a [`Trajectory`].

use tracing::{debug, warn};

use crate::{
    Float,
    core::status::Status,
    error::Error,
    pendulum::{
        config::SimulationConfig,
        derivative::{DoublePendulum, SingularityGuard},
        diagnostics::EnergyQuality,
        params::PhysicalParameters,
        state::StateVector,
        trajectory::{SolverStats, Trajectory},
    },
    solve::{CancellationToken, IVPOptions, Method, solve_ivp},
};

/// Slack added to `duration / dt` before flooring so that ratios like
/// `2.0 / 0.01` are not lost to representation error.
const SAMPLE_COUNT_SLACK: Float = 1e-9;

/// Number of samples `floor(duration / dt)` in `[0, duration)`.
pub fn sample_count(duration: Float, dt: Float) -> Float {
    (duration / dt + SAMPLE_COUNT_SLACK).floor()
}

/// Integrate one pendulum with the default [`SimulationConfig`].
pub fn simulate(
    params: &PhysicalParameters,
    initial: StateVector,
    duration: Float,
    dt: Float,
) -> Result<Trajectory, Error> {
    Simulator::new(*params).simulate(initial, duration, dt)
}

/// A pendulum plus the settings used to integrate it. Holds no per-run
/// state, so one simulator can serve any number of runs, including
/// concurrent ones.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    params: PhysicalParameters,
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(params: PhysicalParameters) -> Self {
        Self::with_config(params, SimulationConfig::default())
    }

    pub fn with_config(params: PhysicalParameters, config: SimulationConfig) -> Self {
        Self { params, config }
    }

    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Sample the motion from `initial` at `time[i] = i * dt` over
    /// `[0, duration)`.
    pub fn simulate(
        &self,
        initial: StateVector,
        duration: Float,
        dt: Float,
    ) -> Result<Trajectory, Error> {
        self.run(initial, duration, dt, None)
    }

    /// Like [`simulate`](Self::simulate), stopping with [`Error::Cancelled`]
    /// once `cancel` is triggered.
    pub fn simulate_with_cancel(
        &self,
        initial: StateVector,
        duration: Float,
        dt: Float,
        cancel: &CancellationToken,
    ) -> Result<Trajectory, Error> {
        self.run(initial, duration, dt, Some(cancel.clone()))
    }

    fn run(
        &self,
        initial: StateVector,
        duration: Float,
        dt: Float,
        cancel: Option<CancellationToken>,
    ) -> Result<Trajectory, Error> {
        // --- Input Validation ---
        if !(duration.is_finite() && duration > 0.0) {
            return Err(Error::invalid("duration", duration, "must be positive and finite"));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::invalid("dt", dt, "must be positive and finite"));
        }
        initial.validate()?;

        let requested = sample_count(duration, dt);
        if requested > self.config.max_samples as Float {
            return Err(Error::TooManySamples {
                requested: requested as u64,
                limit: self.config.max_samples,
            });
        }
        if requested < 1.0 {
            return Err(Error::invalid(
                "duration",
                duration,
                "must be at least one sampling step",
            ));
        }
        let n = requested as usize;

        // --- Integration ---
        let time: Vec<Float> = (0..n).map(|i| i as Float * dt).collect();
        let tend = time[n - 1];
        let system = DoublePendulum::new(self.params, self.config.denominator_policy);
        let mut guard = SingularityGuard { system: &system };
        let first_step = match self.config.method {
            Method::RK4 => Some(self.config.rk4_step.unwrap_or(dt)),
            Method::DOPRI5 => None,
        };

        debug!(
            samples = n,
            duration,
            dt,
            method = ?self.config.method,
            "integrating double pendulum"
        );

        let options = IVPOptions::builder()
            .method(self.config.method)
            .rtol(self.config.rtol)
            .atol(self.config.atol)
            .nmax(self.config.step_limit(n))
            .t_eval(time)
            .solout(&mut guard)
            .maybe_first_step(first_step)
            .maybe_cancel(cancel)
            .build();
        let sol = solve_ivp(&system, 0.0, tend, &initial.to_array(), options)?;

        if let Some(time) = system.singular_at() {
            return Err(Error::NumericalInstability {
                time,
                detail: "singular denominator in the equations of motion".to_string(),
            });
        }
        let reached = sol.t.last().copied().unwrap_or(0.0);
        if sol.status != Status::Success || sol.t.len() != n {
            return Err(Error::SolverFailure {
                status: sol.status,
                time: reached,
            });
        }

        // --- Post-processing ---
        let stats = SolverStats::from(&sol);
        let clamped = system.clamped_evaluations();
        let trajectory = Trajectory::from_samples(&self.params, dt, sol.t, &sol.y, stats, clamped)?;

        if clamped > 0 {
            warn!(
                clamped,
                "denominator clamped during integration; accelerations near the singular configuration are approximate"
            );
        }
        if let Some(drift) = trajectory.energy_drift() {
            let quality = drift.grade(&self.config.energy_thresholds);
            debug!(
                nfev = stats.nfev,
                naccpt = stats.naccpt,
                nrejct = stats.nrejct,
                relative_drift = drift.relative,
                ?quality,
                "integration finished"
            );
            if quality == EnergyQuality::Poor {
                warn!(
                    relative_drift = drift.relative,
                    "poor energy conservation; consider tighter tolerances or a smaller step"
                );
            }
        }

        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendulum::derivative::DenominatorPolicy;

    #[test]
    fn sample_count_survives_representation_error() {
        assert_eq!(sample_count(2.0, 0.01), 200.0);
        assert_eq!(sample_count(10.0, 0.01), 1000.0);
        assert_eq!(sample_count(0.3, 0.1), 3.0);
        assert_eq!(sample_count(1.0, 0.3), 3.0);
    }

    #[test]
    fn rejects_bad_time_parameters_before_integrating() {
        let sim = Simulator::new(PhysicalParameters::unit());
        let s0 = StateVector::default();
        for (duration, dt, name) in [
            (-1.0, 0.01, "duration"),
            (0.0, 0.01, "duration"),
            (1.0, 0.0, "dt"),
            (1.0, -0.01, "dt"),
            (Float::NAN, 0.01, "duration"),
            (0.001, 0.01, "duration"),
        ] {
            match sim.simulate(s0, duration, dt) {
                Err(Error::InvalidParameter { name: got, .. }) => assert_eq!(got, name),
                other => panic!("({duration}, {dt}) gave {other:?}"),
            }
        }
    }

    #[test]
    fn sample_cap_applies_before_allocation() {
        let sim = Simulator::new(PhysicalParameters::unit());
        let err = sim.simulate(StateVector::default(), 1e9, 1e-9).unwrap_err();
        assert!(matches!(err, Error::TooManySamples { limit: 1_000_000, .. }));

        let small = Simulator::with_config(
            PhysicalParameters::unit(),
            SimulationConfig::builder().max_samples(50).build(),
        );
        assert!(small.simulate(StateVector::default(), 1.0, 0.01).is_err());
        assert_eq!(small.simulate(StateVector::default(), 0.5, 0.01).unwrap().len(), 50);
    }

    #[test]
    fn single_sample_run_returns_initial_state() {
        let traj = simulate(
            &PhysicalParameters::unit(),
            StateVector::new(0.5, 0.0, 0.5, 0.0),
            0.015,
            0.01,
        )
        .unwrap();
        assert_eq!(traj.time, vec![0.0]);
        assert_eq!(traj.theta1, vec![0.5]);
    }

    #[test]
    fn rk4_strategy_produces_same_shape() {
        let sim = Simulator::with_config(
            PhysicalParameters::unit(),
            SimulationConfig::builder()
                .method(Method::RK4)
                .rk4_step(0.001)
                .build(),
        );
        let traj = sim
            .simulate(StateVector::from_degrees(30.0, 0.0, 30.0, 0.0), 1.0, 0.01)
            .unwrap();
        assert_eq!(traj.len(), 100);
        let drift = traj.energy_drift().unwrap();
        assert!(drift.relative < 1e-6, "drift {}", drift.relative);
    }

    #[test]
    fn reject_policy_fails_on_singular_configuration() {
        let params = PhysicalParameters::new(1e-12, 1.0, 1.0, 1.0, 9.81).unwrap();
        let sim = Simulator::with_config(
            params,
            SimulationConfig::builder()
                .denominator_policy(DenominatorPolicy::Reject)
                .build(),
        );
        let err = sim
            .simulate(StateVector::new(0.1, 0.0, 0.1, 0.0), 1.0, 0.01)
            .unwrap_err();
        assert!(matches!(err, Error::NumericalInstability { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn pre_cancelled_run_is_reported() {
        let token = CancellationToken::new();
        token.cancel();
        let sim = Simulator::new(PhysicalParameters::unit());
        let err = sim
            .simulate_with_cancel(StateVector::default(), 10.0, 0.01, &token)
            .unwrap_err();
        assert_eq!(err, Error::Cancelled { time: 0.0 });
    }
}
