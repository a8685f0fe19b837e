//! Configuration of the integration driver.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Float,
    pendulum::{derivative::DenominatorPolicy, diagnostics::EnergyThresholds},
    solve::Method,
};

/// LSODA's default relative and absolute tolerance.
pub const DEFAULT_TOLERANCE: Float = 1.49012e-8;

/// Hard limit on samples per run.
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// How a [`Simulator`](crate::pendulum::Simulator) integrates and what it
/// accepts.
pub struct SimulationConfig {
    /// Integration method. Default: adaptive DOPRI5.
    #[builder(default)]
    pub method: Method,
    /// Relative tolerance of the adaptive solver.
    #[builder(default = DEFAULT_TOLERANCE)]
    pub rtol: Float,
    /// Absolute tolerance of the adaptive solver.
    #[builder(default = DEFAULT_TOLERANCE)]
    pub atol: Float,
    /// Requests producing more samples than this fail before integrating.
    #[builder(default = DEFAULT_MAX_SAMPLES)]
    pub max_samples: usize,
    /// Solver step limit. Default: `max(100_000, 20 * samples)`.
    pub nmax: Option<usize>,
    /// Fixed step for [`Method::RK4`]. Default: the sampling step.
    pub rk4_step: Option<Float>,
    #[builder(default)]
    pub denominator_policy: DenominatorPolicy,
    /// Grading of the energy drift reported with each run.
    #[builder(default)]
    pub energy_thresholds: EnergyThresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SimulationConfig {
    pub(crate) fn step_limit(&self, samples: usize) -> usize {
        self.nmax
            .unwrap_or_else(|| 100_000usize.max(samples.saturating_mul(20)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builder() {
        let config = SimulationConfig::default();
        assert_eq!(config.method, Method::DOPRI5);
        assert_eq!(config.rtol, DEFAULT_TOLERANCE);
        assert_eq!(config.max_samples, 1_000_000);
        assert_eq!(config.denominator_policy, DenominatorPolicy::Clamp);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"method": "RK4", "denominator_policy": "reject"}"#).unwrap();
        assert_eq!(config.method, Method::RK4);
        assert_eq!(config.denominator_policy, DenominatorPolicy::Reject);
        assert_eq!(config.atol, DEFAULT_TOLERANCE);
        assert_eq!(config.nmax, None);
    }

    #[test]
    fn step_limit_scales_with_samples() {
        let config = SimulationConfig::default();
        assert_eq!(config.step_limit(10), 100_000);
        assert_eq!(config.step_limit(1_000_000), 20_000_000);
        let fixed = SimulationConfig::builder().nmax(42).build();
        assert_eq!(fixed.step_limit(1_000_000), 42);
    }
}
