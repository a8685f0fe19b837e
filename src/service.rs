//! Stateless request/response layer in front of the integration driver.
//!
//! Requests use the units a user types: angles in degrees, everything else
//! SI. Field names follow the JSON API of the visualization frontend,
//! including the capitalised `L1`/`L2`. Transport (HTTP routing, static
//! files) is left to the embedding application; [`handle_json`] is the only
//! entry point it needs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Float,
    error::Error,
    pendulum::{
        EnergyDrift, EnergyQuality, MotionStats, PhysicalParameters, SimulationConfig, Simulator,
        StateVector, Trajectory, divergence,
    },
};

/// Parameters of a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateRequest {
    /// Initial angle of the first rod, degrees.
    pub theta1: Float,
    /// Initial angle of the second rod, degrees.
    pub theta2: Float,
    /// Initial angular velocity of the first rod, rad/s.
    pub omega1: Float,
    /// Initial angular velocity of the second rod, rad/s.
    pub omega2: Float,
    pub m1: Float,
    pub m2: Float,
    #[serde(rename = "L1")]
    pub l1: Float,
    #[serde(rename = "L2")]
    pub l2: Float,
    pub g: Float,
    /// Simulated time span, seconds.
    pub duration: Float,
    /// Sampling step, seconds.
    pub dt: Float,
}

impl Default for SimulateRequest {
    fn default() -> Self {
        Self {
            theta1: 90.0,
            theta2: 90.0,
            omega1: 0.0,
            omega2: 0.0,
            m1: 1.0,
            m2: 1.0,
            l1: 1.0,
            l2: 1.0,
            g: 9.81,
            duration: 10.0,
            dt: 0.01,
        }
    }
}

impl SimulateRequest {
    pub fn parameters(&self) -> Result<PhysicalParameters, Error> {
        PhysicalParameters::new(self.m1, self.m2, self.l1, self.l2, self.g)
    }

    /// Initial state in radians.
    pub fn initial_state(&self) -> StateVector {
        StateVector::from_degrees(self.theta1, self.omega1, self.theta2, self.omega2)
    }
}

/// Three runs that differ only in the initial angle of the first rod.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareRequest {
    #[serde(flatten)]
    pub base: SimulateRequest,
    /// Offset applied to `theta1`, degrees.
    pub perturbation: Float,
}

impl Default for CompareRequest {
    fn default() -> Self {
        Self {
            base: SimulateRequest::default(),
            perturbation: 0.01,
        }
    }
}

/// Diagnostics reported next to a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub energy_drift: EnergyDrift,
    pub energy_quality: EnergyQuality,
    pub motion: MotionStats,
}

impl Diagnostics {
    fn of(trajectory: &Trajectory, config: &SimulationConfig) -> Option<Self> {
        let energy_drift = trajectory.energy_drift()?;
        Some(Self {
            energy_quality: energy_drift.grade(&config.energy_thresholds),
            energy_drift,
            motion: trajectory.motion_stats()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub success: bool,
    pub data: Trajectory,
    pub diagnostics: Option<Diagnostics>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub id: usize,
    /// Offset applied to `theta1`, degrees.
    pub delta: Float,
    pub data: Trajectory,
    /// Final distance of the second bob from the unperturbed run, metres.
    pub divergence: Option<Float>,
    /// `divergence / |delta|` with `delta` in radians.
    pub amplification: Option<Float>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub success: bool,
    pub simulations: Vec<ComparisonRun>,
}

/// Failure body. `status` is 400 for bad input and 500 when the
/// integration itself failed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl ErrorResponse {
    fn bad_request(error: String) -> Self {
        Self {
            success: false,
            error,
            status: 400,
        }
    }
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        let status = if err.is_client_error() { 400 } else { 500 };
        warn!(status, error = %err, "simulation request failed");
        Self {
            success: false,
            error: err.to_string(),
            status,
        }
    }
}

/// Run one simulation.
pub fn simulate(
    request: &SimulateRequest,
    config: &SimulationConfig,
) -> Result<SimulateResponse, ErrorResponse> {
    let simulator = Simulator::with_config(request.parameters()?, config.clone());
    let data = simulator.simulate(request.initial_state(), request.duration, request.dt)?;
    Ok(SimulateResponse {
        success: true,
        diagnostics: Diagnostics::of(&data, config),
        data,
    })
}

/// Run the unperturbed, `+perturbation` and `-perturbation` cases in
/// parallel and report how far each perturbed run ends from the first.
pub fn compare(
    request: &CompareRequest,
    config: &SimulationConfig,
) -> Result<CompareResponse, ErrorResponse> {
    let p = request.perturbation;
    if !p.is_finite() {
        return Err(Error::invalid("perturbation", p, "must be finite").into());
    }
    let simulator = Simulator::with_config(request.base.parameters()?, config.clone());
    let base = request.base.initial_state();
    let deltas = [0.0, p, -p];

    let results: Vec<Result<Trajectory, Error>> = std::thread::scope(|scope| {
        let handles: Vec<_> = deltas
            .iter()
            .map(|&delta| {
                let simulator = &simulator;
                let initial = StateVector {
                    theta1: base.theta1 + delta.to_radians(),
                    ..base
                };
                scope.spawn(move || {
                    simulator.simulate(initial, request.base.duration, request.base.dt)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let trajectories = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let reference = &trajectories[0];
    let simulations: Vec<ComparisonRun> = trajectories
        .iter()
        .zip(deltas)
        .enumerate()
        .map(|(id, (data, delta))| {
            let (divergence, amplification) = if id == 0 {
                (None, None)
            } else {
                let d = divergence(reference, data);
                let rad = delta.to_radians().abs();
                (d, d.filter(|_| rad > 0.0).map(|d| d / rad))
            };
            ComparisonRun {
                id,
                delta,
                data: data.clone(),
                divergence,
                amplification,
            }
        })
        .collect();

    Ok(CompareResponse {
        success: true,
        simulations,
    })
}

/// The two operations exposed to a transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Simulate,
    Compare,
}

/// Status code and JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

/// Decode a JSON request, run it, encode the response. An empty body is
/// treated as `{}` so every field takes its default.
pub fn handle_json(route: Route, body: &str, config: &SimulationConfig) -> Reply {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let outcome = match route {
        Route::Simulate => serde_json::from_str::<SimulateRequest>(body)
            .map_err(|e| ErrorResponse::bad_request(format!("malformed request: {e}")))
            .and_then(|req| simulate(&req, config))
            .map(|resp| serde_json::to_string(&resp)),
        Route::Compare => serde_json::from_str::<CompareRequest>(body)
            .map_err(|e| ErrorResponse::bad_request(format!("malformed request: {e}")))
            .and_then(|req| compare(&req, config))
            .map(|resp| serde_json::to_string(&resp)),
    };

    match outcome {
        Ok(Ok(body)) => Reply { status: 200, body },
        Ok(Err(e)) => error_reply(ErrorResponse {
            success: false,
            error: format!("failed to encode response: {e}"),
            status: 500,
        }),
        Err(err) => error_reply(err),
    }
}

fn error_reply(err: ErrorResponse) -> Reply {
    let body = serde_json::json!({ "success": false, "error": err.error }).to_string();
    Reply {
        status: err.status,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_frontend() {
        let req: SimulateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, SimulateRequest::default());
        assert_eq!(req.theta1, 90.0);
        assert_eq!(req.dt, 0.01);

        let cmp: CompareRequest = serde_json::from_str(r#"{"L1": 2.0}"#).unwrap();
        assert_eq!(cmp.perturbation, 0.01);
        assert_eq!(cmp.base.l1, 2.0);
        assert_eq!(cmp.base.theta2, 90.0);
    }

    #[test]
    fn bad_input_maps_to_400() {
        let req = SimulateRequest {
            l1: 0.0,
            ..SimulateRequest::default()
        };
        let err = simulate(&req, &SimulationConfig::default()).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(!err.success);
        assert!(err.error.contains("L1"));
    }

    #[test]
    fn solver_failure_maps_to_500() {
        let config = SimulationConfig::builder().nmax(5).build();
        let req = SimulateRequest {
            duration: 1.0,
            ..SimulateRequest::default()
        };
        let err = simulate(&req, &config).unwrap_err();
        assert_eq!(err.status, 500);
    }

    #[test]
    fn malformed_json_is_a_client_error() {
        let reply = handle_json(Route::Simulate, "{not json", &SimulationConfig::default());
        assert_eq!(reply.status, 400);
        let body: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(body["success"], false);
    }
}
