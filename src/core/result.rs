//! A struct representing the outputted result of a numerical integrator.

use serde::{Deserialize, Serialize};

use crate::{Float, core::status::Status};

/// Function evaluation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evals {
    /// Number of right-hand side evaluations.
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Step counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Steps {
    /// Total number of attempted steps.
    pub total: usize,
    /// Number of accepted steps.
    pub accepted: usize,
    /// Number of rejected steps.
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a numerical integrator
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// The final value(s) of the dependent variable(s)
    pub y: Vec<Float>,
    /// The status of the integration process
    pub status: Status,
    /// Function evaluation counters
    pub evals: Evals,
    /// Step counters
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(
        x: Float,
        y: Vec<Float>,
        status: Status,
        evals: Evals,
        steps: Steps,
    ) -> Self {
        Self {
            x,
            y,
            status,
            evals,
            steps,
        }
    }
}
