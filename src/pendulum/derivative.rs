//! Equations of motion of the double pendulum.
//!
//! With `delta = theta2 - theta1` the Lagrangian yields
//!
//! ```text
//! den1   = (m1 + m2) L1 - m2 L1 cos²(delta)
//! den2   = (L2 / L1) den1
//! alpha1 = [ m2 L1 w1² sin(delta) cos(delta) + m2 g sin(theta2) cos(delta)
//!           + m2 L2 w2² sin(delta) - (m1 + m2) g sin(theta1)] / den1
//! alpha2 = [-m2 L2 w2² sin(delta) cos(delta) + (m1 + m2) g sin(theta1) cos(delta)
//!           - (m1 + m2) L1 w1² sin(delta) - (m1 + m2) g sin(theta2)] / den2
//! ```
//!
//! which solves the Euler-Lagrange pair
//!
//! ```text
//! (m1 + m2) L1 alpha1 + m2 L2 alpha2 cos(delta) - m2 L2 w2² sin(delta) + (m1 + m2) g sin(theta1) = 0
//! L2 alpha2 + L1 alpha1 cos(delta) + L1 w1² sin(delta) + g sin(theta2) = 0
//! ```
//!
//! # Known limitation
//!
//! Denominators smaller in magnitude than [`DENOMINATOR_FLOOR`] are clamped
//! to the floor, keeping their sign (zero counts as positive). This is a
//! monotone perturbation that avoids infinite accelerations, not a
//! regularization: the clamped accelerations are wrong by construction.
//! [`Rates::clamped`] reports when it happened and [`DenominatorPolicy::Reject`]
//! turns it into a hard failure instead. For positive masses
//! `den1 = L1 (m1 + m2 sin²(delta)) >= m1 L1`, so the clamp only engages for
//! extreme mass or length ratios.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    core::{interpolate::Interpolate, ode::ODE, solout::{ControlFlag, SolOut}},
    pendulum::{params::PhysicalParameters, state::StateVector},
};

/// Magnitude below which a denominator is considered singular.
pub const DENOMINATOR_FLOOR: Float = 1e-10;

/// What to do when a denominator falls below [`DENOMINATOR_FLOOR`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorPolicy {
    /// Clamp to the floor with the denominator's sign and keep integrating.
    #[default]
    Clamp,
    /// Stop the run with [`Error::NumericalInstability`](crate::Error::NumericalInstability).
    Reject,
}

/// Rate of change `[omega1, alpha1, omega2, alpha2]` of a state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rates {
    pub dydt: [Float; 4],
    /// `true` if either denominator had to be clamped.
    pub clamped: bool,
}

/// Evaluate the equations of motion at `state`.
pub fn derivatives(params: &PhysicalParameters, state: &StateVector) -> Rates {
    let StateVector {
        theta1,
        omega1,
        theta2,
        omega2,
    } = *state;
    let (m1, m2) = (params.m1(), params.m2());
    let (l1, l2, g) = (params.l1(), params.l2(), params.g());
    let mt = m1 + m2;

    let delta = theta2 - theta1;
    let (sin_d, cos_d) = delta.sin_cos();
    let (sin1, sin2) = (theta1.sin(), theta2.sin());

    let den1 = mt * l1 - m2 * l1 * cos_d * cos_d;
    let den2 = (l2 / l1) * den1;
    let (den1, clamped1) = guard(den1);
    let (den2, clamped2) = guard(den2);

    let alpha1 = (m2 * l1 * omega1 * omega1 * sin_d * cos_d
        + m2 * g * sin2 * cos_d
        + m2 * l2 * omega2 * omega2 * sin_d
        - mt * g * sin1)
        / den1;

    let alpha2 = (-m2 * l2 * omega2 * omega2 * sin_d * cos_d
        + mt * g * sin1 * cos_d
        - mt * l1 * omega1 * omega1 * sin_d
        - mt * g * sin2)
        / den2;

    Rates {
        dydt: [omega1, alpha1, omega2, alpha2],
        clamped: clamped1 || clamped2,
    }
}

fn guard(den: Float) -> (Float, bool) {
    if den.abs() < DENOMINATOR_FLOOR {
        let clamped = if den < 0.0 {
            -DENOMINATOR_FLOOR
        } else {
            DENOMINATOR_FLOOR
        };
        (clamped, true)
    } else {
        (den, false)
    }
}

/// [`ODE`] adapter for one simulation run.
///
/// Counts clamped evaluations and, under [`DenominatorPolicy::Reject`],
/// remembers the time of the first singular evaluation. Interior mutability
/// is per run; create one instance per integration.
#[derive(Debug)]
pub struct DoublePendulum {
    params: PhysicalParameters,
    policy: DenominatorPolicy,
    clamped: Cell<usize>,
    singular_at: Cell<Option<Float>>,
}

impl DoublePendulum {
    pub fn new(params: PhysicalParameters, policy: DenominatorPolicy) -> Self {
        Self {
            params,
            policy,
            clamped: Cell::new(0),
            singular_at: Cell::new(None),
        }
    }

    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }

    /// Number of right-hand side evaluations that clamped a denominator.
    pub fn clamped_evaluations(&self) -> usize {
        self.clamped.get()
    }

    /// Time of the first singular evaluation seen under
    /// [`DenominatorPolicy::Reject`].
    pub fn singular_at(&self) -> Option<Float> {
        self.singular_at.get()
    }
}

impl ODE for DoublePendulum {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]) {
        let rates = derivatives(&self.params, &StateVector::from_slice(y));
        if rates.clamped {
            self.clamped.set(self.clamped.get() + 1);
            if self.policy == DenominatorPolicy::Reject && self.singular_at.get().is_none() {
                self.singular_at.set(Some(x));
            }
        }
        dydx[..4].copy_from_slice(&rates.dydt);
    }
}

/// Stops the integration after the first accepted step that followed a
/// rejected singular evaluation.
pub(crate) struct SingularityGuard<'a> {
    pub(crate) system: &'a DoublePendulum,
}

impl SolOut for SingularityGuard<'_> {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        _x: Float,
        _y: &[Float],
        _interpolator: &I,
    ) -> ControlFlag {
        if self.system.singular_at().is_some() {
            ControlFlag::Interrupt
        } else {
            ControlFlag::Continue
        }
    }
}
