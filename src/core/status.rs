//! Status codes for integrators

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Reached `xend`.
    Success,
    /// A [`SolOut`](crate::core::solout::SolOut) callback asked to stop.
    Interrupted,
    /// More than `nmax` steps were required.
    NeedLargerNMax,
    /// The step size underflowed relative to `x`.
    StepSizeTooSmall,
    /// Stiffness detection fired repeatedly; an explicit method is a poor fit.
    ProbablyStiff,
}
