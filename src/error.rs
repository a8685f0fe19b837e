//! Errors for integration methods and pendulum simulations

use thiserror::Error;

use crate::{Float, core::status::Status};

/// Errors returned by the integrators and the simulation driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A physical constant, time parameter, initial state component or solver
    /// setting is out of range. Raised before any integration work is done.
    #[error("invalid parameter `{name}` (got {value}): {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Float,
        reason: &'static str,
    },

    /// The requested duration/dt ratio would produce more samples than allowed.
    #[error("{requested} samples requested, at most {limit} are allowed")]
    TooManySamples { requested: u64, limit: usize },

    /// The solution left the finite domain, or a singular configuration was
    /// reached while singular denominators are rejected.
    #[error("numerical instability at t = {time}: {detail}")]
    NumericalInstability { time: Float, detail: String },

    /// The adaptive integrator stopped before reaching the final time.
    #[error("solver stopped at t = {time} with status {status:?}")]
    SolverFailure { status: Status, time: Float },

    /// The run was cancelled through its [`CancellationToken`](crate::solve::CancellationToken).
    #[error("integration cancelled at t = {time}")]
    Cancelled { time: Float },
}

impl Error {
    /// `true` when the error was caused by the caller's input rather than by
    /// the integration itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. } | Error::TooManySamples { .. }
        )
    }

    pub(crate) fn invalid(name: &'static str, value: Float, reason: &'static str) -> Self {
        Error::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_separated_from_solver_errors() {
        assert!(Error::invalid("dt", 0.0, "must be positive").is_client_error());
        assert!(
            Error::TooManySamples {
                requested: 10,
                limit: 5
            }
            .is_client_error()
        );
        assert!(
            !Error::SolverFailure {
                status: Status::StepSizeTooSmall,
                time: 1.0
            }
            .is_client_error()
        );
        assert!(!Error::Cancelled { time: 0.0 }.is_client_error());
    }

    #[test]
    fn messages_name_the_offending_parameter() {
        let msg = Error::invalid("L1", 0.0, "must be positive").to_string();
        assert_eq!(msg, "invalid parameter `L1` (got 0): must be positive");
    }
}
