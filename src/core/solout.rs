//! User defined callback hook executed after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop (with `xold == x`) and
/// after every accepted step. The arguments are:
/// - `xold`: the previous abscissa (left end of the last accepted step),
/// - `x`: the new abscissa after the accepted step,
/// - `y`: the integrator's current solution at `x`,
/// - `interpolator`: dense output valid on `[xold, x]`. On the initial call
///   the step is empty and the interpolant must not be evaluated.
///
/// Typical uses are sampling the solution at prescribed output points,
/// monitoring a quantity along the trajectory, or stopping early.
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: &I,
    ) -> ControlFlag;
}

/// Callback that never interrupts. Use it as the `SolOut` type parameter when
/// no user callback is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSolOut;

impl SolOut for NoSolOut {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        _x: Float,
        _y: &[Float],
        _interpolator: &I,
    ) -> ControlFlag {
        ControlFlag::Continue
    }
}
