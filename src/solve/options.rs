//! Options and method selection for solve_ivp

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Float,
    core::solout::SolOut,
    methods::settings::{Settings, Tolerance},
    solve::cancel::CancellationToken,
};

/// Solver method selection (roughly mirroring scipy.integrate.solve_ivp)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Dormand-Prince 5(4) adaptive RK with dense output and stiffness detection
    #[default]
    DOPRI5,
    /// Classic fixed-step RK4; the step is `first_step`
    RK4,
}

#[derive(Builder)]
/// Options for solve_ivp similar to SciPy
pub struct IVPOptions<'a, S: SolOut> {
    /// Method to use. Default: DOPRI5.
    #[builder(default)]
    pub method: Method,
    /// Relative tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub atol: Tolerance,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Points where the solution is requested. They must lie in the
    /// integration interval and be ordered in the direction of integration.
    /// When absent every accepted step endpoint is recorded instead.
    pub t_eval: Option<Vec<Float>>,
    /// Optional user callback invoked after each accepted step, after the
    /// internal `t_eval` sampling.
    pub solout: Option<&'a mut S>,
    /// Initial step suggestion (maps to `settings.h0`). For RK4 this is the
    /// fixed step; default `(xend - x0) / 100`.
    pub first_step: Option<Float>,
    /// Maximum step size (maps to `settings.hmax`).
    pub max_step: Option<Float>,
    /// Checked after every accepted step; a cancelled token stops the run
    /// with [`Error::Cancelled`](crate::Error::Cancelled).
    pub cancel: Option<CancellationToken>,
    /// Step-size controller tuning (`uround`, `safety_factor`, `scale_min`,
    /// `scale_max`, `beta`, `nstiff`). `first_step`, `max_step` and `nmax`
    /// take precedence over the matching fields here.
    #[builder(default)]
    pub settings: Settings,
}
