//! SciPy-like solve_ivp entry point implementation

use tracing::trace;

use crate::{
    Float,
    core::{ode::ODE, solout::SolOut},
    error::Error,
    methods::{dp::dopri5, rk::rk4, settings::Settings},
};

use super::{
    options::{IVPOptions, Method},
    solout::DefaultSolOut,
    solution::IVPSolution,
};

/// Solve an initial value problem with SciPy-like options.
///
/// Solver stops that are not caused by invalid input (step limit reached,
/// step size underflow, stiffness, user interrupt) are reported through
/// [`IVPSolution::status`]. A cancelled token yields [`Error::Cancelled`].
pub fn solve_ivp<F, S>(
    f: &F,
    x0: Float,
    xend: Float,
    y0: &[Float],
    options: IVPOptions<'_, S>,
) -> Result<IVPSolution, Error>
where
    F: ODE,
    S: SolOut,
{
    if !x0.is_finite() {
        return Err(Error::invalid("x0", x0, "must be finite"));
    }
    if !xend.is_finite() {
        return Err(Error::invalid("xend", xend, "must be finite"));
    }
    if let Some(&bad) = y0.iter().find(|v| !v.is_finite()) {
        return Err(Error::invalid("y0", bad, "initial state must be finite"));
    }
    let posneg: Float = if xend >= x0 { 1.0 } else { -1.0 };
    if let Some(te) = options.t_eval.as_deref() {
        validate_t_eval(te, x0, xend, posneg)?;
    }

    let settings = Settings {
        h0: options.first_step.or(options.settings.h0),
        hmax: options.max_step.or(options.settings.hmax),
        nmax: options.nmax.or(options.settings.nmax),
        ..options.settings
    };

    // Prepare the default SolOut (wrapping user callback if provided)
    let mut default_solout = DefaultSolOut::new(
        options.t_eval.as_deref(),
        posneg,
        options.cancel.as_ref(),
        options.solout,
    );

    trace!(method = ?options.method, x0, xend, n = y0.len(), "solve_ivp");

    // Dispatch by method
    let result = match options.method {
        Method::DOPRI5 => dopri5(
            f,
            x0,
            xend,
            y0,
            &options.rtol,
            &options.atol,
            Some(&mut default_solout),
            &settings,
        )?,
        Method::RK4 => {
            let h = settings.h0.unwrap_or((xend - x0) / 100.0);
            let h = if h == 0.0 { h } else { h.abs() * posneg };
            rk4(f, x0, xend, y0, h, Some(&mut default_solout), &settings)?
        }
    };

    if default_solout.cancelled() {
        return Err(Error::Cancelled { time: result.x });
    }

    let (t, y) = default_solout.into_data();
    Ok(IVPSolution {
        t,
        y,
        nfev: result.evals.ode,
        nstep: result.steps.total,
        naccpt: result.steps.accepted,
        nrejct: result.steps.rejected,
        status: result.status,
    })
}

fn validate_t_eval(te: &[Float], x0: Float, xend: Float, posneg: Float) -> Result<(), Error> {
    let (lo, hi) = if posneg > 0.0 { (x0, xend) } else { (xend, x0) };
    if let Some(&bad) = te.iter().find(|t| !(**t >= lo && **t <= hi)) {
        return Err(Error::invalid(
            "t_eval",
            bad,
            "sample times must lie within the integration interval",
        ));
    }
    if let Some(w) = te.windows(2).find(|w| (w[1] - w[0]) * posneg < 0.0) {
        return Err(Error::invalid(
            "t_eval",
            w[1],
            "sample times must be ordered in the direction of integration",
        ));
    }
    Ok(())
}
