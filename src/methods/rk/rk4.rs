//! Classic explicit Runge-Kutta 4 (RK4) fixed-step integrator.

use crate::{
    Float,
    core::{
        interpolate::CubicHermite,
        ode::ODE,
        result::{Evals, IntegrationResult, Steps},
        solout::{ControlFlag, SolOut},
        status::Status,
    },
    error::Error,
    methods::settings::Settings,
};

/// Classical explicit Runge-Kutta 4 (RK4) fixed-step integrator.
/// Provides a dense output via cubic Hermite interpolation.
///
/// The final step is shortened so the integration lands exactly on `xend`.
/// `settings.nmax` (default `100_000`) bounds the number of steps.
pub fn rk4<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &[Float],
    h: Float,
    mut solout: Option<&mut S>,
    settings: &Settings,
) -> Result<IntegrationResult, Error>
where
    F: ODE,
    S: SolOut,
{
    // --- Input Validation ---
    let direction: Float = if xend >= x { 1.0 } else { -1.0 };
    if h == 0.0 || !h.is_finite() || (xend != x && h.signum() != direction) {
        return Err(Error::invalid(
            "h",
            h,
            "step size must be non-zero and point towards xend",
        ));
    }
    let nmax = settings.nmax.unwrap_or(100_000);

    // --- Declarations ---
    let n = y.len();
    let mut y = y.to_vec();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];
    let mut yold = vec![0.0; n];
    let mut dyold = vec![0.0; n];
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut status = Status::Success;

    // --- Initializations ---
    f.ode(x, &y, &mut k1);
    evals.ode += 1;
    if let Some(s) = solout.as_mut() {
        let interp = CubicHermite::new(x, 0.0, &y, &y, &k1, &k1);
        if s.solout(x, x, &y, &interp) == ControlFlag::Interrupt {
            return Ok(IntegrationResult::new(
                x,
                y,
                Status::Interrupted,
                evals,
                steps,
            ));
        }
    }

    // --- Main integration loop ---
    while x != xend {
        // Check for maximum number of steps
        if steps.total >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Shorten the last step so we land exactly on xend
        let last = (x + 1.01 * h - xend) * direction > 0.0;
        let step = if last { xend - x } else { h };

        // Stage computations
        for i in 0..n {
            yt[i] = y[i] + step * A21 * k1[i];
        }
        f.ode(x + C2 * step, &yt, &mut k2);

        for i in 0..n {
            yt[i] = y[i] + step * A32 * k2[i];
        }
        f.ode(x + C3 * step, &yt, &mut k3);

        for i in 0..n {
            yt[i] = y[i] + step * A43 * k3[i];
        }
        f.ode(x + C4 * step, &yt, &mut k4);

        // Store previous state
        let xold = x;
        yold.copy_from_slice(&y);
        dyold.copy_from_slice(&k1);

        // Update state
        x = if last { xend } else { x + step };
        for i in 0..n {
            y[i] += step * (B1 * k1[i] + B2 * k2[i] + B3 * k3[i] + B4 * k4[i]);
        }
        f.ode(x, &y, &mut k1);

        evals.ode += 4;
        steps.total += 1;
        steps.accepted += 1;

        if let Some(s) = solout.as_mut() {
            let interp = CubicHermite::new(xold, step, &yold, &y, &dyold, &k1);
            if s.solout(xold, x, &y, &interp) == ControlFlag::Interrupt {
                status = Status::Interrupted;
                break;
            }
        }
    }

    Ok(IntegrationResult::new(x, y, status, evals, steps))
}

// Classical RK4 coefficients
const C2: Float = 0.5;
const C3: Float = 0.5;
const C4: Float = 1.0;
const A21: Float = 0.5;
const A32: Float = 0.5;
const A43: Float = 1.0;
const B1: Float = 1.0 / 6.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 1.0 / 3.0;
const B4: Float = 1.0 / 6.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solout::NoSolOut;

    struct Oscillator;

    impl ODE for Oscillator {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = y[1];
            dydx[1] = -y[0];
        }
    }

    #[test]
    fn lands_exactly_on_xend() {
        let result = rk4(
            &Oscillator,
            0.0,
            1.05,
            &[1.0, 0.0],
            0.1,
            None::<&mut NoSolOut>,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.x, 1.05);
        assert_eq!(result.steps.accepted, 11);
        assert!((result.y[0] - (1.05 as Float).cos()).abs() < 1e-5);
    }

    #[test]
    fn wrong_direction_step_is_rejected() {
        let err = rk4(
            &Oscillator,
            0.0,
            1.0,
            &[1.0, 0.0],
            -0.1,
            None::<&mut NoSolOut>,
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "h", .. }));
    }
}
