//! Default SolOut that implements t_eval sampling, step endpoint recording
//! and cancellation; wraps a user SolOut.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        solout::{ControlFlag, SolOut},
    },
    solve::cancel::CancellationToken,
};

pub struct DefaultSolOut<'a, S: SolOut> {
    t_eval: Option<&'a [Float]>,
    posneg: Float,
    next_idx: usize,
    tol: Float,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    cancel: Option<&'a CancellationToken>,
    cancelled: bool,
    user: Option<&'a mut S>,
}

impl<'a, S: SolOut> DefaultSolOut<'a, S> {
    pub fn new(
        t_eval: Option<&'a [Float]>,
        posneg: Float,
        cancel: Option<&'a CancellationToken>,
        user: Option<&'a mut S>,
    ) -> Self {
        let capacity = t_eval.map_or(0, <[Float]>::len);
        Self {
            t_eval,
            posneg,
            next_idx: 0,
            tol: 1e-12,
            t: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            cancel,
            cancelled: false,
            user,
        }
    }

    /// `true` if the run was stopped by the cancellation token.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }
}

impl<S: SolOut> SolOut for DefaultSolOut<'_, S> {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: &I,
    ) -> ControlFlag {
        match self.t_eval {
            Some(te) => {
                let mut i = self.next_idx;
                if xold == x {
                    // Initial call: only exact matches, the interpolant is empty
                    while i < te.len() && (te[i] - x).abs() <= self.tol {
                        self.t.push(te[i]);
                        self.y.push(y.to_vec());
                        i += 1;
                    }
                } else {
                    // Include all te[i] in (xold, x] up to tolerance
                    while i < te.len() && (te[i] - x) * self.posneg <= self.tol {
                        let mut yi = vec![0.0; y.len()];
                        interpolator.interpolate(te[i], &mut yi);
                        self.t.push(te[i]);
                        self.y.push(yi);
                        i += 1;
                    }
                }
                self.next_idx = i;
            }
            None => {
                self.t.push(x);
                self.y.push(y.to_vec());
            }
        }

        if self.cancel.is_some_and(CancellationToken::is_cancelled) {
            self.cancelled = true;
            return ControlFlag::Interrupt;
        }

        // Forward to user callback if any
        if let Some(user) = self.user.as_deref_mut() {
            return user.solout(xold, x, y, interpolator);
        }

        ControlFlag::Continue
    }
}
