//! Interpolation trait and the cubic Hermite interpolant shared by
//! fixed-step methods.

use crate::Float;

/// Trait for interpolating the solution within a step.
pub trait Interpolate {
    /// Interpolate the solution at the given abscissa `xi`.
    fn interpolate(&self, xi: Float, yi: &mut [Float]);
}

/// Cubic Hermite interpolant over one step `[x0, x0 + h]` built from the
/// states and derivatives at both ends.
pub struct CubicHermite<'a> {
    x0: Float,
    h: Float,
    y0: &'a [Float],
    y1: &'a [Float],
    dy0: &'a [Float],
    dy1: &'a [Float],
}

impl<'a> CubicHermite<'a> {
    pub fn new(
        x0: Float,
        h: Float,
        y0: &'a [Float],
        y1: &'a [Float],
        dy0: &'a [Float],
        dy1: &'a [Float],
    ) -> Self {
        Self {
            x0,
            h,
            y0,
            y1,
            dy0,
            dy1,
        }
    }
}

impl Interpolate for CubicHermite<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        let t = (xi - self.x0) / self.h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        for i in 0..self.y0.len() {
            yi[i] = h00 * self.y0[i]
                + h10 * self.h * self.dy0[i]
                + h01 * self.y1[i]
                + h11 * self.h * self.dy1[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermite_reproduces_cubic_exactly() {
        // y = x^3 on [1, 3]
        let (x0, h) = (1.0, 2.0);
        let y0 = [1.0];
        let y1 = [27.0];
        let dy0 = [3.0];
        let dy1 = [27.0];
        let interp = CubicHermite::new(x0, h, &y0, &y1, &dy0, &dy1);

        let mut yi = [0.0];
        for xi in [1.0, 1.5, 2.0, 2.75, 3.0] {
            interp.interpolate(xi, &mut yi);
            let expected: Float = xi * xi * xi;
            assert!((yi[0] - expected).abs() < 1e-12, "x = {xi}: {} vs {expected}", yi[0]);
        }
    }
}
