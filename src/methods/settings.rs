//! Settings for numerical integrators

use std::ops::Index;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{Float, error::Error};

#[derive(Builder, Clone, Debug, Default)]
/// Settings for the numerical integrators. Every field is optional; `None`
/// selects the method's default.
pub struct Settings {
    /// The rounding unit, typically machine epsilon
    pub uround: Option<Float>,
    /// safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable. Negative values
    /// are not accepted.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the [`hinit`](crate::methods::hinit::hinit) function.
    /// Fixed-step methods use it as their step.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Number of steps before performing a stiffness test.
    pub nstiff: Option<usize>,
}

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Check that every component is positive and finite and, for vector
    /// tolerances, that there is one component per state.
    pub fn validate(&self, name: &'static str, n: usize) -> Result<(), Error> {
        let values: &[Float] = match self {
            Tolerance::Scalar(v) => std::slice::from_ref(v),
            Tolerance::Vector(vs) => {
                if vs.len() != n {
                    return Err(Error::invalid(
                        name,
                        vs.len() as Float,
                        "vector tolerance length must match the state dimension",
                    ));
                }
                vs
            }
        };
        match values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            Some(&bad) => Err(Error::invalid(name, bad, "tolerances must be positive and finite")),
            None => Ok(()),
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tolerance_indexes_every_component() {
        let tol = Tolerance::from(1e-8);
        assert_eq!(tol[0], 1e-8);
        assert_eq!(tol[3], 1e-8);
        assert!(tol.validate("rtol", 4).is_ok());
    }

    #[test]
    fn vector_tolerance_must_match_dimension() {
        let tol = Tolerance::from([1e-6, 1e-6]);
        assert!(matches!(
            tol.validate("atol", 4),
            Err(Error::InvalidParameter { name: "atol", .. })
        ));
    }

    #[test]
    fn non_positive_tolerance_is_rejected() {
        let tol = Tolerance::from(vec![1e-6, 0.0, 1e-6, 1e-6]);
        assert!(tol.validate("rtol", 4).is_err());
        assert!(Tolerance::from(Float::NAN).validate("rtol", 4).is_err());
    }
}
