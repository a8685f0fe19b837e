//! Cartesian bob positions and mechanical energy.
//!
//! The pivot sits at the origin with `y` increasing upward, so a pendulum
//! hanging at rest has negative `y` and negative potential energy.

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    pendulum::{params::PhysicalParameters, state::StateVector},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BobPositions {
    pub x1: Float,
    pub y1: Float,
    pub x2: Float,
    pub y2: Float,
}

pub fn bob_positions(params: &PhysicalParameters, theta1: Float, theta2: Float) -> BobPositions {
    let x1 = params.l1() * theta1.sin();
    let y1 = -params.l1() * theta1.cos();
    BobPositions {
        x1,
        y1,
        x2: x1 + params.l2() * theta2.sin(),
        y2: y1 - params.l2() * theta2.cos(),
    }
}

pub fn kinetic_energy(params: &PhysicalParameters, state: &StateVector) -> Float {
    let (l1, l2) = (params.l1(), params.l2());
    let v1_sq = (l1 * state.omega1).powi(2);
    let v2_sq = v1_sq
        + (l2 * state.omega2).powi(2)
        + 2.0 * l1 * l2 * state.omega1 * state.omega2 * (state.theta1 - state.theta2).cos();
    0.5 * params.m1() * v1_sq + 0.5 * params.m2() * v2_sq
}

/// Potential energy relative to the pivot height.
pub fn potential_energy(params: &PhysicalParameters, theta1: Float, theta2: Float) -> Float {
    let pos = bob_positions(params, theta1, theta2);
    params.m1() * params.g() * pos.y1 + params.m2() * params.g() * pos.y2
}

pub fn total_energy(params: &PhysicalParameters, state: &StateVector) -> Float {
    kinetic_energy(params, state) + potential_energy(params, state.theta1, state.theta2)
}

/// Potential energy difference between hanging straight down and standing
/// straight up, halved: `(m1 + m2) g L1 + m2 g L2`. Sets the magnitude
/// against which energy drift is judged when the total energy is near zero.
pub fn energy_scale(params: &PhysicalParameters) -> Float {
    let g = params.g();
    params.total_mass() * g * params.l1() + params.m2() * g * params.l2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn hanging_bobs_lie_below_the_pivot() {
        let p = PhysicalParameters::new(1.0, 1.0, 1.0, 2.0, 9.81).unwrap();
        let pos = bob_positions(&p, 0.0, 0.0);
        assert_eq!(pos.x1, 0.0);
        assert_eq!(pos.y1, -1.0);
        assert_eq!(pos.x2, 0.0);
        assert_eq!(pos.y2, -3.0);
    }

    #[test]
    fn horizontal_rods_point_right() {
        let pos = bob_positions(&PhysicalParameters::unit(), FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(pos.x1, 1.0);
        assert_relative_eq!(pos.x2, 2.0);
        assert_relative_eq!(pos.y2, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn rest_energy_is_pure_potential() {
        let p = PhysicalParameters::unit();
        let e = total_energy(&p, &StateVector::default());
        // m1 g (-L1) + m2 g (-L1 - L2)
        assert_relative_eq!(e, -3.0 * 9.81);
    }

    #[test]
    fn energy_scale_is_the_rest_energy_magnitude() {
        let p = PhysicalParameters::new(2.0, 0.5, 1.5, 0.8, 9.81).unwrap();
        let rest = total_energy(&p, &StateVector::default());
        assert_relative_eq!(energy_scale(&p), -rest, epsilon = 1e-12);
    }

    #[test]
    fn aligned_rotation_kinetic_energy() {
        // Both rods aligned and spinning together: v1 = L1 w, v2 = (L1 + L2) w.
        let p = PhysicalParameters::unit();
        let state = StateVector::new(0.3, 2.0, 0.3, 2.0);
        assert_relative_eq!(kinetic_energy(&p, &state), 0.5 * 4.0 + 0.5 * 16.0, epsilon = 1e-12);
    }
}
