#![allow(dead_code)]

use double_pendulum::prelude::*;

/// Simple harmonic oscillator y'' = -y.
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

pub fn unit() -> PhysicalParameters {
    PhysicalParameters::unit()
}

/// Initial state from angles in degrees, at rest.
pub fn released_at(theta1: f64, theta2: f64) -> StateVector {
    StateVector::from_degrees(theta1, 0.0, theta2, 0.0)
}

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
