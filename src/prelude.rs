//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! ```rust
//! use double_pendulum::prelude::*;
//! ```

pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    solout::{ControlFlag, NoSolOut, SolOut},
    status::Status,
};
pub use crate::error::Error;
pub use crate::methods::settings::Tolerance;
pub use crate::pendulum::{
    DenominatorPolicy, EnergyDrift, EnergyQuality, EnergyThresholds, MotionStats,
    PhysicalParameters, SimulationConfig, Simulator, StateVector, Trajectory, divergence,
    simulate,
};
pub use crate::solve::{CancellationToken, IVPOptions, IVPSolution, Method, solve_ivp};
