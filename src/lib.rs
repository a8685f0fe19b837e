//! Simulation of the planar double pendulum.
//!
//! The equations of motion are integrated with an adaptive Dormand-Prince
//! 5(4) solver (or fixed-step RK4) and sampled on a uniform time grid.
//! Each sample carries the angles, the Cartesian bob positions and the
//! total mechanical energy, so accuracy can be judged from energy drift.
//!
//! ```
//! use double_pendulum::prelude::*;
//!
//! let params = PhysicalParameters::new(1.0, 1.0, 1.0, 1.0, 9.81).unwrap();
//! let initial = StateVector::from_degrees(45.0, 0.0, 90.0, 0.0);
//! let trajectory = simulate(&params, initial, 2.0, 0.01).unwrap();
//!
//! assert_eq!(trajectory.len(), 200);
//! assert!(trajectory.energy_drift().unwrap().relative < 1e-4);
//! ```
//!
//! The integrators are usable on their own through [`solve_ivp`](crate::solve::solve_ivp)
//! with any type implementing [`ODE`](crate::core::ode::ODE).

pub mod core;
pub mod error;
pub mod methods;
pub mod pendulum;
pub mod prelude;
pub mod service;
pub mod solve;

pub use error::Error;
pub use methods::settings::{Settings, Tolerance};

pub type Float = f64;
