//! The double pendulum: parameters, equations of motion, the integration
//! driver and the diagnostics computed from its output.

pub mod config;
pub mod derivative;
pub mod diagnostics;
pub mod kinematics;
pub mod params;
pub mod simulate;
pub mod state;
pub mod trajectory;

pub use config::SimulationConfig;
pub use derivative::{DenominatorPolicy, DoublePendulum, Rates, derivatives};
pub use diagnostics::{EnergyDrift, EnergyQuality, EnergyThresholds, MotionStats, divergence};
pub use kinematics::{BobPositions, bob_positions, energy_scale, total_energy};
pub use params::PhysicalParameters;
pub use simulate::{Simulator, simulate};
pub use state::StateVector;
pub use trajectory::{SolverStats, Trajectory};
