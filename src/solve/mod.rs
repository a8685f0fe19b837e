//! High-level solve module: SciPy-like API pieces split into submodules.

pub mod cancel;
pub mod options;
pub mod solout;
pub mod solution;
pub mod solve_ivp;

// Re-exports for ergonomic access via crate::solve::* and prelude
pub use cancel::CancellationToken;
pub use options::{IVPOptions, Method};
pub use solution::IVPSolution;
pub use solve_ivp::solve_ivp;
