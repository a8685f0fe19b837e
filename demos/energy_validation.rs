//! # Example: Energy conservation across methods and tolerances
//!
//! The double pendulum is conservative, so the drift of total energy over a
//! run is a direct measure of integration error.

use double_pendulum::prelude::*;

fn main() {
    let params = PhysicalParameters::unit();
    let initial = StateVector::from_degrees(90.0, 0.0, 90.0, 0.0);
    let thresholds = EnergyThresholds::default();

    let configs = [
        ("DOPRI5 tol 1e-6", SimulationConfig::builder().rtol(1e-6).atol(1e-6).build()),
        ("DOPRI5 default", SimulationConfig::default()),
        ("DOPRI5 tol 1e-11", SimulationConfig::builder().rtol(1e-11).atol(1e-11).build()),
        (
            "RK4 h = 0.01",
            SimulationConfig::builder().method(Method::RK4).build(),
        ),
        (
            "RK4 h = 0.001",
            SimulationConfig::builder()
                .method(Method::RK4)
                .rk4_step(0.001)
                .build(),
        ),
    ];

    println!("{:<18} {:>12} {:>10} {:>10}", "config", "rel. drift", "quality", "nfev");
    for (label, config) in configs {
        let sim = Simulator::with_config(params, config);
        match sim.simulate(initial, 10.0, 0.01) {
            Ok(traj) => {
                let Some(drift) = traj.energy_drift() else { continue };
                println!(
                    "{:<18} {:>12.3e} {:>10} {:>10}",
                    label,
                    drift.relative,
                    format!("{:?}", drift.grade(&thresholds)),
                    traj.stats.nfev
                );
            }
            Err(e) => println!("{label:<18} failed: {e}"),
        }
    }
}
