//! # Example: Double pendulum
//!
//! Release both rods from rest (45 deg and 90 deg from the downward
//! vertical) and print the sampled motion with the energy diagnostics.
//!
//! Run with `RUST_LOG=double_pendulum=debug` to see the solver statistics.

use double_pendulum::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let params = PhysicalParameters::unit();
    let initial = StateVector::from_degrees(45.0, 0.0, 90.0, 0.0);

    match simulate(&params, initial, 2.0, 0.01) {
        Ok(traj) => {
            println!("Samples: {}", traj.len());
            println!(
                "Solver: {} evaluations, {} accepted / {} rejected steps",
                traj.stats.nfev, traj.stats.naccpt, traj.stats.nrejct
            );
            for i in (0..traj.len()).step_by(20) {
                println!(
                    "t = {:>5.2}  theta1 = {:>8.4}  theta2 = {:>8.4}  bob2 = ({:>7.4}, {:>7.4})  E = {:.8}",
                    traj.time[i], traj.theta1[i], traj.theta2[i], traj.x2[i], traj.y2[i], traj.energy[i]
                );
            }
            if let Some(drift) = traj.energy_drift() {
                println!(
                    "Energy drift: {:.3e} ({:?})",
                    drift.relative,
                    drift.grade(&EnergyThresholds::default())
                );
            }
        }
        Err(e) => eprintln!("simulation failed: {e}"),
    }
}
