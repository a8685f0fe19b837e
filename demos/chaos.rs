//! # Example: Sensitivity to initial conditions
//!
//! Integrate three pendulums whose first rods start 0.001 deg apart (second
//! rod raised to 135 deg, well inside the chaotic regime) and
//! track how far the second bobs drift from the reference run.

use double_pendulum::prelude::*;

fn main() {
    let sim = Simulator::new(PhysicalParameters::unit());
    let delta: f64 = 0.001;
    let runs: Vec<Trajectory> = [0.0, delta, -delta]
        .iter()
        .map(|d| {
            sim.simulate(StateVector::from_degrees(45.0 + d, 0.0, 135.0, 0.0), 20.0, 0.01)
                .expect("simulation failed")
        })
        .collect();

    let reference = &runs[0];
    for step in (0..reference.len()).step_by(200) {
        let sep: Vec<String> = runs[1..]
            .iter()
            .map(|r| {
                let d = (r.x2[step] - reference.x2[step]).hypot(r.y2[step] - reference.y2[step]);
                format!("{d:.3e}")
            })
            .collect();
        println!("t = {:>5.1}  separation = {}", reference.time[step], sep.join("  "));
    }

    for run in &runs[1..] {
        if let Some(d) = divergence(reference, run) {
            println!(
                "final divergence {d:.4} m, {:.1}x the initial arc",
                d / (reference.l1 * delta.to_radians())
            );
        }
    }
}
