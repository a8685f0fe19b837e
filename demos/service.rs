//! # Example: JSON request handling
//!
//! Feed JSON bodies through the service layer the way an HTTP handler
//! would, printing the status code and a summary of each reply.

use double_pendulum::{
    pendulum::SimulationConfig,
    service::{Route, handle_json},
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig::default();
    let requests = [
        (Route::Simulate, r#"{"theta1": 45, "theta2": 90, "duration": 2, "dt": 0.01}"#),
        (Route::Compare, r#"{"theta1": 120, "theta2": -10, "duration": 5, "perturbation": 0.01}"#),
        (Route::Simulate, r#"{"L1": 0}"#),
        (Route::Simulate, r#"{"duration": "#),
    ];

    for (route, body) in requests {
        let reply = handle_json(route, body, &config);
        let summary = match serde_json::from_str::<serde_json::Value>(&reply.body) {
            Ok(v) if reply.status == 200 => match route {
                Route::Simulate => format!(
                    "{} samples, energy quality {}",
                    v["data"]["time"].as_array().map_or(0, Vec::len),
                    v["diagnostics"]["energy_quality"]
                ),
                Route::Compare => v["simulations"]
                    .as_array()
                    .into_iter()
                    .flatten()
                    .map(|s| format!("delta {} -> divergence {}", s["delta"], s["divergence"]))
                    .collect::<Vec<_>>()
                    .join("; "),
            },
            Ok(v) => v["error"].to_string(),
            Err(e) => format!("unreadable reply: {e}"),
        };
        println!("{route:?} -> {}: {summary}", reply.status);
    }
}
