use double_pendulum::{
    pendulum::SimulationConfig,
    service::{CompareResponse, Route, SimulateResponse, handle_json},
};
use serde_json::Value;

#[test]
fn simulate_route_returns_trajectory_and_diagnostics() {
    let body = r#"{"theta1": 45, "theta2": 90, "duration": 1.0, "dt": 0.02}"#;
    let reply = handle_json(Route::Simulate, body, &SimulationConfig::default());
    assert_eq!(reply.status, 200);

    let resp: SimulateResponse = serde_json::from_str(&reply.body).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.len(), 50);
    assert_eq!(resp.data.l2, 1.0);
    let diagnostics = resp.diagnostics.unwrap();
    assert!(diagnostics.energy_drift.relative < 1e-4);

    let raw: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(raw["data"]["L1"], 1.0);
    assert_eq!(raw["diagnostics"]["energy_quality"], "excellent");
}

#[test]
fn empty_body_uses_defaults() {
    let reply = handle_json(Route::Simulate, "", &SimulationConfig::default());
    assert_eq!(reply.status, 200);
    let resp: SimulateResponse = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(resp.data.len(), 1000);
}

#[test]
fn compare_route_reports_three_runs() {
    let body = r#"{"theta1": 45, "theta2": 90, "duration": 5.0, "perturbation": 0.01}"#;
    let reply = handle_json(Route::Compare, body, &SimulationConfig::default());
    assert_eq!(reply.status, 200);

    let resp: CompareResponse = serde_json::from_str(&reply.body).unwrap();
    assert!(resp.success);
    let deltas: Vec<f64> = resp.simulations.iter().map(|s| s.delta).collect();
    assert_eq!(deltas, vec![0.0, 0.01, -0.01]);
    assert!(resp.simulations[0].divergence.is_none());
    for run in &resp.simulations[1..] {
        assert!(run.divergence.unwrap() > 0.0);
        assert!(run.amplification.unwrap() > 0.0);
        assert_eq!(run.data.len(), 500);
    }
    assert_ne!(resp.simulations[1].data.theta1[0], resp.simulations[0].data.theta1[0]);
}

#[test]
fn invalid_parameters_are_client_errors() {
    let reply = handle_json(
        Route::Simulate,
        r#"{"L1": 0, "duration": 1.0}"#,
        &SimulationConfig::default(),
    );
    assert_eq!(reply.status, 400);
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("L1"));

    let reply = handle_json(
        Route::Compare,
        r#"{"dt": 0, "duration": 1.0}"#,
        &SimulationConfig::default(),
    );
    assert_eq!(reply.status, 400);

    let reply = handle_json(
        Route::Simulate,
        r#"{"duration": 1e9, "dt": 1e-3}"#,
        &SimulationConfig::default(),
    );
    assert_eq!(reply.status, 400);
}
