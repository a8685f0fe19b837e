use std::{sync::Arc, thread, time::Duration};

use double_pendulum::prelude::*;

mod common;
use common::{released_at, unit};

#[test]
fn parallel_runs_match_sequential_runs() {
    let sim = Arc::new(Simulator::new(unit()));
    let starts = [(30.0, 60.0), (45.0, 90.0), (90.0, 90.0), (120.0, -30.0)];

    let handles: Vec<_> = starts
        .iter()
        .map(|&(a, b)| {
            let sim = Arc::clone(&sim);
            thread::spawn(move || sim.simulate(released_at(a, b), 2.0, 0.01))
        })
        .collect();

    for (handle, &(a, b)) in handles.into_iter().zip(&starts) {
        let parallel = handle.join().unwrap().unwrap();
        let sequential = sim.simulate(released_at(a, b), 2.0, 0.01).unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn cancellation_from_another_thread_stops_the_run() {
    let sim = Simulator::new(unit());
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        })
    };
    // Long enough that it cannot finish before the token fires.
    let result = sim.simulate_with_cancel(released_at(90.0, 90.0), 9_000.0, 0.01, &token);
    canceller.join().unwrap();

    match result {
        Err(Error::Cancelled { time }) => assert!((0.0..9_000.0).contains(&time)),
        other => panic!("expected cancellation, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn untouched_token_does_not_interfere() {
    let sim = Simulator::new(unit());
    let token = CancellationToken::new();
    let with = sim
        .simulate_with_cancel(released_at(45.0, 90.0), 1.0, 0.01, &token)
        .unwrap();
    let without = sim.simulate(released_at(45.0, 90.0), 1.0, 0.01).unwrap();
    assert_eq!(with, without);
}
