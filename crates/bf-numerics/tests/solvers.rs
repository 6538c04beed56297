//! Solver behaviour across the registry: convergence, exhaustion reporting and
//! repeatability.

use bf_core::Dictionary;
use bf_numerics::{
    FnEquation, GoldenRatio, MinimizationScheme, NewtonRaphson, RootSolver, SolverControls,
    new_minimization_scheme, new_root_solver,
};
use proptest::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured.text())
}

#[test]
fn golden_ratio_finds_known_minimum() {
    let dict = Dictionary::from_yaml_str("solver: goldenRatio\ntolerance: 1.0e-6\n").unwrap();
    let scheme = new_minimization_scheme(&dict).unwrap();

    // Minimum at x = e on [0, 10]
    let eqn = FnEquation::new(|x: f64| (x - std::f64::consts::E).powi(2) - 4.0);
    let sol = scheme.solve(&eqn, 0.0, 0.0, 10.0);

    assert!(sol.converged);
    assert!((sol.value - std::f64::consts::E).abs() < 1e-6);
    assert!(sol.error < 1e-6);
}

#[test]
fn single_step_reports_non_convergence() {
    let solver = NewtonRaphson::new(SolverControls::new(1e-14, 1), 1.0);
    let eqn = FnEquation::new(|x: f64| x * x - 2.0).with_derivative(|x: f64| 2.0 * x);

    let (sol, logs) = with_captured_logs(|| solver.solve(&eqn, 1.0, 0.0, 10.0));

    assert!(!sol.converged);
    assert_eq!(sol.iterations, 1);
    assert_eq!(sol.value, 1.5);
    assert!(logs.contains("did not converge"), "logs: {logs}");
    assert!(logs.contains("NewtonRaphson"), "logs: {logs}");
}

#[test]
fn golden_ratio_single_step_is_exhausted() {
    let scheme = GoldenRatio::new(SolverControls::new(1e-12, 1));
    let eqn = FnEquation::new(|x: f64| (x - 3.0).powi(2));
    let (sol, logs) = with_captured_logs(|| scheme.solve(&eqn, 0.0, 0.0, 10.0));

    assert!(!sol.converged);
    assert_eq!(sol.iterations, 1);
    assert!(logs.contains("goldenRatio"));
}

#[test]
fn every_root_solver_finds_cube_root() {
    for name in ["NewtonRaphson", "bisection", "secant", "step"] {
        let dict = Dictionary::new()
            .with("solver", name)
            .with("tolerance", 1e-10)
            .with("maxSteps", 500.0)
            .with("dx", 0.5);
        let solver = new_root_solver(&dict).unwrap();
        let eqn = FnEquation::new(|x: f64| x * x * x - 27.0);
        let sol = solver.solve(&eqn, 1.0, 0.0, 10.0);
        assert!(sol.converged, "{name} did not converge: {sol:?}");
        assert!((sol.value - 3.0).abs() < 1e-8, "{name}: {}", sol.value);
    }
}

#[test]
fn solver_is_shareable_across_threads() {
    let solver: Box<dyn RootSolver> = Box::new(NewtonRaphson::default());
    let results: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = (1..=4)
            .map(|k| {
                let solver = &solver;
                s.spawn(move || {
                    let target = k as f64;
                    let eqn = FnEquation::new(move |x: f64| x * x - target);
                    solver.solve(&eqn, 1.0, 0.0, 10.0).value
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (k, v) in (1..=4).zip(results) {
        assert!((v - (k as f64).sqrt()).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn repeated_solves_are_bit_identical(target in 0.5f64..100.0, guess in 0.1f64..20.0) {
        let solver = NewtonRaphson::default();
        let eqn = FnEquation::new(move |x: f64| x * x - target);
        let a = solver.solve(&eqn, guess, 0.0, 50.0);
        let b = solver.solve(&eqn, guess, 0.0, 50.0);
        prop_assert_eq!(a.value.to_bits(), b.value.to_bits());
        prop_assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn golden_ratio_within_tolerance(center in 0.5f64..9.5) {
        let scheme = GoldenRatio::new(SolverControls::new(1e-6, 200));
        let eqn = FnEquation::new(move |x: f64| (x - center).powi(2));
        let sol = scheme.solve(&eqn, 0.0, 0.0, 10.0);
        prop_assert!(sol.converged);
        prop_assert!((sol.value - center).abs() < 1e-6);
    }
}
