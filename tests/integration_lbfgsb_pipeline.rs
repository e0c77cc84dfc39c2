//! Integration tests for bound-constrained L-BFGS minimization.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from a `BoundedProblem` over a
//!   caller-chosen vector type, through bound encoding and the
//!   reverse-communication kernel, to the final iterate written back into
//!   the caller's container.
//! - Exercise the classic benchmark functions from fixed and seeded random
//!   starting points, with analytic gradients and with the finite-difference
//!   fallback.
//!
//! Coverage
//! --------
//! - `optimization::solver::LbfgsbSolver`:
//!   - `solve` and `solve_with_report` on Rosenbrock, Booth, Matyas, Beale
//!     and Goldstein-Price.
//!   - Many bounds becoming active in the same iteration.
//!   - Stopping at `max_iterations` without an error.
//!   - Rejected configuration leaving the driver usable.
//! - `problem::BoundedProblem`:
//!   - Bound updates between solves and rejected updates.
//!   - Evaluation strictly inside the box, including from infeasible starts.
//! - `vector`:
//!   - `Vec<f64>`, `[f64; N]`, `ndarray::Array1<f64>`,
//!     `nalgebra::DVector<f64>` through the same solve.
//!
//! Exclusions
//! ----------
//! - Kernel input codes, line-search bracketing and ring-buffer behavior;
//!   these are covered by unit tests next to the kernel.
//! - Finite-difference accuracy; see `integration_numerical_gradient.rs`.
mod common;

use std::cell::Cell;

use common::{
    max_abs_diff, sample_in_box, seeded_rng, tight_solver, Beale, Benchmark, Booth, GoldsteinPrice,
    Matyas, Rosenbrock, ValueOnly, WeightedQuadratic, BEALE, BOOTH, GOLDSTEIN_PRICE, MATYAS,
    ROSENBROCK,
};
use nalgebra::DVector;
use ndarray::{array, Array1};
use rust_lbfgsb::prelude::*;

/// Purpose
/// -------
/// Minimize one benchmark on its own box from `start` and return the final
/// iterate.
///
/// Invariants
/// ----------
/// - Panics if the problem cannot be built or the solve fails; both are
///   test failures here, not behaviors under test.
fn solve_benchmark<F: Objective<Vec<f64>>>(
    bench: Benchmark, objective: F, start: &[f64], solver: &mut LbfgsbSolver,
) -> Vec<f64> {
    let problem =
        BoundedProblem::with_bounds(2, bench.lower.to_vec(), bench.upper.to_vec(), objective)
            .expect("benchmark boxes are valid");
    let mut x = start.to_vec();
    solver.solve(&problem, &mut x).unwrap_or_else(|e| panic!("{}: solve failed: {e}", bench.name));
    x
}

/// Purpose
/// -------
/// Run `starts` seeded random starting points for one benchmark, once with
/// the analytic gradient and once with finite differences, and assert every
/// run lands on the known minimizer within `tol`.
fn sweep<F: Objective<Vec<f64>> + Clone>(
    bench: Benchmark, objective: F, seed: u64, starts: usize, tol: f64,
) {
    let mut rng = seeded_rng(seed);
    let mut solver = tight_solver();
    for _ in 0..starts {
        let start = sample_in_box(&mut rng, &bench.lower, &bench.upper);

        let analytic = solve_benchmark(bench, objective.clone(), &start, &mut solver);
        let numeric = solve_benchmark(bench, ValueOnly(objective.clone()), &start, &mut solver);

        for (label, x) in [("analytic", &analytic), ("numeric", &numeric)] {
            assert!(
                max_abs_diff(x, &bench.minimizer) < tol,
                "{} ({label}) from {start:?} ended at {x:?}",
                bench.name
            );
        }
    }
}

#[test]
// Purpose
// -------
// Ensure the default driver solves the reference benchmark problems from
// their reference starting points.
//
// Given
// -----
// - Box `[-10, 10]²` and default settings.
// - Rosenbrock from `(-1, 2)`, Booth from `(8, 9.7)`, Matyas from
//   `(8, -9.7)`.
//
// Expect
// ------
// - Final iterates within `1e-5` of `(1, 1)`, `(1, 3)` and `(0, 0)` for both
//   the analytic gradient and the finite-difference fallback.
fn default_driver_solves_reference_benchmarks() {
    fn check<F: Objective<Vec<f64>> + Clone>(bench: Benchmark, objective: F, start: [f64; 2]) {
        let mut solver = LbfgsbSolver::new();
        let analytic = solve_benchmark(bench, objective.clone(), &start, &mut solver);
        let numeric = solve_benchmark(bench, ValueOnly(objective), &start, &mut solver);

        assert!(max_abs_diff(&analytic, &bench.minimizer) < 1e-5, "{}: {analytic:?}", bench.name);
        assert!(max_abs_diff(&numeric, &bench.minimizer) < 1e-5, "{}: {numeric:?}", bench.name);
    }

    check(ROSENBROCK, Rosenbrock, [-1.0, 2.0]);
    check(BOOTH, Booth, [8.0, 9.7]);
    check(MATYAS, Matyas, [8.0, -9.7]);
}

#[test]
// Purpose
// -------
// Check convergence from many seeded random starts on every benchmark.
//
// Given
// -----
// - Ten uniform starting points per benchmark, drawn from its box with a
//   fixed ChaCha seed.
// - Tight settings: `precision_factor = 10`, `projected_gradient_tolerance
//   = 0`, `max_iterations = 1000`.
//
// Expect
// ------
// - Every run, analytic or finite-difference, ends within `1e-3` of the
//   known minimizer.
fn benchmarks_converge_from_seeded_starts() {
    sweep(ROSENBROCK, Rosenbrock, 11, 10, 1e-3);
    sweep(BOOTH, Booth, 12, 10, 1e-3);
    sweep(MATYAS, Matyas, 13, 10, 1e-3);
    sweep(BEALE, Beale, 14, 10, 1e-3);
    sweep(GOLDSTEIN_PRICE, GoldsteinPrice, 15, 10, 1e-3);
}

#[test]
// Purpose
// -------
// Verify the same problem solves identically through every supported
// vector type.
//
// Given
// -----
// - `f(x) = Σ (i + 1) (x_i - c_i)²` with `c = (0.5, -2, 3, 1.5)`.
// - Unbounded, then boxed in `[-1, 1]⁴`, starting at the origin.
//
// Expect
// ------
// - Unbounded: `x ≈ c`.
// - Boxed: `x ≈ (0.5, -1, 1, 1)`, the projection of `c` onto the box.
// - Same answer for `Vec`, `[f64; 4]`, `Array1` and `DVector` within `1e-6`.
fn quadratic_solves_for_every_vector_type() {
    let center = vec![0.5, -2.0, 3.0, 1.5];
    let projected = [0.5, -1.0, 1.0, 1.0];
    let objective = WeightedQuadratic { center: center.clone() };
    let mut solver = LbfgsbSolver::new();

    // Vec<f64>
    let mut problem = BoundedProblem::<Vec<f64>, _>::new(4, objective.clone()).unwrap();
    let mut x = vec![0.0; 4];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &center) < 1e-6, "Vec unbounded: {x:?}");
    problem.set_bounds(vec![-1.0; 4], vec![1.0; 4]).unwrap();
    let mut x = vec![0.0; 4];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &projected) < 1e-6, "Vec boxed: {x:?}");

    // [f64; 4]
    let mut problem = BoundedProblem::<[f64; 4], _>::new(4, objective.clone()).unwrap();
    let mut x = [0.0; 4];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &center) < 1e-6, "array unbounded: {x:?}");
    problem.set_bounds([-1.0; 4], [1.0; 4]).unwrap();
    let mut x = [0.0; 4];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &projected) < 1e-6, "array boxed: {x:?}");

    // ndarray::Array1<f64>
    let mut problem = BoundedProblem::<Array1<f64>, _>::new(4, objective.clone()).unwrap();
    let mut x = Array1::zeros(4);
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(x.as_slice().unwrap(), &center) < 1e-6, "Array1 unbounded: {x:?}");
    problem.set_bounds(Array1::from_elem(4, -1.0), Array1::from_elem(4, 1.0)).unwrap();
    let mut x = Array1::zeros(4);
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(x.as_slice().unwrap(), &projected) < 1e-6, "Array1 boxed: {x:?}");

    // nalgebra::DVector<f64>
    let mut problem = BoundedProblem::<DVector<f64>, _>::new(4, objective).unwrap();
    let mut x = DVector::zeros(4);
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(x.as_slice(), &center) < 1e-6, "DVector unbounded: {x:?}");
    problem.set_bounds(DVector::from_element(4, -1.0), DVector::from_element(4, 1.0)).unwrap();
    let mut x = DVector::zeros(4);
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(x.as_slice(), &projected) < 1e-6, "DVector boxed: {x:?}");
}

#[test]
// Purpose
// -------
// Ensure large active sets are found in a handful of iterations rather than
// one bound per iteration.
//
// Given
// -----
// - `f(x) = Σ (i + 1) (x_i - c_i)²` with `n = 1000` and default settings.
// - Corner case: `c_i = 5 + i` on `[0, 1]ⁿ`, start `x_i = 0.5 i / n`.
// - Alternating case: `c_i = ±(5 + i)` on `[-1, 1]ⁿ`, start at the origin.
//
// Expect
// ------
// - Both solves converge (not `MaxIterations`) within ten iterations.
// - The iterate is the projection of `c` onto the box within `1e-6`.
fn large_active_sets_converge_in_few_iterations() {
    let n = 1000;
    let corner = (
        (0..n).map(|i| 5.0 + i as f64).collect::<Vec<_>>(),
        (0.0, 1.0),
        (0..n).map(|i| 0.5 * i as f64 / n as f64).collect::<Vec<_>>(),
    );
    let alternating = (
        (0..n).map(|i| (5.0 + i as f64) * if i % 2 == 0 { 1.0 } else { -1.0 }).collect::<Vec<_>>(),
        (-1.0, 1.0),
        vec![0.0; n],
    );
    let mut solver = LbfgsbSolver::new();

    for (center, (lo, hi), start) in [corner, alternating] {
        let projected: Vec<f64> = center.iter().map(|c| c.clamp(lo, hi)).collect();
        let problem =
            BoundedProblem::with_bounds(n, vec![lo; n], vec![hi; n], WeightedQuadratic { center })
                .unwrap();
        let mut x = start;

        let report = solver.solve_with_report(&problem, &mut x).unwrap();

        assert!(report.converged(), "{report:?}");
        assert!(report.iterations <= 10, "{report:?}");
        assert!(max_abs_diff(&x, &projected) < 1e-6, "box [{lo}, {hi}]: {report:?}");
    }
}

#[test]
// Purpose
// -------
// Ensure an infeasible starting point is projected and the objective is
// never evaluated outside the box.
//
// Given
// -----
// - Rosenbrock on `[-2, 2]²` wrapped in a closure that counts evaluations
//   outside the box.
// - Start at `(20, -30)`.
//
// Expect
// ------
// - Zero out-of-box evaluations and a final iterate near `(1, 1)`.
fn evaluations_stay_inside_the_box() {
    let outside = Cell::new(0_usize);
    let evaluations = Cell::new(0_usize);
    let counted = |x: &Vec<f64>| {
        evaluations.set(evaluations.get() + 1);
        if x.iter().any(|v| !(-2.0..=2.0).contains(v)) {
            outside.set(outside.get() + 1);
        }
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
    };
    let problem = BoundedProblem::with_bounds(2, vec![-2.0; 2], vec![2.0; 2], counted).unwrap();
    let mut x = vec![20.0, -30.0];

    LbfgsbSolver::new().solve(&problem, &mut x).unwrap();

    assert_eq!(outside.get(), 0);
    assert!(evaluations.get() > 0);
    assert!(max_abs_diff(&x, &[1.0, 1.0]) < 1e-4, "x = {x:?}");
}

#[test]
// Purpose
// -------
// Verify bound updates take effect on the next solve and rejected updates
// change nothing.
//
// Given
// -----
// - Rosenbrock on `[-10, 10]²`, solved from `(-1, 2)`.
// - Upper bound of the first coordinate lowered to `0.5`.
// - A crossed update `lower = (1, 1)`, `upper = (0, 0)`.
//
// Expect
// ------
// - First solve near `(1, 1)`; second solve at the boundary minimizer
//   `(0.5, 0.25)`.
// - The crossed update fails with `BoundOrderViolated` and the bounds keep
//   their previous values.
fn bound_updates_apply_to_the_next_solve() {
    let mut problem =
        BoundedProblem::with_bounds(2, vec![-10.0; 2], vec![10.0; 2], Rosenbrock).unwrap();
    let mut solver = LbfgsbSolver::new();

    let mut x = vec![-1.0, 2.0];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &[1.0, 1.0]) < 1e-5, "x = {x:?}");

    problem.set_upper_bound(vec![0.5, 10.0]).unwrap();
    let mut x = vec![-1.0, 2.0];
    solver.solve(&problem, &mut x).unwrap();
    assert!(max_abs_diff(&x, &[0.5, 0.25]) < 1e-6, "x = {x:?}");

    let err = problem.set_bounds(vec![1.0; 2], vec![0.0; 2]).unwrap_err();
    assert!(matches!(err, ProblemError::BoundOrderViolated { .. }), "{err:?}");
    assert_eq!(problem.lower_bound(), &vec![-10.0; 2]);
    assert_eq!(problem.upper_bound(), &vec![0.5, 10.0]);
}

#[test]
// Purpose
// -------
// Ensure hitting the iteration cap is reported but not raised.
//
// Given
// -----
// - Rosenbrock from `(-1, 2)` with `max_iterations = 1`.
//
// Expect
// ------
// - `solve` returns `Ok(())` and moves `x` off the start.
// - `solve_with_report` reports `Termination::MaxIterations` after exactly
//   one iteration.
fn iteration_cap_is_reported_not_raised() {
    let problem =
        BoundedProblem::with_bounds(2, vec![-10.0; 2], vec![10.0; 2], Rosenbrock).unwrap();
    let mut solver = LbfgsbSolver::with_settings(5, 1, 1e7, 1e-15).unwrap();

    let mut x = vec![-1.0, 2.0];
    solver.solve(&problem, &mut x).unwrap();
    assert_ne!(x, vec![-1.0, 2.0]);

    let mut x = vec![-1.0, 2.0];
    let report = solver.solve_with_report(&problem, &mut x).unwrap();
    assert_eq!(report.termination, Termination::MaxIterations);
    assert_eq!(report.iterations, 1);
    assert!(!report.converged());
    assert!(report.value < 104.0);
}

#[test]
// Purpose
// -------
// Verify rejected configuration leaves the driver usable with its previous
// settings.
//
// Given
// -----
// - A driver with `history_size = 7`.
// - Rejected updates: `history_size = 1`, `precision_factor = NaN`,
//   `projected_gradient_tolerance = -1`, `max_iterations = 0`.
//
// Expect
// ------
// - Each update fails with a `Configuration` error and the settings are
//   unchanged.
// - The driver still solves Booth afterwards.
fn rejected_configuration_keeps_driver_usable() {
    let mut solver = LbfgsbSolver::with_history_size(7).unwrap();

    let errors = [
        solver.set_history_size(1).unwrap_err(),
        solver.set_precision_factor(f64::NAN).unwrap_err(),
        solver.set_projected_gradient_tolerance(-1.0).unwrap_err(),
        solver.set_max_iterations(0).unwrap_err(),
    ];
    for err in &errors {
        assert_eq!(err.kind(), ErrorKind::Configuration, "{err}");
    }
    assert_eq!(solver.history_size(), 7);
    assert_eq!(solver.precision_factor(), 1e7);
    assert_eq!(solver.projected_gradient_tolerance(), 1e-15);
    assert_eq!(solver.max_iterations(), 500);

    let x = solve_benchmark(BOOTH, Booth, &[8.0, 9.7], &mut solver);
    assert!(max_abs_diff(&x, &BOOTH.minimizer) < 1e-5, "x = {x:?}");
}

#[test]
// Purpose
// -------
// Check that the report agrees with the final iterate and that verbosity
// does not change the numerics.
//
// Given
// -----
// - Booth on `[2, 10] × [-10, 10]` from `(8, 9.7)`, solved silently and with
//   `verbosity = 1`.
//
// Expect
// ------
// - Both runs end at the boundary minimizer `(2, 2.2)` with the same
//   iterate and report.
// - `report.value` equals the objective at the final iterate.
fn report_matches_final_iterate_at_any_verbosity() {
    let problem =
        BoundedProblem::with_bounds(2, array![2.0, -10.0], array![10.0, 10.0], Booth).unwrap();
    let mut quiet = LbfgsbSolver::new();
    let mut chatty = LbfgsbSolver::new();
    chatty.set_verbosity(1);

    let mut x_quiet = array![8.0, 9.7];
    let mut x_chatty = array![8.0, 9.7];
    let report_quiet = quiet.solve_with_report(&problem, &mut x_quiet).unwrap();
    let report_chatty = chatty.solve_with_report(&problem, &mut x_chatty).unwrap();

    assert!(max_abs_diff(x_quiet.as_slice().unwrap(), &[2.0, 2.2]) < 1e-6, "x = {x_quiet}");
    assert_eq!(x_quiet, x_chatty);
    assert_eq!(report_quiet, report_chatty);
    assert!(report_quiet.converged());
    assert_eq!(report_quiet.value, problem.value(&x_quiet).unwrap());
}
