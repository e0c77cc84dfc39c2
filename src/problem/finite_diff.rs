//! problem::finite_diff — boundary-aware finite-difference gradients.
//!
//! Purpose
//! -------
//! Approximate `∇f(x)` by central differences that never step outside the box
//! `[lower, upper]`. Used by [`BoundedProblem`](crate::problem::BoundedProblem)
//! when the objective has no analytic gradient, and usable on its own to
//! validate an analytic gradient.
//!
//! Key behaviors
//! -------------
//! - Per coordinate `i` the forward and backward steps are
//!   `h+ = min(h, upper[i] - x[i])` and `h- = min(h, x[i] - lower[i])`, and
//!   the estimate is `(f(x + h+ e_i) - f(x - h- e_i)) / (h+ + h-)`.
//! - A point sitting on its upper bound gets `h+ = 0` and degrades to a
//!   backward difference; symmetrically at the lower bound.
//! - Trial coordinates are clamped into `[lower[i], upper[i]]` and the step
//!   actually taken is used in the denominator, so round-off in `x[i] + h`
//!   can never produce an out-of-box evaluation.
//! - A fixed coordinate (`lower[i] == upper[i]`) has derivative `0.0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x`, `lower` and `upper` have equal length and `x` lies in the box; both
//!   are checked before the first evaluation.
//! - The objective is evaluated exactly `2` times per non-fixed coordinate,
//!   always at a point that differs from `x` in one coordinate only.
//!
//! Conventions
//! -----------
//! - [`try_numerical_gradient`] is the fallible entry point: evaluation
//!   errors abort the sweep and are propagated unchanged.
//! - [`numerical_gradient`] and [`numerical_gradient_unbounded`] take
//!   infallible closures and are the standalone utilities.
//!
//! Testing notes
//! -------------
//! - Unit tests cover interior accuracy, the one-sided fallback at both
//!   bounds, fixed coordinates, and validation before evaluation.
//! - Integration tests compare against analytic gradients of the benchmark
//!   functions at seeded random points and against `finitediff`.
use crate::{
    problem::{
        errors::ProblemResult,
        validation::{
            validate_bound_order, validate_grid_spacing, validate_point_len,
            validate_within_bounds,
        },
    },
    vector::VectorLike,
};

/// Default grid spacing `h` for finite differences.
pub const DEFAULT_GRID_SPACING: f64 = 1e-6;

/// try_numerical_gradient — bounded central differences with a fallible objective.
///
/// Parameters
/// ----------
/// - `f`: `FnMut(&V) -> ProblemResult<f64>`
///   Objective to differentiate. Errors stop the sweep.
/// - `x`: `&V`
///   Evaluation point, inside `[lower, upper]`.
/// - `lower`, `upper`: `&V`
///   Box bounds; entries may be infinite.
/// - `grid_spacing`: `f64`
///   Nominal step `h`, finite and `> 0`.
///
/// Returns
/// -------
/// `ProblemResult<V>`
///   Gradient estimate with `x.len()` coordinates.
///
/// Errors
/// ------
/// - `ProblemError::PointDimMismatch` if `lower` or `upper` differ in length
///   from `x`.
/// - `ProblemError::BoundOrderViolated` if `lower[i] > upper[i]`.
/// - `ProblemError::PointOutOfBounds` if `x` leaves the box (NaN included).
/// - `ProblemError::InvalidGridSpacing` for a non-finite or non-positive `h`.
/// - `ProblemError::FixedLengthMismatch` if `V` cannot hold `x.len()`.
/// - Any error returned by `f`.
///
/// Notes
/// -----
/// - All validation happens before the first call to `f`.
pub fn try_numerical_gradient<V, E>(
    mut f: E, x: &V, lower: &V, upper: &V, grid_spacing: f64,
) -> ProblemResult<V>
where
    V: VectorLike,
    E: FnMut(&V) -> ProblemResult<f64>,
{
    let n = x.len();
    validate_point_len(lower, n)?;
    validate_point_len(upper, n)?;
    validate_grid_spacing(grid_spacing)?;
    validate_bound_order(lower, upper)?;
    validate_within_bounds(x, lower, upper)?;

    let mut grad = V::with_len(n)?;
    let mut work = x.clone();
    for i in 0..n {
        let (xi, l, u) = (x.get(i), lower.get(i), upper.get(i));
        let h_up = grid_spacing.min(u - xi);
        let h_down = grid_spacing.min(xi - l);
        let up = (xi + h_up).min(u);
        let down = (xi - h_down).max(l);
        let span = up - down;
        if span <= 0.0 {
            grad.set(i, 0.0);
            continue;
        }

        work.set(i, up);
        let f_up = f(&work)?;
        work.set(i, down);
        let f_down = f(&work)?;
        work.set(i, xi);

        grad.set(i, (f_up - f_down) / span);
    }
    Ok(grad)
}

/// Bounded central-difference gradient of an infallible objective.
///
/// Same stepping rules and validation as [`try_numerical_gradient`].
pub fn numerical_gradient<V, E>(
    mut f: E, x: &V, lower: &V, upper: &V, grid_spacing: f64,
) -> ProblemResult<V>
where
    V: VectorLike,
    E: FnMut(&V) -> f64,
{
    try_numerical_gradient(|p: &V| Ok(f(p)), x, lower, upper, grid_spacing)
}

/// Central-difference gradient with infinite bounds on every coordinate.
pub fn numerical_gradient_unbounded<V, E>(f: E, x: &V, grid_spacing: f64) -> ProblemResult<V>
where
    V: VectorLike,
    E: FnMut(&V) -> f64,
{
    let lower = V::filled(x.len(), f64::NEG_INFINITY)?;
    let upper = V::filled(x.len(), f64::INFINITY)?;
    numerical_gradient(f, x, &lower, &upper, grid_spacing)
}
