//! problem::bounded — an objective together with its dimension and box.
//!
//! Purpose
//! -------
//! Bundle a user [`Objective`] with a fixed dimension and per-coordinate
//! bounds, and guard every access to it with the length and ordering checks
//! the driver relies on.
//!
//! Key behaviors
//! -------------
//! - Bounds default to `(-∞, +∞)` on every coordinate.
//! - Bounds can be replaced wholesale between solves through validated
//!   setters; a rejected update leaves both stored bounds untouched.
//! - [`BoundedProblem::gradient`] prefers the analytic gradient and falls back
//!   to boundary-aware finite differences at the stored bounds when the
//!   objective reports [`ProblemError::GradientNotImplemented`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower.len() == upper.len() == dimension` and `lower[i] <= upper[i]`
//!   for every `i`, at all times.
//! - `dimension > 0` and never changes after construction.
//!
//! Downstream usage
//! ----------------
//! - The driver borrows a `BoundedProblem` immutably for the duration of a
//!   solve and calls `value`/`gradient` on every evaluation request.
use crate::{
    problem::{
        errors::{BoundSide, ProblemError, ProblemResult},
        finite_diff::{try_numerical_gradient, DEFAULT_GRID_SPACING},
        traits::Objective,
        validation::{
            validate_bound, validate_bound_order, validate_dimension, validate_grad_len,
            validate_point_len,
        },
    },
    vector::VectorLike,
};

/// Objective with a fixed dimension and box constraints.
///
/// Fields:
/// - `dimension`: number of coordinates, `> 0`.
/// - `lower`, `upper`: bound vectors of length `dimension`.
/// - `objective`: the user function.
#[derive(Debug, Clone)]
pub struct BoundedProblem<V: VectorLike, F: Objective<V>> {
    dimension: usize,
    lower: V,
    upper: V,
    objective: F,
}

impl<V: VectorLike, F: Objective<V>> BoundedProblem<V, F> {
    /// Construct an unbounded problem of the given dimension.
    ///
    /// # Errors
    /// - [`ProblemError::InvalidDimension`] if `dimension == 0`.
    /// - [`ProblemError::FixedLengthMismatch`] if `V` is a fixed-size container
    ///   whose length differs from `dimension`.
    pub fn new(dimension: usize, objective: F) -> ProblemResult<Self> {
        validate_dimension(dimension)?;
        let lower = V::filled(dimension, f64::NEG_INFINITY)?;
        let upper = V::filled(dimension, f64::INFINITY)?;
        Ok(Self { dimension, lower, upper, objective })
    }

    /// Construct a problem with explicit bounds.
    ///
    /// # Errors
    /// - Everything [`BoundedProblem::new`] reports.
    /// - [`ProblemError::BoundLengthMismatch`], [`ProblemError::NaNBound`] or
    ///   [`ProblemError::BoundOrderViolated`] for malformed bounds.
    pub fn with_bounds(dimension: usize, lower: V, upper: V, objective: F) -> ProblemResult<Self> {
        let mut problem = Self::new(dimension, objective)?;
        problem.set_bounds(lower, upper)?;
        Ok(problem)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn lower_bound(&self) -> &V {
        &self.lower
    }

    pub fn upper_bound(&self) -> &V {
        &self.upper
    }

    pub fn objective(&self) -> &F {
        &self.objective
    }

    /// Replace the lower bound, checked against the stored upper bound.
    ///
    /// # Errors
    /// Returns a validation error and keeps the previous bound when `lower`
    /// has the wrong length, contains NaN, or exceeds the upper bound.
    pub fn set_lower_bound(&mut self, lower: V) -> ProblemResult<()> {
        validate_bound(&lower, BoundSide::Lower, self.dimension)?;
        validate_bound_order(&lower, &self.upper)?;
        self.lower = lower;
        Ok(())
    }

    /// Replace the upper bound, checked against the stored lower bound.
    ///
    /// # Errors
    /// Returns a validation error and keeps the previous bound when `upper`
    /// has the wrong length, contains NaN, or falls below the lower bound.
    pub fn set_upper_bound(&mut self, upper: V) -> ProblemResult<()> {
        validate_bound(&upper, BoundSide::Upper, self.dimension)?;
        validate_bound_order(&self.lower, &upper)?;
        self.upper = upper;
        Ok(())
    }

    /// Replace both bounds at once, validated against each other.
    ///
    /// Useful when moving the box so far that either one-sided update would be
    /// rejected against the other stored bound.
    ///
    /// # Errors
    /// Same as the single-sided setters; nothing is committed on failure.
    pub fn set_bounds(&mut self, lower: V, upper: V) -> ProblemResult<()> {
        validate_bound(&lower, BoundSide::Lower, self.dimension)?;
        validate_bound(&upper, BoundSide::Upper, self.dimension)?;
        validate_bound_order(&lower, &upper)?;
        self.lower = lower;
        self.upper = upper;
        Ok(())
    }

    /// Evaluate the objective at `x`.
    ///
    /// # Errors
    /// - [`ProblemError::PointDimMismatch`] if `x.len() != dimension`.
    /// - Any error the objective reports.
    pub fn value(&self, x: &V) -> ProblemResult<f64> {
        validate_point_len(x, self.dimension)?;
        self.objective.value(x)
    }

    /// Gradient at `x`: analytic if the objective provides one, otherwise
    /// bounded central differences with [`DEFAULT_GRID_SPACING`].
    ///
    /// # Errors
    /// - [`ProblemError::PointDimMismatch`] if `x.len() != dimension`.
    /// - [`ProblemError::GradientDimMismatch`] if the analytic gradient has the
    ///   wrong length.
    /// - [`ProblemError::PointOutOfBounds`] if the finite-difference fallback
    ///   runs at a point outside the box.
    /// - Any error the objective reports.
    pub fn gradient(&self, x: &V) -> ProblemResult<V> {
        validate_point_len(x, self.dimension)?;
        let grad = match self.objective.gradient(x) {
            Err(ProblemError::GradientNotImplemented) => self.numerical_gradient(x)?,
            other => other?,
        };
        validate_grad_len(&grad, self.dimension)?;
        Ok(grad)
    }

    /// Bounded central-difference gradient at `x` using the stored bounds,
    /// regardless of whether an analytic gradient exists.
    pub fn numerical_gradient(&self, x: &V) -> ProblemResult<V> {
        validate_point_len(x, self.dimension)?;
        try_numerical_gradient(
            |p: &V| self.objective.value(p),
            x,
            &self.lower,
            &self.upper,
            DEFAULT_GRID_SPACING,
        )
    }
}
