//! Validation helpers for bounded problems.
//!
//! This module centralizes the consistency checks shared by
//! [`BoundedProblem`](crate::problem::BoundedProblem) and the numerical
//! gradient:
//!
//! - **Dimensions**: [`validate_dimension`], [`validate_point_len`],
//!   [`validate_grad_len`].
//! - **Bounds**: [`validate_bound`] (length and NaN check for one side) and
//!   [`validate_bound_order`] (`lower[i] <= upper[i]` for every `i`).
//! - **Points**: [`validate_within_bounds`] rejects coordinates outside the
//!   box, NaN included.
//! - **Grid spacing**: [`validate_grid_spacing`].
//!
//! Every helper reports the first offending entry only.
use crate::{
    problem::errors::{BoundSide, ProblemError, ProblemResult},
    vector::VectorLike,
};

/// Reject a zero problem dimension.
///
/// # Errors
/// Returns [`ProblemError::InvalidDimension`] when `dimension == 0`.
pub fn validate_dimension(dimension: usize) -> ProblemResult<()> {
    if dimension == 0 {
        return Err(ProblemError::InvalidDimension {
            dimension,
            reason: "Problem dimension must be greater than zero.",
        });
    }
    Ok(())
}

/// Check that a point has `dim` coordinates.
///
/// # Errors
/// Returns [`ProblemError::PointDimMismatch`] on a length mismatch.
pub fn validate_point_len<V: VectorLike>(x: &V, dim: usize) -> ProblemResult<()> {
    if x.len() != dim {
        return Err(ProblemError::PointDimMismatch { expected: dim, found: x.len() });
    }
    Ok(())
}

/// Check that a gradient has `dim` coordinates.
///
/// # Errors
/// Returns [`ProblemError::GradientDimMismatch`] on a length mismatch.
pub fn validate_grad_len<V: VectorLike>(grad: &V, dim: usize) -> ProblemResult<()> {
    if grad.len() != dim {
        return Err(ProblemError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    Ok(())
}

/// Validate one bound vector against the problem dimension.
///
/// Checks:
/// - `bound.len() == dim`
/// - no entry is NaN (±∞ are valid and mean "unbounded")
///
/// # Errors
/// - [`ProblemError::BoundLengthMismatch`] if the length does not match.
/// - [`ProblemError::NaNBound`] with the index of the first NaN entry.
pub fn validate_bound<V: VectorLike>(bound: &V, side: BoundSide, dim: usize) -> ProblemResult<()> {
    if bound.len() != dim {
        return Err(ProblemError::BoundLengthMismatch { side, expected: dim, found: bound.len() });
    }
    for index in 0..dim {
        if bound.get(index).is_nan() {
            return Err(ProblemError::NaNBound { side, index });
        }
    }
    Ok(())
}

/// Enforce `lower[i] <= upper[i]` coordinate-wise.
///
/// Assumes both vectors already passed [`validate_bound`] with the same
/// dimension.
///
/// # Errors
/// Returns [`ProblemError::BoundOrderViolated`] for the first violating index.
pub fn validate_bound_order<V: VectorLike>(lower: &V, upper: &V) -> ProblemResult<()> {
    for index in 0..lower.len() {
        let (l, u) = (lower.get(index), upper.get(index));
        if l > u {
            return Err(ProblemError::BoundOrderViolated { index, lower: l, upper: u });
        }
    }
    Ok(())
}

/// Require every coordinate of `x` to lie within `[lower, upper]`.
///
/// NaN coordinates fail the check.
///
/// # Errors
/// Returns [`ProblemError::PointOutOfBounds`] for the first offending index.
pub fn validate_within_bounds<V: VectorLike>(x: &V, lower: &V, upper: &V) -> ProblemResult<()> {
    for index in 0..x.len() {
        let (value, l, u) = (x.get(index), lower.get(index), upper.get(index));
        if !(l <= value && value <= u) {
            return Err(ProblemError::PointOutOfBounds { index, value, lower: l, upper: u });
        }
    }
    Ok(())
}

/// Validate the finite-difference grid spacing.
///
/// # Errors
/// Returns [`ProblemError::InvalidGridSpacing`] if the value is non-finite
/// or ≤ 0.0.
pub fn validate_grid_spacing(value: f64) -> ProblemResult<()> {
    if !value.is_finite() {
        return Err(ProblemError::InvalidGridSpacing {
            value,
            reason: "Grid spacing must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(ProblemError::InvalidGridSpacing {
            value,
            reason: "Grid spacing must be positive.",
        });
    }
    Ok(())
}
