//! Validation helpers for driver configuration.
//!
//! - [`verify_history_size`]: at least two correction pairs, and a work
//!   array length that fits in `usize`.
//! - [`verify_max_iterations`]: strictly positive.
//! - [`verify_precision_factor`]: finite and strictly positive.
//! - [`verify_projected_gradient_tolerance`]: finite or `+inf`, and `>= 0`.
//!
//! Setters call these before committing, so a rejected value never replaces
//! the previous configuration.
use crate::optimization::{
    errors::{OptError, OptResult},
    kernel::Workspace,
};

/// Validate the number of stored correction pairs.
///
/// # Errors
/// Returns [`OptError::InvalidHistorySize`] if `size <= 1`, or if the real
/// work array for a single coordinate would overflow `usize`.
pub fn verify_history_size(size: usize) -> OptResult<()> {
    if size <= 1 {
        return Err(OptError::InvalidHistorySize {
            size,
            reason: "History size must be at least 2.",
        });
    }
    if Workspace::real_len(1, size).is_none() {
        return Err(OptError::InvalidHistorySize {
            size,
            reason: "History size overflows the work array length.",
        });
    }
    Ok(())
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIterations`] if `max_iter == 0`.
pub fn verify_max_iterations(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIterations {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the relative-reduction factor (multiple of machine epsilon).
///
/// # Errors
/// Returns [`OptError::InvalidPrecisionFactor`] if the value is non-finite or
/// ≤ 0.0.
pub fn verify_precision_factor(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidPrecisionFactor {
            value,
            reason: "Precision factor must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidPrecisionFactor {
            value,
            reason: "Precision factor must be positive.",
        });
    }
    Ok(())
}

/// Validate the projected-gradient tolerance.
///
/// `0.0` disables the test in practice; NaN is rejected.
///
/// # Errors
/// Returns [`OptError::InvalidProjectedGradientTolerance`] if the value is NaN
/// or negative.
pub fn verify_projected_gradient_tolerance(value: f64) -> OptResult<()> {
    if value.is_nan() {
        return Err(OptError::InvalidProjectedGradientTolerance {
            value,
            reason: "Tolerance must not be NaN.",
        });
    }
    if value < 0.0 {
        return Err(OptError::InvalidProjectedGradientTolerance {
            value,
            reason: "Tolerance must be non-negative.",
        });
    }
    Ok(())
}
