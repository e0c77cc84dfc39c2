//! Validation errors for bounded objectives and numerical differentiation.
//!
//! This module defines [`ProblemError`], the validation error surfaced by the
//! problem layer: dimension and length mismatches, malformed bounds, points
//! outside the box during numerical differentiation, and failures reported by
//! a user objective. All checks run before any objective evaluation, so an
//! error never leaves a problem partially mutated.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Bounds may be infinite; only NaN bound entries are rejected outright.
use crate::vector::VectorError;

/// Result alias for problem construction, bound mutation and evaluation.
pub type ProblemResult<T> = Result<T, ProblemError>;

/// Which side of the box a bound vector describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl std::fmt::Display for BoundSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundSide::Lower => write!(f, "lower"),
            BoundSide::Upper => write!(f, "upper"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    // ---- Dimensions ----
    /// Problem dimension must be strictly positive.
    InvalidDimension { dimension: usize, reason: &'static str },

    /// A fixed-size container cannot hold the requested dimension.
    FixedLengthMismatch { expected: usize, requested: usize },

    /// Point length does not match the problem dimension.
    PointDimMismatch { expected: usize, found: usize },

    /// Gradient length does not match the problem dimension.
    GradientDimMismatch { expected: usize, found: usize },

    // ---- Bounds ----
    /// Bound vector length does not match the problem dimension.
    BoundLengthMismatch { side: BoundSide, expected: usize, found: usize },

    /// Bound entries must not be NaN.
    NaNBound { side: BoundSide, index: usize },

    /// Lower bound exceeds upper bound at `index`.
    BoundOrderViolated { index: usize, lower: f64, upper: f64 },

    // ---- Numerical differentiation ----
    /// Point coordinate lies outside `[lower, upper]` (or is NaN).
    PointOutOfBounds { index: usize, value: f64, lower: f64, upper: f64 },

    /// Grid spacing must be finite and strictly positive.
    InvalidGridSpacing { value: f64, reason: &'static str },

    // ---- Objective ----
    /// The objective has no analytic gradient; callers fall back to finite
    /// differences.
    GradientNotImplemented,

    /// User objective reported a failure.
    EvaluationFailed { text: String },
}

impl std::error::Error for ProblemError {}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dimensions ----
            ProblemError::InvalidDimension { dimension, reason } => {
                write!(f, "Invalid problem dimension {dimension}: {reason}")
            }
            ProblemError::FixedLengthMismatch { expected, requested } => {
                write!(
                    f,
                    "The container's fixed length {expected} does not match the problem dimension {requested}"
                )
            }
            ProblemError::PointDimMismatch { expected, found } => {
                write!(f, "Point dimension mismatch: expected {expected}, found {found}")
            }
            ProblemError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }

            // ---- Bounds ----
            ProblemError::BoundLengthMismatch { side, expected, found } => {
                write!(f, "The {side} bound has length {found}, expected {expected}")
            }
            ProblemError::NaNBound { side, index } => {
                write!(f, "The {side} bound is NaN at index {index}")
            }
            ProblemError::BoundOrderViolated { index, lower, upper } => {
                write!(f, "Lower bound {lower} exceeds upper bound {upper} at index {index}")
            }

            // ---- Numerical differentiation ----
            ProblemError::PointOutOfBounds { index, value, lower, upper } => {
                write!(
                    f,
                    "Point coordinate {value} at index {index} is not contained within [{lower}, {upper}]"
                )
            }
            ProblemError::InvalidGridSpacing { value, reason } => {
                write!(f, "Invalid grid spacing {value}: {reason}")
            }

            // ---- Objective ----
            ProblemError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            ProblemError::EvaluationFailed { text } => {
                write!(f, "Objective evaluation failed: {text}")
            }
        }
    }
}

impl From<VectorError> for ProblemError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::FixedLengthMismatch { expected, requested } => {
                ProblemError::FixedLengthMismatch { expected, requested }
            }
        }
    }
}
