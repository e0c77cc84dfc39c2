//! optimization::bounds — per-coordinate constraint codes for the kernel.
//!
//! Each coordinate is classified by which of its bounds is finite:
//!
//! | lower finite | upper finite | kind                     | code |
//! |--------------|--------------|--------------------------|------|
//! | no           | no           | [`BoundKind::Unbounded`] | 0    |
//! | yes          | no           | [`BoundKind::Lower`]     | 1    |
//! | yes          | yes          | [`BoundKind::Both`]      | 2    |
//! | no           | yes          | [`BoundKind::Upper`]     | 3    |
//!
//! The driver encodes bounds fresh at the start of every solve and never
//! mutates the encoding afterwards.
use crate::{
    optimization::errors::OptResult,
    problem::{errors::BoundSide, validation::validate_bound},
    vector::VectorLike,
};

/// Constraint kind of a single coordinate.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Unbounded = 0,
    Lower = 1,
    Both = 2,
    Upper = 3,
}

impl BoundKind {
    /// Classify one coordinate from its bound values.
    pub fn classify(lower: f64, upper: f64) -> Self {
        match (lower.is_finite(), upper.is_finite()) {
            (false, false) => BoundKind::Unbounded,
            (true, false) => BoundKind::Lower,
            (true, true) => BoundKind::Both,
            (false, true) => BoundKind::Upper,
        }
    }

    /// Raw code handed to the kernel.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Inverse of [`BoundKind::code`]; `None` outside `0..=3`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BoundKind::Unbounded),
            1 => Some(BoundKind::Lower),
            2 => Some(BoundKind::Both),
            3 => Some(BoundKind::Upper),
            _ => None,
        }
    }

    pub fn has_lower(self) -> bool {
        matches!(self, BoundKind::Lower | BoundKind::Both)
    }

    pub fn has_upper(self) -> bool {
        matches!(self, BoundKind::Both | BoundKind::Upper)
    }
}

/// Encode a pair of bound vectors into constraint kinds.
///
/// # Errors
/// - `OptError::Problem(BoundLengthMismatch)` if `upper.len() != lower.len()`.
/// - `OptError::Problem(NaNBound)` if either side contains NaN.
pub fn encode_bounds<V: VectorLike>(lower: &V, upper: &V) -> OptResult<Vec<BoundKind>> {
    let n = lower.len();
    validate_bound(lower, BoundSide::Lower, n)?;
    validate_bound(upper, BoundSide::Upper, n)?;
    Ok((0..n).map(|i| BoundKind::classify(lower.get(i), upper.get(i))).collect())
}
