//! User-facing objective interface.
//!
//! - [`Objective`]: trait users implement for the function they minimize.
//!
//! Convention: the driver always *minimizes* `f(x)`. If an analytic gradient
//! is provided it must be `∇f(x)`; otherwise the bounded problem falls back to
//! the boundary-aware central differences in
//! [`finite_diff`](crate::problem::finite_diff).
use crate::{
    problem::errors::{ProblemError, ProblemResult},
    vector::VectorLike,
};

/// User-implemented objective over a vector type `V`.
///
/// Required:
/// - `value(&V) -> ProblemResult<f64>`: evaluate `f(x)`.
///   - Errors: return [`ProblemError::EvaluationFailed`] (or any other
///     descriptive variant) when the model cannot be evaluated.
///
/// Optional:
/// - `gradient(&V) -> ProblemResult<V>`: analytic gradient `∇f(x)`, with the
///   same length as `x`. If not implemented, central finite differences that
///   respect the problem bounds are used automatically.
///
/// Closures `Fn(&V) -> f64` implement this trait directly, so quick
/// experiments need no wrapper type.
pub trait Objective<V: VectorLike> {
    // Required methods
    fn value(&self, x: &V) -> ProblemResult<f64>;

    // Optional methods
    fn gradient(&self, _x: &V) -> ProblemResult<V> {
        Err(ProblemError::GradientNotImplemented)
    }
}

impl<V, F> Objective<V> for F
where
    V: VectorLike,
    F: Fn(&V) -> f64,
{
    fn value(&self, x: &V) -> ProblemResult<f64> {
        Ok(self(x))
    }
}
