//! problem — bounded objectives and boundary-aware numerical gradients.
//!
//! Purpose
//! -------
//! Describe what is being minimized: a user [`Objective`] over any
//! [`VectorLike`](crate::vector::VectorLike) container, a fixed dimension, and
//! per-coordinate box bounds. The optimization driver only ever talks to a
//! problem through [`BoundedProblem`].
//!
//! Key behaviors
//! -------------
//! - [`BoundedProblem`] validates dimension, bound lengths and
//!   `lower <= upper` on construction and on every bound update.
//! - Objectives without an analytic gradient are differentiated numerically
//!   with [`finite_diff::try_numerical_gradient`], which never evaluates
//!   outside the box.
//! - [`finite_diff::numerical_gradient`] and
//!   [`finite_diff::numerical_gradient_unbounded`] are standalone utilities,
//!   independent of the driver.
//!
//! Conventions
//! -----------
//! - All failures are [`ProblemError`] values returned through
//!   [`ProblemResult`]; nothing in this module panics on bad input.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the integration tests in
//!   `tests/` check numerical gradients of the benchmark functions against
//!   their analytic gradients.
pub mod bounded;
pub mod errors;
pub mod finite_diff;
pub mod traits;
pub mod validation;

pub use self::{
    bounded::BoundedProblem,
    errors::{BoundSide, ProblemError, ProblemResult},
    finite_diff::{
        numerical_gradient, numerical_gradient_unbounded, try_numerical_gradient,
        DEFAULT_GRID_SPACING,
    },
    traits::Objective,
};
