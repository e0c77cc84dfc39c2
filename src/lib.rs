//! rust_lbfgsb — bound-constrained L-BFGS over any numeric vector type.
//!
//! Purpose
//! -------
//! Serve as the crate root for minimizing a smooth objective subject to
//! per-coordinate box constraints. The objective is written against the
//! caller's own vector type; the crate only requires a small capability trait
//! from it and drives a reverse-communication L-BFGS-B kernel on its behalf.
//!
//! Key behaviors
//! -------------
//! - `vector`: the [`VectorLike`](vector::VectorLike) capability trait and
//!   adapters for `Vec<f64>`, `[f64; N]`, `ndarray::Array1<f64>` and
//!   `nalgebra::DVector<f64>`.
//! - `problem`: [`BoundedProblem`](problem::BoundedProblem) (objective,
//!   dimension and bounds) and boundary-aware numerical gradients.
//! - `optimization`: the [`LbfgsbSolver`](optimization::solver::LbfgsbSolver)
//!   driver, the kernel it drives, and the error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bounds satisfy `lower[i] <= upper[i]` at all times; infinite entries
//!   mean "no bound".
//! - Objective evaluations happen only inside the box.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. Everything minimizes.
//! - Fallible operations return `Result` aliases (`VectorResult`,
//!   `ProblemResult`, `OptResult`).
//!
//! Downstream usage
//! ----------------
//! ```ignore
//! use rust_lbfgsb::prelude::*;
//!
//! let rosenbrock = |x: &Vec<f64>| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
//! let problem = BoundedProblem::with_bounds(2, vec![-10.0; 2], vec![10.0; 2], rosenbrock)?;
//! let mut x = vec![-1.0, 2.0];
//! LbfgsbSolver::new().solve(&problem, &mut x)?;
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code; end-to-end runs on the classic
//!   benchmark functions live under `tests/`.

pub mod optimization;
pub mod problem;
pub mod vector;

pub mod prelude {
    pub use crate::optimization::prelude::*;
    pub use crate::problem::{
        numerical_gradient, numerical_gradient_unbounded, BoundedProblem, Objective, ProblemError,
        ProblemResult, DEFAULT_GRID_SPACING,
    };
    pub use crate::vector::{VectorError, VectorLike, VectorResult};
}
