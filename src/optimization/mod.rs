//! optimization — bound-constrained L-BFGS driver, kernel and error surface.
//!
//! Purpose
//! -------
//! Minimize a [`BoundedProblem`](crate::problem::BoundedProblem) subject to
//! its box constraints by driving a reverse-communication L-BFGS-B kernel.
//! Callers configure an [`LbfgsbSolver`](solver::LbfgsbSolver), hand it a
//! problem and a starting point, and get the final iterate back in the same
//! container.
//!
//! Key behaviors
//! -------------
//! - `bounds`: classify each coordinate into the kernel's constraint codes.
//! - `task`: decode the kernel's raw task codes into a closed enum; anything
//!   else is a protocol violation.
//! - `kernel`: the `setulb` routine and its work-array layout.
//! - `solver`: configuration, marshaling, and the reverse-communication loop.
//! - `report` / `observer`: optional status output and `verbosity`-driven
//!   logging (behind the `obs_slog` feature).
//!
//! Invariants & assumptions
//! ------------------------
//! - The kernel never calls user code; only the driver evaluates the
//!   objective, and only at points the kernel hands out (always inside the
//!   box).
//! - Every failure is an [`OptError`](errors::OptError) returned through
//!   [`OptResult`](errors::OptResult); no panics on bad input.
//!
//! Conventions
//! -----------
//! - Stopping at `max_iterations` is not an error and not reported by
//!   `solve`; `solve_with_report` exposes it as a termination reason.
//! - Numerical modules avoid I/O; diagnostics go through the observer only.
//!
//! Downstream usage
//! ----------------
//! - Import the curated surface with `rust_lbfgsb::optimization::prelude::*`
//!   or the crate-level `rust_lbfgsb::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Each submodule has unit tests for its local behavior; the kernel is also
//!   driven by hand through the raw protocol.
//! - `tests/integration_lbfgsb_pipeline.rs` runs the benchmark functions end
//!   to end for every supported vector type.

pub mod bounds;
pub mod errors;
pub mod kernel;
pub mod observer;
pub mod report;
pub mod solver;
pub mod task;
pub mod validation;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_lbfgsb::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::bounds::{encode_bounds, BoundKind};
    pub use super::errors::{ErrorKind, OptError, OptResult};
    pub use super::report::{SolveReport, Termination};
    pub use super::solver::LbfgsbSolver;
    pub use super::task::Task;
}
