//! Optional convergence status returned by
//! [`LbfgsbSolver::solve_with_report`](crate::optimization::solver::LbfgsbSolver::solve_with_report).
use crate::optimization::task::Task;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Projected-gradient infinity norm fell to the tolerance.
    ProjectedGradient,
    /// Relative decrease of `f` fell below `precision_factor * eps`.
    RelativeReduction,
    /// The iteration cap was reached first. Not an error.
    MaxIterations,
}

impl Termination {
    pub fn converged(self) -> bool {
        !matches!(self, Termination::MaxIterations)
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::ProjectedGradient => write!(f, "{}", Task::ConvergedProjectedGradient),
            Termination::RelativeReduction => write!(f, "{}", Task::ConvergedRelativeReduction),
            Termination::MaxIterations => write!(f, "STOP: TOTAL NO. of ITERATIONS REACHED LIMIT"),
        }
    }
}

/// Summary of one solve.
///
/// - `value`: objective at the final iterate.
/// - `termination`: stopping reason.
/// - `status`: human-readable status in the classic L-BFGS-B wording.
/// - `iterations`: accepted iterations reported by the kernel.
/// - `evaluations`: objective/gradient evaluation pairs.
/// - `projected_gradient_norm`: infinity norm of the projected gradient at the
///   final iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub value: f64,
    pub termination: Termination,
    pub status: String,
    pub iterations: usize,
    pub evaluations: usize,
    pub projected_gradient_norm: f64,
}

impl SolveReport {
    pub fn new(
        value: f64, termination: Termination, iterations: usize, evaluations: usize,
        projected_gradient_norm: f64,
    ) -> Self {
        Self {
            value,
            termination,
            status: termination.to_string(),
            iterations,
            evaluations,
            projected_gradient_norm,
        }
    }

    pub fn converged(&self) -> bool {
        self.termination.converged()
    }
}
