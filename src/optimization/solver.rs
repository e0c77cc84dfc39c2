//! optimization::solver — reverse-communication driver.
//!
//! Purpose
//! -------
//! Minimize a [`BoundedProblem`] from a caller-supplied starting point by
//! repeatedly invoking the [`kernel`](crate::optimization::kernel) and
//! answering its requests, then write the final iterate back into the
//! caller's container.
//!
//! Key behaviors
//! -------------
//! - Configuration (`history_size`, `max_iterations`, `precision_factor`,
//!   `projected_gradient_tolerance`, `verbosity`) is validated on every
//!   setter; a rejected value leaves the previous one in place.
//! - Each solve re-encodes the problem's current bounds, sizes and zeroes the
//!   scratch buffers, and starts the kernel from `START`.
//! - Task handling:
//!   - `FG_START` / `FG_LNSRCH`: evaluate `f` and `g` at the kernel's `x`.
//!   - `NEW_X`: stop once the kernel's iteration counter reaches
//!     `max_iterations`; otherwise continue.
//!   - convergence codes: stop.
//!   - `ABNORMAL_TERMINATION_IN_LNSRCH`: write back the last accepted
//!     iterate, then fail with [`OptError::AbnormalTermination`].
//!   - `ERROR*` codes: fail with [`OptError::KernelRejectedInput`].
//!   - anything else: [`OptError::ProtocolViolation`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The problem is borrowed immutably for the whole solve, so its bounds
//!   cannot change mid-solve.
//! - `solve` takes `&mut self`: the scratch buffers are reused across solves
//!   and a driver cannot run two solves at once.
//!
//! Conventions
//! -----------
//! - Reaching `max_iterations` is not an error. [`LbfgsbSolver::solve`] is
//!   silent about it; [`LbfgsbSolver::solve_with_report`] reports it as
//!   [`Termination::MaxIterations`].
//!
//! Testing notes
//! -------------
//! - Unit tests here cover configuration handling and the error paths of the
//!   loop. Convergence on the benchmark functions and across vector types is
//!   covered by `tests/integration_lbfgsb_pipeline.rs`.
use crate::{
    optimization::{
        bounds::encode_bounds,
        errors::{OptError, OptResult},
        kernel::{setulb, KernelIo, KernelState, Workspace},
        observer::SolveObserver,
        report::{SolveReport, Termination},
        task::Task,
        validation::{
            verify_history_size, verify_max_iterations, verify_precision_factor,
            verify_projected_gradient_tolerance,
        },
    },
    problem::{bounded::BoundedProblem, traits::Objective, validation::validate_point_len},
    vector::VectorLike,
};

pub const DEFAULT_HISTORY_SIZE: usize = 5;
pub const DEFAULT_MAX_ITERATIONS: usize = 500;
pub const DEFAULT_PRECISION_FACTOR: f64 = 1e7;
pub const DEFAULT_PROJECTED_GRADIENT_TOLERANCE: f64 = 1e-15;
pub const DEFAULT_VERBOSITY: i32 = -1;

/// Bound-constrained L-BFGS driver.
///
/// Defaults: `(history_size, max_iterations, precision_factor,
/// projected_gradient_tolerance) = (5, 500, 1e7, 1e-15)`, silent.
#[derive(Debug, Clone)]
pub struct LbfgsbSolver {
    history_size: usize,
    max_iterations: usize,
    precision_factor: f64,
    projected_gradient_tolerance: f64,
    verbosity: i32,
    workspace: Workspace,
}

impl Default for LbfgsbSolver {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            precision_factor: DEFAULT_PRECISION_FACTOR,
            projected_gradient_tolerance: DEFAULT_PROJECTED_GRADIENT_TOLERANCE,
            verbosity: DEFAULT_VERBOSITY,
            workspace: Workspace::default(),
        }
    }
}

impl LbfgsbSolver {
    /// Driver with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver with a custom history size and default everything else.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidHistorySize`] if `history_size <= 1`.
    pub fn with_history_size(history_size: usize) -> OptResult<Self> {
        let mut solver = Self::default();
        solver.set_history_size(history_size)?;
        Ok(solver)
    }

    /// Driver with every numerical setting given explicitly.
    ///
    /// # Errors
    /// Any of the setter errors, checked in argument order.
    pub fn with_settings(
        history_size: usize, max_iterations: usize, precision_factor: f64,
        projected_gradient_tolerance: f64,
    ) -> OptResult<Self> {
        let mut solver = Self::default();
        solver.set_history_size(history_size)?;
        solver.set_max_iterations(max_iterations)?;
        solver.set_precision_factor(precision_factor)?;
        solver.set_projected_gradient_tolerance(projected_gradient_tolerance)?;
        Ok(solver)
    }

    pub fn history_size(&self) -> usize {
        self.history_size
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn precision_factor(&self) -> f64 {
        self.precision_factor
    }

    pub fn projected_gradient_tolerance(&self) -> f64 {
        self.projected_gradient_tolerance
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// # Errors
    /// [`OptError::InvalidHistorySize`] if `history_size <= 1`.
    pub fn set_history_size(&mut self, history_size: usize) -> OptResult<()> {
        verify_history_size(history_size)?;
        self.history_size = history_size;
        Ok(())
    }

    /// # Errors
    /// [`OptError::InvalidMaxIterations`] if `max_iterations == 0`.
    pub fn set_max_iterations(&mut self, max_iterations: usize) -> OptResult<()> {
        verify_max_iterations(max_iterations)?;
        self.max_iterations = max_iterations;
        Ok(())
    }

    /// # Errors
    /// [`OptError::InvalidPrecisionFactor`] if the value is non-finite or
    /// `<= 0`.
    pub fn set_precision_factor(&mut self, precision_factor: f64) -> OptResult<()> {
        verify_precision_factor(precision_factor)?;
        self.precision_factor = precision_factor;
        Ok(())
    }

    /// # Errors
    /// [`OptError::InvalidProjectedGradientTolerance`] if the value is NaN or
    /// negative.
    pub fn set_projected_gradient_tolerance(&mut self, tolerance: f64) -> OptResult<()> {
        verify_projected_gradient_tolerance(tolerance)?;
        self.projected_gradient_tolerance = tolerance;
        Ok(())
    }

    /// Diagnostic level; see [`observer`](crate::optimization::observer).
    pub fn set_verbosity(&mut self, verbosity: i32) {
        self.verbosity = verbosity;
    }

    /// Minimize `problem` starting from `x`, leaving the final iterate in `x`.
    ///
    /// Stopping at `max_iterations` is silent; use
    /// [`solve_with_report`](Self::solve_with_report) to tell it apart from
    /// convergence.
    ///
    /// # Errors
    /// See [`solve_with_report`](Self::solve_with_report).
    pub fn solve<V, F>(&mut self, problem: &BoundedProblem<V, F>, x: &mut V) -> OptResult<()>
    where
        V: VectorLike,
        F: Objective<V>,
    {
        self.solve_with_report(problem, x).map(|_| ())
    }

    /// solve_with_report — run the reverse-communication loop and summarize it.
    ///
    /// Parameters
    /// ----------
    /// - `problem`: `&BoundedProblem<V, F>`
    ///   Objective, dimension and bounds. Bounds are encoded fresh for this
    ///   call.
    /// - `x`: `&mut V`
    ///   Starting point on entry, final iterate on successful return. Points
    ///   outside the box are projected onto it before the first evaluation.
    ///
    /// Returns
    /// -------
    /// `OptResult<SolveReport>`
    ///   Final value, stopping reason, counters and projected-gradient norm.
    ///
    /// Errors
    /// ------
    /// - `OptError::Problem(PointDimMismatch)` if `x.len()` differs from the
    ///   problem dimension.
    /// - `OptError::Problem(..)` for any failure of the objective or its
    ///   gradient, including a wrong gradient length.
    /// - `OptError::NonFiniteCost` if `f` is not finite at the starting point.
    /// - `OptError::AbnormalTermination` if the line search fails; `x` then
    ///   holds the last accepted iterate.
    /// - `OptError::KernelRejectedInput` for kernel input errors, including
    ///   a work array that cannot be allocated for `(n, history_size)`.
    /// - `OptError::ProtocolViolation` for an unrecognized task code.
    pub fn solve_with_report<V, F>(
        &mut self, problem: &BoundedProblem<V, F>, x: &mut V,
    ) -> OptResult<SolveReport>
    where
        V: VectorLike,
        F: Objective<V>,
    {
        let n = problem.dimension();
        let m = self.history_size;
        validate_point_len(x, n)?;
        let nbd: Vec<i32> = encode_bounds(problem.lower_bound(), problem.upper_bound())?
            .into_iter()
            .map(|kind| kind.code())
            .collect();
        let lower = problem.lower_bound().to_vec();
        let upper = problem.upper_bound().to_vec();

        let mut xs = x.to_vec();
        let mut g = vec![0.0; n];
        let mut f = 0.0;
        let mut point = x.clone();
        let mut task = Task::Start.code();
        let mut state = KernelState::default();
        if let Err(rejected) = self.workspace.prepare(n, m) {
            return Err(OptError::KernelRejectedInput {
                code: rejected.code(),
                message: rejected.message(),
            });
        }
        let observer = SolveObserver::new(self.verbosity);

        let termination = loop {
            {
                let (wa, iwa) = self.workspace.buffers();
                let mut io = KernelIo {
                    n,
                    m,
                    x: &mut xs,
                    l: &lower,
                    u: &upper,
                    nbd: &nbd,
                    f: &mut f,
                    g: &mut g,
                    factr: self.precision_factor,
                    pgtol: self.projected_gradient_tolerance,
                    wa,
                    iwa,
                    task: &mut task,
                };
                setulb(&mut io, &mut state);
            }

            match Task::try_from(task)? {
                request if request.is_evaluation_request() => {
                    point.assign_from_slice(&xs);
                    f = problem.value(&point)?;
                    if request == Task::FgStart {
                        if !f.is_finite() {
                            return Err(OptError::NonFiniteCost { value: f });
                        }
                        observer.observe_init(n, f);
                    }
                    problem.gradient(&point)?.copy_into_slice(&mut g);
                    observer.observe_evaluation(request, f);
                }
                Task::NewX => {
                    let iterations = state.iterations();
                    observer.observe_iter(iterations, f, state.projected_gradient_norm());
                    if iterations >= self.max_iterations {
                        break Termination::MaxIterations;
                    }
                }
                Task::ConvergedProjectedGradient => break Termination::ProjectedGradient,
                Task::ConvergedRelativeReduction => break Termination::RelativeReduction,
                Task::AbnormalLineSearch => {
                    x.assign_from_slice(&xs);
                    return Err(OptError::AbnormalTermination {
                        iterations: state.iterations(),
                        message: Task::AbnormalLineSearch.message(),
                    });
                }
                Task::Start => return Err(OptError::ProtocolViolation { code: task }),
                rejected => {
                    return Err(OptError::KernelRejectedInput {
                        code: rejected.code(),
                        message: rejected.message(),
                    });
                }
            }
        };

        x.assign_from_slice(&xs);
        let report = SolveReport::new(
            f,
            termination,
            state.iterations(),
            state.evaluations(),
            state.projected_gradient_norm(),
        );
        observer.observe_final(&report);
        Ok(report)
    }
}
