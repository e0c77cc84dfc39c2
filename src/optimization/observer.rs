//! optimization::observer — verbosity-driven diagnostics for one solve.
//!
//! Purpose
//! -------
//! Turn the driver's `verbosity` setting into structured log records without
//! touching the numerics. Terminal output is only compiled in with the
//! `obs_slog` feature; without it every hook is a no-op and `verbosity` has no
//! visible effect.
//!
//! Key behaviors
//! -------------
//! - `verbosity < 0`: silent.
//! - `verbosity == 0`: one summary record when the solve ends.
//! - `1..=99`: additionally an iteration record every `verbosity`
//!   iterations, plus the starting value.
//! - `>= 100`: additionally a record for every evaluation request.
//!
//! Conventions
//! -----------
//! - The logger is a non-blocking `slog` terminal drain
//!   (`slog-term` + `slog-async`), built once per solve and flushed when the
//!   observer is dropped at the end of the solve.
use crate::optimization::{report::SolveReport, task::Task};

/// Verbosity at and above which every evaluation request is logged.
pub const TRACE_EVALUATIONS: i32 = 100;

/// Whether an iteration record is due at `iter` for this verbosity.
pub fn iteration_due(verbosity: i32, iter: usize) -> bool {
    verbosity >= 1 && iter % (verbosity as usize) == 0
}

pub struct SolveObserver {
    verbosity: i32,
    #[cfg(feature = "obs_slog")]
    logger: Option<slog::Logger>,
}

impl SolveObserver {
    pub fn new(verbosity: i32) -> Self {
        Self {
            verbosity,
            #[cfg(feature = "obs_slog")]
            logger: (verbosity >= 0).then(term_logger),
        }
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Starting point accepted by the kernel.
    pub fn observe_init(&self, n: usize, f: f64) {
        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &self.logger {
            if self.verbosity >= 1 {
                slog::info!(logger, "init"; "n" => n, "f" => f);
            }
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (n, f);
    }

    /// Kernel requested `f` and `g`.
    pub fn observe_evaluation(&self, task: Task, f: f64) {
        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &self.logger {
            if self.verbosity >= TRACE_EVALUATIONS {
                slog::info!(logger, "evaluation"; "task" => task.message(), "f" => f);
            }
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (task, f);
    }

    /// Kernel accepted a new iterate.
    pub fn observe_iter(&self, iter: usize, f: f64, projected_gradient_norm: f64) {
        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &self.logger {
            if iteration_due(self.verbosity, iter) {
                slog::info!(logger, "iteration";
                    "iter" => iter, "f" => f, "pg_norm" => projected_gradient_norm);
            }
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (iter, f, projected_gradient_norm);
    }

    /// Solve finished.
    pub fn observe_final(&self, report: &SolveReport) {
        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &self.logger {
            slog::info!(logger, "done";
                "status" => &report.status,
                "f" => report.value,
                "iterations" => report.iterations,
                "evaluations" => report.evaluations,
                "pg_norm" => report.projected_gradient_norm);
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = report;
    }
}

#[cfg(feature = "obs_slog")]
fn term_logger() -> slog::Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Drop)
        .build()
        .fuse();
    slog::Logger::root(drain, slog::o!())
}
