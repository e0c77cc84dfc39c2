//! kernel::state — bookkeeping carried between kernel calls.
//!
//! [`KernelState`] is the opaque record the driver hands back to
//! [`setulb`](super::setulb) on every call, alongside the work arrays. The
//! driver only reads the counters through the public accessors.

/// Which request the kernel is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    AwaitStart,
    AwaitLineSearch,
    AwaitNewX,
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct KernelState {
    pub(crate) phase: Phase,
    /// Accepted iterations.
    pub(crate) iter: usize,
    /// Objective/gradient evaluations.
    pub(crate) nfgv: usize,
    /// Stored correction pairs and the slot of the oldest one.
    pub(crate) col: usize,
    pub(crate) head: usize,
    /// Objective at the previous accepted iterate.
    pub(crate) fold: f64,
    /// Line search: value and slope at `x0`.
    pub(crate) f0: f64,
    pub(crate) gd0: f64,
    /// Line search: current step, its cap, and `||d||₂`.
    pub(crate) stp: f64,
    pub(crate) stpmax: f64,
    pub(crate) dnorm: f64,
    /// Line search: evaluations so far.
    pub(crate) nfls: usize,
    /// Wolfe bracket. `stp_lo` only moves to steps satisfying Armijo.
    pub(crate) stp_lo: f64,
    pub(crate) f_lo: f64,
    pub(crate) stp_hi: f64,
    pub(crate) all_finite: bool,
    /// Infinity norm of the projected gradient at the current iterate.
    pub(crate) sbgnrm: f64,
}

impl KernelState {
    pub fn iterations(&self) -> usize {
        self.iter
    }

    pub fn evaluations(&self) -> usize {
        self.nfgv
    }

    pub fn projected_gradient_norm(&self) -> f64 {
        self.sbgnrm
    }
}
