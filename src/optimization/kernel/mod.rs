//! kernel — reverse-communication L-BFGS-B routine.
//!
//! Purpose
//! -------
//! Provide a `setulb`-style entry point that never calls user code. Each call
//! advances an internal state machine and returns through the task code:
//! either a request ("evaluate f and g at x"), a notification ("new iterate
//! accepted"), or a terminal status. The driver in
//! [`solver`](crate::optimization::solver) owns the loop around it.
//!
//! Key behaviors
//! -------------
//! - `START`: validates the inputs (reporting the `ERROR` task codes),
//!   projects `x` into the box and requests the first evaluation
//!   (`FG_START`).
//! - After each accepted line search the kernel returns `NEW_X`. Convergence
//!   is checked on the next call, so the driver may stop after `NEW_X` and
//!   still hold a consistent iterate.
//! - Search directions come from the two-loop recursion restricted to the
//!   free variables. Variables sitting on a bound with the gradient pointing
//!   outward are held fixed for the iteration.
//! - Trial points follow the projected path `P[l, u](x0 + stp * d)`, so a
//!   single line search may pin any number of coordinates to their bounds.
//! - Each line search enforces the weak Wolfe conditions with at most
//!   [`line_search::MAX_TRIALS`] evaluations. On failure it first retries
//!   with steepest descent after discarding the history, then falls back to
//!   the last accepted iterate (`ABNORMAL_TERMINATION_IN_LNSRCH` if any
//!   trial was non-finite).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every point handed out for evaluation lies inside the box.
//! - `x`, `f` and `g` always describe the same point when the kernel returns
//!   `NEW_X`, a convergence code, or `ABNORMAL_TERMINATION_IN_LNSRCH`.
//! - The work arrays and [`KernelState`] are owned by the caller and must not
//!   be modified between calls of one solve.
//!
//! Conventions
//! -----------
//! - Task codes are raw `i32` values from [`Task`]; constraint codes are raw
//!   `i32` values `0..=3` as produced by
//!   [`BoundKind::code`](crate::optimization::bounds::BoundKind::code).
//! - Termination tests: projected-gradient infinity norm `<= pgtol`, or
//!   `fold - f <= factr * eps * max(|fold|, |f|, 1)`.
pub(crate) mod line_search;
pub(crate) mod memory;
pub mod state;
pub mod workspace;

pub use self::{state::KernelState, workspace::Workspace};

use self::{
    line_search::{Step, Trial},
    state::Phase,
    workspace::{split_real, AT_LOWER, AT_UPPER, FIXED, FREE},
};
use crate::optimization::{bounds::BoundKind, task::Task};

/// Largest step allowed along an unconstrained direction.
const BIG_STEP: f64 = 1e10;

/// Arguments of one kernel call.
///
/// Mirrors the classic `setulb` argument list; `isave/dsave/lsave/csave` are
/// replaced by [`KernelState`].
#[derive(Debug)]
pub struct KernelIo<'a> {
    pub n: usize,
    pub m: usize,
    pub x: &'a mut [f64],
    pub l: &'a [f64],
    pub u: &'a [f64],
    pub nbd: &'a [i32],
    pub f: &'a mut f64,
    pub g: &'a mut [f64],
    pub factr: f64,
    pub pgtol: f64,
    pub wa: &'a mut [f64],
    pub iwa: &'a mut [i32],
    pub task: &'a mut i32,
}

fn has_lower(code: i32) -> bool {
    BoundKind::from_code(code).is_some_and(BoundKind::has_lower)
}

fn has_upper(code: i32) -> bool {
    BoundKind::from_code(code).is_some_and(BoundKind::has_upper)
}

/// Advance the kernel by one step of the reverse-communication protocol.
///
/// Reads `*io.task` and overwrites it with the next request or a terminal
/// status. A terminal status is returned unchanged on further calls. Passing
/// any other task that does not match the pending request restarts the solve
/// as if `START` had been passed.
pub fn setulb(io: &mut KernelIo<'_>, state: &mut KernelState) {
    match (Task::try_from(*io.task), state.phase) {
        (Ok(Task::FgStart), Phase::AwaitStart) => after_start_evaluation(io, state),
        (Ok(Task::FgLineSearch), Phase::AwaitLineSearch) => after_trial_evaluation(io, state),
        (Ok(Task::NewX), Phase::AwaitNewX) => after_new_x(io, state),
        (Ok(task), Phase::Done) if task.is_converged() || task.is_error() => {}
        (Ok(Task::AbnormalLineSearch), Phase::Done) => {}
        _ => start(io, state),
    }
}

fn finish(io: &mut KernelIo<'_>, state: &mut KernelState, task: Task) {
    *io.task = task.code();
    state.phase = Phase::Done;
}

fn check_input(io: &KernelIo<'_>) -> Option<Task> {
    let n = io.n;
    let lengths_match = [io.x.len(), io.g.len(), io.l.len(), io.u.len(), io.nbd.len()]
        .iter()
        .all(|len| *len == n);
    if n == 0 || !lengths_match {
        return Some(Task::ErrorDimension);
    }
    if io.m == 0 {
        return Some(Task::ErrorHistorySize);
    }
    if !(io.factr >= 0.0) {
        return Some(Task::ErrorFactr);
    }
    if !(io.pgtol >= 0.0) {
        return Some(Task::ErrorPgtol);
    }
    if io.nbd.iter().any(|code| BoundKind::from_code(*code).is_none()) {
        return Some(Task::ErrorInvalidNbd);
    }
    if (0..n).any(|i| has_lower(io.nbd[i]) && has_upper(io.nbd[i]) && io.l[i] > io.u[i]) {
        return Some(Task::ErrorInfeasible);
    }
    let fits = |needed: Option<usize>, len: usize| needed.is_some_and(|needed| len >= needed);
    if !fits(Workspace::real_len(n, io.m), io.wa.len())
        || !fits(Workspace::int_len(n), io.iwa.len())
    {
        return Some(Task::ErrorWorkspace);
    }
    None
}

fn start(io: &mut KernelIo<'_>, state: &mut KernelState) {
    *state = KernelState::default();
    if let Some(error) = check_input(io) {
        finish(io, state, error);
        return;
    }
    for i in 0..io.n {
        if has_lower(io.nbd[i]) {
            io.x[i] = io.x[i].max(io.l[i]);
        }
        if has_upper(io.nbd[i]) {
            io.x[i] = io.x[i].min(io.u[i]);
        }
    }
    state.phase = Phase::AwaitStart;
    *io.task = Task::FgStart.code();
}

fn is_finite_point(f: f64, g: &[f64]) -> bool {
    f.is_finite() && g.iter().all(|v| v.is_finite())
}

/// Infinity norm of the gradient projected onto the box.
fn projected_gradient_norm(io: &KernelIo<'_>) -> f64 {
    let mut norm: f64 = 0.0;
    for i in 0..io.n {
        let mut gi = io.g[i];
        let code = io.nbd[i];
        if gi < 0.0 {
            if has_upper(code) {
                gi = gi.max(io.x[i] - io.u[i]);
            }
        } else if has_lower(code) {
            gi = gi.min(io.x[i] - io.l[i]);
        }
        norm = norm.max(gi.abs());
    }
    norm
}

fn after_start_evaluation(io: &mut KernelIo<'_>, state: &mut KernelState) {
    state.nfgv = 1;
    if !is_finite_point(*io.f, io.g) {
        finish(io, state, Task::AbnormalLineSearch);
        return;
    }
    state.fold = *io.f;
    state.sbgnrm = projected_gradient_norm(io);
    if state.sbgnrm <= io.pgtol {
        finish(io, state, Task::ConvergedProjectedGradient);
        return;
    }
    begin_iteration(io, state);
}

fn after_new_x(io: &mut KernelIo<'_>, state: &mut KernelState) {
    if state.sbgnrm <= io.pgtol {
        finish(io, state, Task::ConvergedProjectedGradient);
        return;
    }
    let f = *io.f;
    let scale = state.fold.abs().max(f.abs()).max(1.0);
    if state.fold - f <= io.factr * f64::EPSILON * scale {
        finish(io, state, Task::ConvergedRelativeReduction);
        return;
    }
    begin_iteration(io, state);
}

/// Classify the active set, compute a feasible descent direction and hand out
/// the first line-search trial.
fn begin_iteration(io: &mut KernelIo<'_>, state: &mut KernelState) {
    let (n, m) = (io.n, io.m);
    let iwhere = &mut io.iwa[..n];
    for i in 0..n {
        let code = io.nbd[i];
        iwhere[i] = if has_lower(code) && has_upper(code) && io.l[i] == io.u[i] {
            FIXED
        } else if has_lower(code) && io.x[i] <= io.l[i] && io.g[i] > 0.0 {
            AT_LOWER
        } else if has_upper(code) && io.x[i] >= io.u[i] && io.g[i] < 0.0 {
            AT_UPPER
        } else {
            FREE
        };
    }

    let v = split_real(io.wa, n, m);
    v.x0.copy_from_slice(io.x);
    v.g0.copy_from_slice(io.g);
    state.f0 = *io.f;

    memory::direction(v.d, io.g, iwhere, v.s, v.y, v.q, v.rho, v.alpha, state, m);
    // free coordinates already on a bound may not step outward
    for i in 0..n {
        if (has_lower(io.nbd[i]) && io.x[i] <= io.l[i] && v.d[i] < 0.0)
            || (has_upper(io.nbd[i]) && io.x[i] >= io.u[i] && v.d[i] > 0.0)
        {
            v.d[i] = 0.0;
        }
    }
    let mut gd = dot(io.g, v.d);
    if !(gd < 0.0) {
        memory::reset(state);
        for i in 0..n {
            v.d[i] = if iwhere[i] == FREE { -io.g[i] } else { 0.0 };
        }
        gd = dot(io.g, v.d);
        if !(gd < 0.0) {
            finish(io, state, Task::ConvergedProjectedGradient);
            return;
        }
    }

    state.gd0 = gd;
    state.dnorm = dot(v.d, v.d).sqrt();
    state.stpmax = last_breakpoint(io.x, v.d, io.l, io.u, io.nbd);
    let initial = if state.col == 0 { 1.0 / state.dnorm } else { 1.0 };
    state.stp = initial.min(state.stpmax);
    state.nfls = 0;
    state.stp_lo = 0.0;
    state.f_lo = state.f0;
    state.stp_hi = f64::INFINITY;
    state.all_finite = true;
    v.g_lo.copy_from_slice(io.g);

    set_trial_point(io.x, v.x0, v.d, state.stp, io.l, io.u, io.nbd);
    state.phase = Phase::AwaitLineSearch;
    *io.task = Task::FgLineSearch.code();
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Step after which every moving coordinate sits on a bound, capped at
/// [`BIG_STEP`].
fn last_breakpoint(x0: &[f64], d: &[f64], l: &[f64], u: &[f64], nbd: &[i32]) -> f64 {
    let mut last: f64 = 0.0;
    for i in 0..x0.len() {
        let t = match (d[i] < 0.0, d[i] > 0.0) {
            (true, _) if has_lower(nbd[i]) => (l[i] - x0[i]) / d[i],
            (_, true) if has_upper(nbd[i]) => (u[i] - x0[i]) / d[i],
            (false, false) => 0.0,
            _ => f64::INFINITY,
        };
        last = last.max(t);
    }
    last.min(BIG_STEP)
}

/// `x = P[l, u](x0 + stp * d)`.
fn set_trial_point(
    x: &mut [f64], x0: &[f64], d: &[f64], stp: f64, l: &[f64], u: &[f64], nbd: &[i32],
) {
    for i in 0..x.len() {
        let mut xi = x0[i] + stp * d[i];
        if has_lower(nbd[i]) {
            xi = xi.max(l[i]);
        }
        if has_upper(nbd[i]) {
            xi = xi.min(u[i]);
        }
        x[i] = xi;
    }
}

/// Right derivative of `f` along the projected path at the trial point, and
/// the same sum taken with the gradient at `x0`. Coordinates the projection
/// has pinned do not move any further.
fn path_slopes(
    x: &[f64], g: &[f64], g0: &[f64], d: &[f64], l: &[f64], u: &[f64], nbd: &[i32],
) -> (f64, f64) {
    let (mut slope, mut model) = (0.0, 0.0);
    for i in 0..x.len() {
        let pinned = (d[i] < 0.0 && has_lower(nbd[i]) && x[i] <= l[i])
            || (d[i] > 0.0 && has_upper(nbd[i]) && x[i] >= u[i]);
        if !pinned {
            slope += g[i] * d[i];
            model += g0[i] * d[i];
        }
    }
    (slope, model)
}

fn after_trial_evaluation(io: &mut KernelIo<'_>, state: &mut KernelState) {
    state.nfls += 1;
    state.nfgv += 1;
    let (n, m) = (io.n, io.m);
    let v = split_real(io.wa, n, m);
    let mut descent = 0.0;
    for i in 0..n {
        descent += v.g0[i] * (io.x[i] - v.x0[i]);
    }
    let (slope, model_slope) = path_slopes(io.x, io.g, v.g0, v.d, io.l, io.u, io.nbd);
    let finite = is_finite_point(*io.f, io.g);
    let trial = Trial { f: *io.f, slope, model_slope, descent, finite };
    let x0_norm = v.x0.iter().fold(0.0_f64, |acc, xi| acc.max(xi.abs()));

    let lo_before = state.stp_lo;
    let step = line_search::advance(state, trial, x0_norm);
    if state.stp_lo > lo_before {
        v.g_lo.copy_from_slice(io.g);
    }

    match step {
        Step::Accept => accept(io, state),
        Step::Retry(next) => {
            state.stp = next;
            set_trial_point(io.x, v.x0, v.d, next, io.l, io.u, io.nbd);
            *io.task = Task::FgLineSearch.code();
        }
        Step::Fail => fail_line_search(io, state),
    }
}

fn restore_start_point(io: &mut KernelIo<'_>, state: &KernelState) {
    let v = split_real(io.wa, io.n, io.m);
    io.x.copy_from_slice(v.x0);
    io.g.copy_from_slice(v.g0);
    *io.f = state.f0;
}

fn fail_line_search(io: &mut KernelIo<'_>, state: &mut KernelState) {
    if state.stp_lo > 0.0 {
        state.stp = state.stp_lo;
        let v = split_real(io.wa, io.n, io.m);
        set_trial_point(io.x, v.x0, v.d, state.stp_lo, io.l, io.u, io.nbd);
        io.g.copy_from_slice(v.g_lo);
        *io.f = state.f_lo;
        accept(io, state);
    } else if state.col > 0 {
        memory::reset(state);
        restore_start_point(io, state);
        begin_iteration(io, state);
    } else if state.all_finite {
        // round-off stall: a zero step lets the relative-reduction test stop
        restore_start_point(io, state);
        state.fold = state.f0;
        state.iter += 1;
        state.sbgnrm = projected_gradient_norm(io);
        state.phase = Phase::AwaitNewX;
        *io.task = Task::NewX.code();
    } else {
        restore_start_point(io, state);
        finish(io, state, Task::AbnormalLineSearch);
    }
}

/// Accept the point currently in `x/f/g`, update the history and report
/// `NEW_X`.
fn accept(io: &mut KernelIo<'_>, state: &mut KernelState) {
    let (n, m) = (io.n, io.m);
    let v = split_real(io.wa, n, m);
    let (mut ys, mut yy) = (0.0, 0.0);
    for i in 0..n {
        v.q[i] = io.x[i] - v.x0[i];
        v.g0[i] = io.g[i] - v.g0[i];
        ys += v.q[i] * v.g0[i];
        yy += v.g0[i] * v.g0[i];
    }
    if ys > f64::EPSILON * yy {
        memory::push_pair(v.s, v.y, v.q, v.g0, state, m);
    }
    state.fold = state.f0;
    state.iter += 1;
    state.sbgnrm = projected_gradient_norm(io);
    state.phase = Phase::AwaitNewX;
    *io.task = Task::NewX.code();
}
