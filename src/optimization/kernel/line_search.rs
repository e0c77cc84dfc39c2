//! kernel::line_search — step selection for the weak Wolfe conditions.
//!
//! Trials lie on the projected path `x(stp) = P[l, u](x0 + stp * d)`. The
//! line search looks for `stp` in `(0, stpmax]` with
//!
//! - sufficient decrease: `f(stp) <= f0 + FTOL * min(g0·(x(stp) - x0), 0)`,
//!   and
//! - curvature: the right derivative of `f` along the path at `stp` is
//!   `>= GTOL * min(g0·d', 0)`, where `d'` is `d` restricted to the
//!   coordinates the projection has not pinned at `stp`.
//!
//! Before the first breakpoint both reduce to the usual weak Wolfe
//! conditions. `stpmax` is the last breakpoint of the path, beyond which it
//! no longer moves.
//!
//! It keeps a bracket `[stp_lo, stp_hi]`: `stp_lo` is the largest step seen
//! that satisfies sufficient decrease but not curvature, `stp_hi` the smallest
//! step that failed sufficient decrease (or produced a non-finite value).
//! Each call to [`advance`] inspects one evaluated trial and decides the
//! next move.
use crate::optimization::kernel::state::KernelState;

pub(crate) const FTOL: f64 = 1e-3;
pub(crate) const GTOL: f64 = 0.9;
pub(crate) const MAX_TRIALS: usize = 20;
const EXTRAPOLATION: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// The current trial satisfies both conditions (or sits on `stpmax`).
    Accept,
    /// Evaluate again at this step.
    Retry(f64),
    /// No acceptable step can be found from this bracket.
    Fail,
}

/// One evaluated point on the projected path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trial {
    pub f: f64,
    /// Right derivative of `f` along the path.
    pub slope: f64,
    /// Same derivative with `g0` in place of `g`.
    pub model_slope: f64,
    /// Linear model of the decrease, `g0·(x(stp) - x0)`.
    pub descent: f64,
    pub finite: bool,
}

/// Update the bracket with the trial at `state.stp` and pick the next move.
///
/// `x0_norm` is `||x0||∞`, used to detect a bracket narrower than round-off.
pub(crate) fn advance(state: &mut KernelState, trial: Trial, x0_norm: f64) -> Step {
    let Trial { f, slope, model_slope, descent, finite } = trial;
    let stp = state.stp;

    if !finite {
        state.all_finite = false;
        state.stp_hi = stp;
        let next = if state.stp_lo > 0.0 { 0.5 * (state.stp_lo + stp) } else { 0.1 * stp };
        return retry_or_fail(state, next, x0_norm);
    }

    if f > state.f0 + FTOL * descent.min(0.0) {
        state.stp_hi = stp;
        let next = if state.stp_lo > 0.0 {
            0.5 * (state.stp_lo + stp)
        } else {
            // minimizer of the quadratic through f0, gd0 and f(stp)
            let curvature = 2.0 * (f - state.f0 - state.gd0 * stp);
            (-state.gd0 * stp * stp / curvature).clamp(0.1 * stp, 0.5 * stp)
        };
        return retry_or_fail(state, next, x0_norm);
    }

    if slope < GTOL * model_slope.min(0.0) {
        state.stp_lo = stp;
        state.f_lo = f;
        if stp >= state.stpmax {
            return Step::Accept;
        }
        let next = if state.stp_hi.is_finite() {
            0.5 * (stp + state.stp_hi)
        } else {
            (EXTRAPOLATION * stp).min(state.stpmax)
        };
        return retry_or_fail(state, next, x0_norm);
    }

    Step::Accept
}

fn retry_or_fail(state: &KernelState, next: f64, x0_norm: f64) -> Step {
    let collapsed = (next - state.stp_lo).abs() * state.dnorm <= f64::EPSILON * x0_norm.max(1.0);
    if state.nfls >= MAX_TRIALS || collapsed || !next.is_finite() {
        Step::Fail
    } else {
        Step::Retry(next)
    }
}
