//! kernel::memory — limited-memory BFGS history and the two-loop recursion.
//!
//! Correction pairs `(s_k, y_k)` live in a ring buffer of `m` rows inside the
//! real work array. `head` is the slot of the oldest pair and `col` the number
//! of pairs stored. The two-loop recursion runs over the *free* coordinates
//! only: every dot product skips coordinates whose active-set flag is not
//! [`FREE`], and pairs whose restricted curvature `s·y` is not positive are
//! skipped, so the implied inverse Hessian stays positive definite on the free
//! subspace.
use crate::optimization::kernel::{state::KernelState, workspace::FREE};

fn masked_dot(a: &[f64], b: &[f64], iwhere: &[i32]) -> f64 {
    a.iter().zip(b).zip(iwhere).filter(|(_, w)| **w == FREE).map(|((x, y), _)| x * y).sum()
}

fn row(buf: &[f64], slot: usize, n: usize) -> &[f64] {
    &buf[slot * n..(slot + 1) * n]
}

/// Store a new pair, evicting the oldest when the buffer is full.
pub(crate) fn push_pair(
    s_buf: &mut [f64], y_buf: &mut [f64], s: &[f64], y: &[f64], state: &mut KernelState, m: usize,
) {
    let n = s.len();
    let slot = if state.col < m {
        let slot = (state.head + state.col) % m;
        state.col += 1;
        slot
    } else {
        let slot = state.head;
        state.head = (state.head + 1) % m;
        slot
    };
    s_buf[slot * n..(slot + 1) * n].copy_from_slice(s);
    y_buf[slot * n..(slot + 1) * n].copy_from_slice(y);
}

/// Drop every stored pair.
pub(crate) fn reset(state: &mut KernelState) {
    state.col = 0;
    state.head = 0;
}

/// Two-loop recursion: writes `d = -H g` restricted to free coordinates.
///
/// `q`, `rho` and `alpha` are scratch. Coordinates that are not free get
/// `d[i] = 0`. With no usable pairs this is projected steepest descent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn direction(
    d: &mut [f64], g: &[f64], iwhere: &[i32], s_buf: &[f64], y_buf: &[f64], q: &mut [f64],
    rho: &mut [f64], alpha: &mut [f64], state: &KernelState, m: usize,
) {
    let n = g.len();
    for i in 0..n {
        q[i] = if iwhere[i] == FREE { g[i] } else { 0.0 };
    }

    let mut gamma = None;
    for k in (0..state.col).rev() {
        let slot = (state.head + k) % m;
        let (s, y) = (row(s_buf, slot, n), row(y_buf, slot, n));
        let ys = masked_dot(s, y, iwhere);
        let yy = masked_dot(y, y, iwhere);
        if !(ys > f64::EPSILON * yy) {
            rho[k] = 0.0;
            continue;
        }
        rho[k] = 1.0 / ys;
        gamma.get_or_insert(ys / yy);
        alpha[k] = rho[k] * masked_dot(s, q, iwhere);
        for i in 0..n {
            if iwhere[i] == FREE {
                q[i] -= alpha[k] * y[i];
            }
        }
    }

    let gamma = gamma.unwrap_or(1.0);
    for value in q.iter_mut() {
        *value *= gamma;
    }

    for k in 0..state.col {
        if rho[k] == 0.0 {
            continue;
        }
        let slot = (state.head + k) % m;
        let (s, y) = (row(s_buf, slot, n), row(y_buf, slot, n));
        let beta = rho[k] * masked_dot(y, q, iwhere);
        for i in 0..n {
            if iwhere[i] == FREE {
                q[i] += (alpha[k] - beta) * s[i];
            }
        }
    }

    for i in 0..n {
        d[i] = if iwhere[i] == FREE { -q[i] } else { 0.0 };
    }
}
