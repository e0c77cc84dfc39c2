//! kernel::workspace — flat scratch buffers and their layout.
//!
//! The kernel works on two caller-owned arrays:
//!
//! - a real array of `2mn + 5n + 11m² + 8m` entries, and
//! - an integer array of `3n` entries.
//!
//! [`Workspace`] owns both and is kept inside the driver between solves so
//! repeated solves of the same size do not reallocate. [`split_real`] carves
//! the real array into the named regions the kernel uses:
//!
//! | region  | length | contents                                      |
//! |---------|--------|-----------------------------------------------|
//! | `s`     | `m*n`  | step differences, one row per history slot    |
//! | `y`     | `m*n`  | gradient differences, one row per history slot |
//! | `d`     | `n`    | search direction                              |
//! | `x0`    | `n`    | iterate at the start of the line search       |
//! | `g0`    | `n`    | gradient at `x0`                              |
//! | `q`     | `n`    | two-loop recursion scratch                    |
//! | `g_lo`  | `n`    | gradient at the best Wolfe-bracket lower end  |
//! | `rho`   | `m`    | `1 / (s·y)` per history entry                 |
//! | `alpha` | `m`    | first-loop coefficients                       |
//!
//! The remaining `11m² + 6m` reals are unused by this kernel but are part of
//! the calling contract. The first `n` integers hold the active-set flags
//! (`0` free, `1` at lower, `2` at upper, `3` fixed).
use crate::optimization::task::Task;

/// Active-set flag: coordinate moves freely.
pub const FREE: i32 = 0;
/// Active-set flag: coordinate held at its lower bound.
pub const AT_LOWER: i32 = 1;
/// Active-set flag: coordinate held at its upper bound.
pub const AT_UPPER: i32 = 2;
/// Active-set flag: `lower == upper`.
pub const FIXED: i32 = 3;

/// Owned real and integer scratch arrays.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    wa: Vec<f64>,
    iwa: Vec<i32>,
}

impl Workspace {
    /// Required length of the real array for `n` coordinates and `m` pairs,
    /// or `None` if it does not fit in `usize`.
    pub fn real_len(n: usize, m: usize) -> Option<usize> {
        let mn = m.checked_mul(n)?;
        let mm = m.checked_mul(m)?;
        mn.checked_mul(2)?
            .checked_add(n.checked_mul(5)?)?
            .checked_add(mm.checked_mul(11)?)?
            .checked_add(m.checked_mul(8)?)
    }

    /// Required length of the integer array for `n` coordinates.
    pub fn int_len(n: usize) -> Option<usize> {
        n.checked_mul(3)
    }

    /// Size both arrays for `(n, m)` and zero them.
    ///
    /// # Errors
    /// Returns [`Task::ErrorWorkspace`] if a length overflows or the
    /// allocation fails; the previous buffers are left empty.
    pub fn prepare(&mut self, n: usize, m: usize) -> Result<(), Task> {
        self.wa.clear();
        self.iwa.clear();
        let (real, int) = Self::real_len(n, m).zip(Self::int_len(n)).ok_or(Task::ErrorWorkspace)?;
        self.wa.try_reserve_exact(real).map_err(|_| Task::ErrorWorkspace)?;
        self.iwa.try_reserve_exact(int).map_err(|_| Task::ErrorWorkspace)?;
        self.wa.resize(real, 0.0);
        self.iwa.resize(int, 0);
        Ok(())
    }

    /// Mutable views of both arrays, in the order the kernel takes them.
    pub fn buffers(&mut self) -> (&mut [f64], &mut [i32]) {
        (&mut self.wa, &mut self.iwa)
    }
}

/// Named regions of the real work array.
pub(crate) struct WorkViews<'a> {
    pub s: &'a mut [f64],
    pub y: &'a mut [f64],
    pub d: &'a mut [f64],
    pub x0: &'a mut [f64],
    pub g0: &'a mut [f64],
    pub q: &'a mut [f64],
    pub g_lo: &'a mut [f64],
    pub rho: &'a mut [f64],
    pub alpha: &'a mut [f64],
}

/// Carve `wa` into its regions. `wa.len()` must be at least
/// [`Workspace::real_len`]`(n, m)`.
pub(crate) fn split_real(wa: &mut [f64], n: usize, m: usize) -> WorkViews<'_> {
    let (s, rest) = wa.split_at_mut(m * n);
    let (y, rest) = rest.split_at_mut(m * n);
    let (d, rest) = rest.split_at_mut(n);
    let (x0, rest) = rest.split_at_mut(n);
    let (g0, rest) = rest.split_at_mut(n);
    let (q, rest) = rest.split_at_mut(n);
    let (g_lo, rest) = rest.split_at_mut(n);
    let (rho, rest) = rest.split_at_mut(m);
    let (alpha, _) = rest.split_at_mut(m);
    WorkViews { s, y, d, x0, g0, q, g_lo, rho, alpha }
}
