//! vector — minimal capability interface over caller-owned numeric vectors.
//!
//! Purpose
//! -------
//! Let the problem layer, the numerical gradient and the optimization driver
//! work with any container of `f64` coordinates without imposing a common base
//! type. Callers keep their own representation (`Vec<f64>`, `[f64; N]`,
//! `ndarray::Array1<f64>`, `nalgebra::DVector<f64>`, or a type of their own)
//! and the crate only ever asks for the four capabilities listed below.
//!
//! Key behaviors
//! -------------
//! - [`VectorLike::len`], [`VectorLike::get`], [`VectorLike::set`]: indexed
//!   access over a fixed logical length.
//! - [`VectorLike::with_len`]: construct a zero-filled vector of a requested
//!   length. Dynamic containers allocate; fixed-size containers only accept
//!   their compile-time length and report [`VectorError::FixedLengthMismatch`]
//!   otherwise.
//! - Provided helpers ([`VectorLike::filled`], [`VectorLike::from_slice`],
//!   [`VectorLike::copy_into_slice`], [`VectorLike::assign_from_slice`],
//!   [`VectorLike::to_vec`]) are built on the four primitives, so an
//!   implementor only writes those.
//!
//! Invariants & assumptions
//! ------------------------
//! - `len()` never changes through `get`/`set`; only construction decides it.
//! - `get`/`set` panic on out-of-range indices exactly like slice indexing.
//!   Every call site in this crate validates lengths first.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Slice copies (`copy_into_slice`, `assign_from_slice`) require equal
//!   lengths; they are used by the driver to marshal between the caller's
//!   container and the kernel's flat buffers.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`impls`] cover construction, length checks for fixed-size
//!   arrays and slice round-trips for every provided adapter.

pub mod errors;
pub mod impls;

pub use self::errors::{VectorError, VectorResult};

/// Capability interface required from every vector type handled by the crate.
///
/// Implementors supply length, indexed read/write and sized construction;
/// everything else is provided.
pub trait VectorLike: Clone {
    /// Number of coordinates.
    fn len(&self) -> usize;

    /// Read coordinate `index`.
    fn get(&self, index: usize) -> f64;

    /// Overwrite coordinate `index`.
    fn set(&mut self, index: usize, value: f64);

    /// Construct a zero-filled vector with `len` coordinates.
    ///
    /// # Errors
    /// - [`VectorError::FixedLengthMismatch`] when the container has a fixed
    ///   length different from `len`.
    fn with_len(len: usize) -> VectorResult<Self>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Construct a vector with every coordinate equal to `value`.
    fn filled(len: usize, value: f64) -> VectorResult<Self> {
        let mut out = Self::with_len(len)?;
        for i in 0..len {
            out.set(i, value);
        }
        Ok(out)
    }

    /// Construct a vector holding a copy of `values`.
    fn from_slice(values: &[f64]) -> VectorResult<Self> {
        let mut out = Self::with_len(values.len())?;
        out.assign_from_slice(values);
        Ok(out)
    }

    /// Copy every coordinate into `out`. Lengths must match.
    fn copy_into_slice(&self, out: &mut [f64]) {
        debug_assert_eq!(self.len(), out.len());
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.get(i);
        }
    }

    /// Overwrite every coordinate from `values`. Lengths must match.
    fn assign_from_slice(&mut self, values: &[f64]) {
        debug_assert_eq!(self.len(), values.len());
        for (i, &value) in values.iter().enumerate() {
            self.set(i, value);
        }
    }

    /// Owned copy of the coordinates.
    fn to_vec(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}
