//! [`VectorLike`] adapters for the containers callers use most.
//!
//! - `Vec<f64>`: dynamic, allocates on [`VectorLike::with_len`].
//! - `[f64; N]`: fixed, only length `N` can be constructed.
//! - `ndarray::Array1<f64>`: dynamic.
//! - `nalgebra::DVector<f64>`: dynamic.
use crate::vector::{VectorError, VectorLike, VectorResult};
use nalgebra::DVector;
use ndarray::Array1;

impl VectorLike for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> f64 {
        self[index]
    }

    fn set(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn with_len(len: usize) -> VectorResult<Self> {
        Ok(vec![0.0; len])
    }
}

impl<const N: usize> VectorLike for [f64; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> f64 {
        self[index]
    }

    fn set(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn with_len(len: usize) -> VectorResult<Self> {
        if len != N {
            return Err(VectorError::FixedLengthMismatch { expected: N, requested: len });
        }
        Ok([0.0; N])
    }
}

impl VectorLike for Array1<f64> {
    fn len(&self) -> usize {
        Array1::len(self)
    }

    fn get(&self, index: usize) -> f64 {
        self[index]
    }

    fn set(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn with_len(len: usize) -> VectorResult<Self> {
        Ok(Array1::zeros(len))
    }
}

impl VectorLike for DVector<f64> {
    fn len(&self) -> usize {
        self.nrows()
    }

    fn get(&self, index: usize) -> f64 {
        self[index]
    }

    fn set(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn with_len(len: usize) -> VectorResult<Self> {
        Ok(DVector::zeros(len))
    }
}
