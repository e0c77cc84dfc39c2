//! Errors raised by the vector capability layer.
//!
//! Only construction can fail: fixed-size containers cannot hold a length
//! other than their compile-time one. Indexed reads and writes follow the
//! usual Rust indexing contract and panic on out-of-range access, so callers
//! validate lengths before touching coordinates.

/// Result alias for vector construction.
pub type VectorResult<T> = Result<T, VectorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// A fixed-size container was asked to take a different length.
    FixedLengthMismatch { expected: usize, requested: usize },
}

impl std::error::Error for VectorError {}

impl std::fmt::Display for VectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorError::FixedLengthMismatch { expected, requested } => {
                write!(
                    f,
                    "Fixed-size container has length {expected}, cannot construct it with length {requested}"
                )
            }
        }
    }
}
