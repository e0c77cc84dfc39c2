use crate::problem::errors::ProblemError;

/// Crate-wide result alias for driver operations.
pub type OptResult<T> = Result<T, OptError>;

/// Coarse classification of an [`OptError`].
///
/// - `Validation`: bad problem data or starting point; raised before the
///   kernel runs.
/// - `Configuration`: a rejected driver setting; the previous setting is kept.
/// - `Protocol`: the kernel returned a task code outside the closed set.
/// - `Kernel`: the kernel rejected its inputs or failed in the line search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Protocol,
    Kernel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Driver configuration ----
    /// History size must be at least 2.
    InvalidHistorySize { size: usize, reason: &'static str },

    /// Precision factor needs to be positive and finite.
    InvalidPrecisionFactor { value: f64, reason: &'static str },

    /// Projected gradient tolerance needs to be non-negative.
    InvalidProjectedGradientTolerance { value: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIterations { max_iter: usize, reason: &'static str },

    // ---- Problem ----
    /// Validation failure from the problem layer.
    Problem(ProblemError),

    /// Objective returned a non-finite value at the starting point.
    NonFiniteCost { value: f64 },

    // ---- Reverse communication ----
    /// Kernel returned a task code outside the recognized set.
    ProtocolViolation { code: i32 },

    // ---- Kernel ----
    /// Kernel refused the marshaled inputs.
    KernelRejectedInput { code: i32, message: &'static str },

    /// Line search could not make progress; the last accepted iterate has been
    /// written back to the caller's point.
    AbnormalTermination { iterations: usize, message: &'static str },
}

impl OptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptError::InvalidHistorySize { .. }
            | OptError::InvalidPrecisionFactor { .. }
            | OptError::InvalidProjectedGradientTolerance { .. }
            | OptError::InvalidMaxIterations { .. } => ErrorKind::Configuration,
            OptError::Problem(_) | OptError::NonFiniteCost { .. } => ErrorKind::Validation,
            OptError::ProtocolViolation { .. } => ErrorKind::Protocol,
            OptError::KernelRejectedInput { .. } | OptError::AbnormalTermination { .. } => {
                ErrorKind::Kernel
            }
        }
    }
}

impl std::error::Error for OptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptError::Problem(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Driver configuration ----
            OptError::InvalidHistorySize { size, reason } => {
                write!(f, "Invalid history size {size}: {reason}")
            }
            OptError::InvalidPrecisionFactor { value, reason } => {
                write!(f, "Invalid precision factor {value}: {reason}")
            }
            OptError::InvalidProjectedGradientTolerance { value, reason } => {
                write!(f, "Invalid projected gradient tolerance {value}: {reason}")
            }
            OptError::InvalidMaxIterations { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }

            // ---- Problem ----
            OptError::Problem(err) => write!(f, "{err}"),
            OptError::NonFiniteCost { value } => {
                write!(f, "Objective value at the starting point is not finite: {value}")
            }

            // ---- Reverse communication ----
            OptError::ProtocolViolation { code } => {
                write!(f, "Kernel returned unrecognized task code {code}")
            }

            // ---- Kernel ----
            OptError::KernelRejectedInput { code, message } => {
                write!(f, "Kernel rejected its input (task {code}): {message}")
            }
            OptError::AbnormalTermination { iterations, message } => {
                write!(f, "{message} after {iterations} iterations")
            }
        }
    }
}

impl From<ProblemError> for OptError {
    fn from(err: ProblemError) -> Self {
        OptError::Problem(err)
    }
}
