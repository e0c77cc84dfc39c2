//! optimization::task — closed set of reverse-communication task codes.
//!
//! The kernel signals what it needs through a raw `i32` task field. The
//! driver decodes it with [`Task::try_from`]; any value outside the table is a
//! [`OptError::ProtocolViolation`] and aborts the solve.
//!
//! | code | task                      | meaning                                    |
//! |------|---------------------------|--------------------------------------------|
//! | 0    | [`Task::Start`]           | fresh solve, kernel must initialize        |
//! | 1    | [`Task::NewX`]            | a new iterate was accepted                 |
//! | 2    | [`Task::FgLineSearch`]    | evaluate `f` and `g` at a line-search trial |
//! | 3    | [`Task::FgStart`]         | evaluate `f` and `g` at the start point    |
//! | 4    | [`Task::ConvergedProjectedGradient`] | projected gradient below `pgtol` |
//! | 5    | [`Task::ConvergedRelativeReduction`] | relative decrease below `factr*eps` |
//! | 6    | [`Task::AbnormalLineSearch`] | line search failed                      |
//! | 7–13 | `Error*`                  | kernel rejected its inputs                 |
use crate::optimization::errors::{OptError, OptResult};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Start = 0,
    NewX = 1,
    FgLineSearch = 2,
    FgStart = 3,
    ConvergedProjectedGradient = 4,
    ConvergedRelativeReduction = 5,
    AbnormalLineSearch = 6,
    ErrorDimension = 7,
    ErrorHistorySize = 8,
    ErrorFactr = 9,
    ErrorPgtol = 10,
    ErrorInvalidNbd = 11,
    ErrorInfeasible = 12,
    ErrorWorkspace = 13,
}

impl Task {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Kernel requests `f` and `g` at the current `x`.
    pub fn is_evaluation_request(self) -> bool {
        matches!(self, Task::FgStart | Task::FgLineSearch)
    }

    pub fn is_converged(self) -> bool {
        matches!(self, Task::ConvergedProjectedGradient | Task::ConvergedRelativeReduction)
    }

    pub fn is_error(self) -> bool {
        self.code() >= Task::ErrorDimension.code()
    }

    /// Status text in the classic L-BFGS-B wording.
    pub fn message(self) -> &'static str {
        match self {
            Task::Start => "START",
            Task::NewX => "NEW_X",
            Task::FgLineSearch => "FG_LNSRCH",
            Task::FgStart => "FG_START",
            Task::ConvergedProjectedGradient => "CONVERGENCE: NORM_OF_PROJECTED_GRADIENT_<=_PGTOL",
            Task::ConvergedRelativeReduction => "CONVERGENCE: REL_REDUCTION_OF_F_<=_FACTR*EPSMCH",
            Task::AbnormalLineSearch => "ABNORMAL_TERMINATION_IN_LNSRCH",
            Task::ErrorDimension => "ERROR: N .LE. 0",
            Task::ErrorHistorySize => "ERROR: M .LE. 0",
            Task::ErrorFactr => "ERROR: FACTR .LT. 0",
            Task::ErrorPgtol => "ERROR: PGTOL .LT. 0",
            Task::ErrorInvalidNbd => "ERROR: INVALID NBD",
            Task::ErrorInfeasible => "ERROR: NO FEASIBLE SOLUTION",
            Task::ErrorWorkspace => "ERROR: WORK ARRAY TOO SMALL",
        }
    }
}

impl TryFrom<i32> for Task {
    type Error = OptError;

    fn try_from(code: i32) -> OptResult<Self> {
        let task = match code {
            0 => Task::Start,
            1 => Task::NewX,
            2 => Task::FgLineSearch,
            3 => Task::FgStart,
            4 => Task::ConvergedProjectedGradient,
            5 => Task::ConvergedRelativeReduction,
            6 => Task::AbnormalLineSearch,
            7 => Task::ErrorDimension,
            8 => Task::ErrorHistorySize,
            9 => Task::ErrorFactr,
            10 => Task::ErrorPgtol,
            11 => Task::ErrorInvalidNbd,
            12 => Task::ErrorInfeasible,
            13 => Task::ErrorWorkspace,
            _ => return Err(OptError::ProtocolViolation { code }),
        };
        Ok(task)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
