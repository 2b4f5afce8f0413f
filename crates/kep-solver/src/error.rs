//! Solver error types.

use crate::SolverStatus;

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No objective function set.
    NoObjective,
    /// Invalid variable ID referenced by the model or a callback.
    InvalidVariableId(u32),
    /// A lazy-constraint callback produced a cut the model cannot hold.
    InvalidCut { reason: String },
    /// Internal solver error.
    InternalError(String),
    /// Solver finished without a usable solution.
    SolveFailure {
        /// The solver status that caused the failure.
        status: SolverStatus,
    },
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::NoObjective => "OBJECTIVE_MISSING",
            SolverError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            SolverError::InvalidCut { .. } => "LAZY_INVALID_CUT",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolverStatus::ReachedTimeLimit => "SOLVER_TIME_LIMIT",
                SolverStatus::ReachedIterationLimit => "SOLVER_ITERATION_LIMIT",
                _ => "SOLVER_INTERNAL",
            },
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::NoObjective => write!(f, "[{}] Model has no objective", self.code()),
            SolverError::InvalidVariableId(var_id) => {
                write!(f, "[{}] Variable ID {} does not exist", self.code(), var_id)
            }
            SolverError::InvalidCut { reason } => {
                write!(f, "[{}] Lazy constraint rejected: {}", self.code(), reason)
            }
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] {}", self.code(), status_message(*status))
            }
        }
    }
}

fn status_message(status: SolverStatus) -> &'static str {
    match status {
        SolverStatus::Infeasible => "Problem is infeasible",
        SolverStatus::Unbounded => "Problem is unbounded",
        SolverStatus::ReachedTimeLimit => "Solver reached time limit without a solution",
        SolverStatus::ReachedIterationLimit => {
            "Solver reached iteration limit without a solution"
        }
        SolverStatus::Unknown => "Solver status unknown",
        SolverStatus::Optimal => "Solver returned optimal",
    }
}

impl std::error::Error for SolverError {}
