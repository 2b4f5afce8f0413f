//! Status conversions for HiGHS integration.

use crate::ffi::HighsStatus;
use kep_solver::SolverStatus;

pub(crate) fn highs_to_status(status: HighsStatus) -> SolverStatus {
    match status {
        HighsStatus::Optimal => SolverStatus::Optimal,
        HighsStatus::Infeasible => SolverStatus::Infeasible,
        HighsStatus::Unbounded => SolverStatus::Unbounded,
        HighsStatus::UnboundedOrInfeasible => SolverStatus::Unknown,
        HighsStatus::ReachedTimeLimit => SolverStatus::ReachedTimeLimit,
        HighsStatus::ReachedIterationLimit => SolverStatus::ReachedIterationLimit,
        HighsStatus::Unknown => SolverStatus::Unknown,
    }
}

pub(crate) fn highs_status_string(status: HighsStatus) -> &'static str {
    match status {
        HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        other => highs_to_status(other).as_str(),
    }
}

pub(crate) fn highs_has_solution(status: HighsStatus) -> bool {
    matches!(
        status,
        HighsStatus::Optimal | HighsStatus::ReachedTimeLimit | HighsStatus::ReachedIterationLimit
    )
}
