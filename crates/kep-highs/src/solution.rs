//! Solution type and trait implementations.

use crate::ffi::HighsStatus;
use crate::status::{highs_status_string, highs_to_status};
use kep_solver::{SolutionView, SolverStatus};

/// Solution from HiGHS solver
#[derive(Debug, Clone)]
pub struct Solution {
    /// Primal values indexed by variable position
    pub(crate) primal_values: Vec<f64>,
    /// Objective value in the model's sense
    pub(crate) objective_value: f64,
    /// Status of the last HiGHS round, possibly overridden by a lazy-loop limit
    pub(crate) status: HighsStatus,
    /// Wall-clock seconds across all rounds
    pub(crate) solve_time_seconds: f64,
    /// Relative MIP gap of the last round
    pub(crate) mip_gap: f64,
    /// Rounds in which the lazy-constraint callback returned cuts
    pub(crate) lazy_rounds: u32,
    /// Cuts appended to the model by the callback
    pub(crate) lazy_cuts: usize,
    /// False when the loop stopped on a limit with cuts still violated
    pub(crate) lazy_satisfied: bool,
}

impl Solution {
    /// Trivial optimum of a model without columns.
    pub(crate) fn empty(objective_value: f64) -> Self {
        Self {
            primal_values: Vec::new(),
            objective_value,
            status: HighsStatus::Optimal,
            solve_time_seconds: 0.0,
            mip_gap: 0.0,
            lazy_rounds: 0,
            lazy_cuts: 0,
            lazy_satisfied: true,
        }
    }

    /// Get the primal value of a variable at the given index
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }

    /// Get all primal values
    pub fn primal_values(&self) -> &[f64] {
        &self.primal_values
    }

    /// Get the objective value
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Get the HiGHS-specific status
    pub fn highs_status(&self) -> HighsStatus {
        self.status
    }

    /// HiGHS status as a stable string.
    pub fn status_str(&self) -> &'static str {
        highs_status_string(self.status)
    }

    /// Get solve time in seconds
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    /// Get relative MIP gap
    pub fn mip_gap(&self) -> f64 {
        self.mip_gap
    }

    pub fn lazy_rounds(&self) -> u32 {
        self.lazy_rounds
    }

    pub fn lazy_cuts(&self) -> usize {
        self.lazy_cuts
    }

    /// Whether the final incumbent passed the lazy-constraint callback.
    pub fn lazy_satisfied(&self) -> bool {
        self.lazy_satisfied
    }
}

impl SolutionView for Solution {
    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn status(&self) -> SolverStatus {
        highs_to_status(self.status)
    }

    fn get_primal(&self, index: usize) -> Option<f64> {
        Solution::get_primal(self, index)
    }

    fn primal_values(&self) -> &[f64] {
        &self.primal_values
    }

    fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    fn mip_gap(&self) -> f64 {
        self.mip_gap
    }
}
