//! Solver traits for abstraction over different solver backends.

use crate::{LazyConstraints, SolverConfig, SolverError, SolverStatus};

/// Read access to a solver result.
pub trait SolutionView {
    /// Objective value in the model's own sense.
    fn objective_value(&self) -> f64;

    /// Get the solver status.
    fn status(&self) -> SolverStatus;

    /// Get the primal value at the given index.
    fn get_primal(&self, index: usize) -> Option<f64>;

    /// Get all primal values as a slice.
    fn primal_values(&self) -> &[f64];

    /// Wall-clock solve time in seconds, summed over lazy-constraint rounds.
    fn solve_time_seconds(&self) -> f64;

    /// Relative MIP gap reported for the final round.
    fn mip_gap(&self) -> f64;

    /// Check if the solution is optimal.
    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    /// Check if the solution is feasible.
    fn is_feasible(&self) -> bool {
        self.status().is_feasible()
    }
}

/// Trait for solver implementations.
pub trait Solve {
    /// The solution type returned by this solver.
    type Solution: SolutionView;

    /// Register a lazy-constraint callback for subsequent solves.
    fn set_lazy_constraints(&mut self, callback: Box<dyn LazyConstraints + Send>);

    /// Solve the model with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` if:
    /// - No objective is set
    /// - A lazy-constraint callback returns an invalid cut
    /// - The solver stops without a usable solution
    fn solve(&mut self, config: &SolverConfig) -> Result<Self::Solution, SolverError>;
}
