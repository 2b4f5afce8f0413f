//! HiGHS solver implementation.

use crate::ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense};
use crate::solution::Solution;
use crate::status::{highs_has_solution, highs_status_string, highs_to_status};
use kep_core::{Model, Sense};
use kep_solver::{Incumbent, LazyConstraints, Solve, SolverConfig, SolverError, SolverStatus};
use std::time::Instant;
use tracing::{debug, trace, warn};

fn highs_model_error_to_solver_error(err: HighsModelError) -> SolverError {
    SolverError::InternalError(err.to_string())
}

/// Owns a model and solves it with HiGHS, driving lazy constraints if registered.
pub struct Solver {
    model: Model,
    config: SolverConfig,
    lazy: Option<Box<dyn LazyConstraints + Send>>,
}

impl Solver {
    /// Create a new solver from a Model.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoObjective`] if the model has no objective sense.
    pub fn new(model: Model) -> Result<Self, SolverError> {
        validate_model(&model)?;

        debug!(
            component = "solver",
            operation = "init",
            status = "success",
            variables = model.num_variables() as u64,
            constraints = model.num_constraints() as u64,
            nnz = model.num_coefficients() as u64,
            "Creating solver from model"
        );

        Ok(Solver {
            model,
            config: SolverConfig::new(),
            lazy: None,
        })
    }

    fn update_config(&mut self, update: impl FnOnce(SolverConfig) -> SolverConfig) {
        self.config = update(std::mem::take(&mut self.config));
    }

    /// Enable or disable HiGHS logging to console for the next solve.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.update_config(|config| config.with_log_to_console(enabled));
    }

    /// Set a time limit in seconds for the next solve.
    pub fn set_time_limit(&mut self, seconds: f64) {
        self.update_config(|config| config.with_time_limit(seconds));
    }

    /// Set a relative MIP gap for the next solve.
    pub fn set_mip_gap(&mut self, gap: f64) {
        self.update_config(|config| config.with_mip_gap(gap));
    }

    /// Set thread count for the next solve.
    pub fn set_threads(&mut self, threads: u32) {
        self.update_config(|config| config.with_threads(threads));
    }

    /// Get access to the current solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Set the solver configuration.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// The model, including every row added by lazy-constraint rounds.
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Register a lazy-constraint callback, replacing any previous one.
    pub fn set_lazy_constraints(&mut self, callback: impl LazyConstraints + Send + 'static) {
        self.lazy = Some(Box::new(callback));
    }

    pub fn has_lazy_constraints(&self) -> bool {
        self.lazy.is_some()
    }

    /// Solve the model and return the solution
    pub fn solve(&mut self) -> Result<Solution, SolverError> {
        self.solve_with_config(&self.config.clone())
    }

    /// Solve the model with a specific configuration.
    ///
    /// Without a lazy-constraint callback this is a single HiGHS solve. With
    /// one, every round's incumbent is separated; returned cuts are appended
    /// to the owned model and the model is solved again. `time_limit` bounds
    /// the total wall-clock time over all rounds.
    pub fn solve_with_config(&mut self, config: &SolverConfig) -> Result<Solution, SolverError> {
        let started = Instant::now();
        let mut lazy_rounds: u32 = 0;
        let mut lazy_cuts: usize = 0;

        loop {
            let round_config = config_for_round(config, started.elapsed().as_secs_f64());
            let mut solution = solve_model(&self.model, &round_config)?;
            solution.solve_time_seconds = started.elapsed().as_secs_f64();
            solution.lazy_rounds = lazy_rounds;
            solution.lazy_cuts = lazy_cuts;

            let Some(callback) = self.lazy.as_mut() else {
                return Ok(solution);
            };
            if self.model.num_variables() == 0 {
                return Ok(solution);
            }

            let cuts = callback.separate(&Incumbent::new(
                &solution.primal_values,
                solution.objective_value,
                lazy_rounds,
            ));
            if cuts.is_empty() {
                debug!(
                    component = "solver",
                    operation = "lazy_constraints",
                    status = "success",
                    lazy_rounds,
                    lazy_cuts,
                    objective_value = solution.objective_value,
                    duration_ms = solution.solve_time_seconds * 1000.0,
                    "Incumbent accepted by lazy constraints"
                );
                return Ok(solution);
            }

            let round_cuts = cuts.len();
            for cut in cuts {
                self.model
                    .add_constraint_expr(cut)
                    .map_err(|err| SolverError::InvalidCut {
                        reason: err.to_string(),
                    })?;
            }
            lazy_rounds += 1;
            lazy_cuts += round_cuts;
            debug!(
                component = "solver",
                operation = "lazy_constraints",
                status = "cuts_added",
                round = lazy_rounds,
                round_cuts,
                lazy_cuts,
                constraints = self.model.num_constraints() as u64,
                "Added lazy constraints; re-solving"
            );

            let stop_status = if solution.status != HighsStatus::Optimal {
                Some(solution.status)
            } else if time_exhausted(config, started) {
                Some(HighsStatus::ReachedTimeLimit)
            } else if config
                .max_lazy_rounds
                .is_some_and(|limit| lazy_rounds >= limit)
            {
                Some(HighsStatus::ReachedIterationLimit)
            } else {
                None
            };

            if let Some(status) = stop_status {
                warn!(
                    component = "solver",
                    operation = "lazy_constraints",
                    status = "warn",
                    solver_status = highs_status_string(status),
                    lazy_rounds,
                    lazy_cuts,
                    objective_value = solution.objective_value,
                    "Stopped with an incumbent that violates lazy constraints"
                );
                solution.status = status;
                solution.lazy_rounds = lazy_rounds;
                solution.lazy_cuts = lazy_cuts;
                solution.lazy_satisfied = false;
                solution.solve_time_seconds = started.elapsed().as_secs_f64();
                return Ok(solution);
            }
        }
    }
}

impl Solve for Solver {
    type Solution = Solution;

    fn set_lazy_constraints(&mut self, callback: Box<dyn LazyConstraints + Send>) {
        self.lazy = Some(callback);
    }

    fn solve(&mut self, config: &SolverConfig) -> Result<Self::Solution, SolverError> {
        self.solve_with_config(config)
    }
}

/// Validate that a model is ready for solving.
fn validate_model(model: &Model) -> Result<(), SolverError> {
    if model.objective().sense.is_none() {
        return Err(SolverError::NoObjective);
    }
    Ok(())
}

fn config_for_round(config: &SolverConfig, elapsed_seconds: f64) -> SolverConfig {
    let mut round = config.clone();
    if let Some(limit) = config.time_limit {
        round.time_limit = Some((limit - elapsed_seconds).max(0.0));
    }
    round
}

fn time_exhausted(config: &SolverConfig, started: Instant) -> bool {
    config
        .time_limit
        .is_some_and(|limit| started.elapsed().as_secs_f64() >= limit)
}

fn apply_solver_config(highs_model: &mut HighsModel, config: &SolverConfig) {
    let log_to_console = config.log_to_console.unwrap_or(false);
    let verbose = config.verbosity.is_some_and(|level| level > 0);
    highs_model.set_quiet(!log_to_console && !verbose);
    if log_to_console {
        highs_model.set_option("log_to_console", HighsOption::Bool(true));
        highs_model.set_option("output_flag", HighsOption::Bool(true));
    }

    if let Some(limit) = config.time_limit {
        highs_model.set_option("time_limit", HighsOption::Float(limit));
    }
    if let Some(gap) = config.mip_gap {
        highs_model.set_option("mip_rel_gap", HighsOption::Float(gap));
    }
    if let Some(presolve) = config.presolve {
        let presolve_str = if presolve { "on" } else { "off" };
        highs_model.set_option("presolve", HighsOption::Str(presolve_str.to_string()));
    }
    if let Some(threads) = config.threads {
        highs_model.set_option("threads", HighsOption::Int(threads as i32));
    }
    if let Some(tolerance) = config.tolerance {
        highs_model.set_option(
            "primal_feasibility_tolerance",
            HighsOption::Float(tolerance),
        );
        highs_model.set_option("mip_feasibility_tolerance", HighsOption::Float(tolerance));
    }
}

fn add_variables_to_highs(model: &Model, highs_model: &mut HighsModel) -> Vec<usize> {
    let objective_coeffs = model.objective_coefficients();
    let mut var_to_col = Vec::with_capacity(model.num_variables());

    for (var_id, var) in model.variables() {
        let obj_coeff = objective_coeffs
            .get(var_id.index())
            .copied()
            .unwrap_or(0.0);
        let col_idx = if var.is_integer {
            highs_model.add_integer_col(var.bounds.lower, var.bounds.upper, obj_coeff)
        } else {
            highs_model.add_col(var.bounds.lower, var.bounds.upper, obj_coeff)
        };
        var_to_col.push(col_idx);

        trace!(
            component = "solver",
            operation = "add_variable",
            status = "success",
            var_id = var_id.inner(),
            col_idx,
            lower = var.bounds.lower,
            upper = var.bounds.upper,
            obj_coeff,
            is_integer = var.is_integer,
            "Added variable to HiGHS"
        );
    }

    var_to_col
}

fn add_constraints_to_highs(
    model: &Model,
    highs_model: &mut HighsModel,
    var_to_col: &[usize],
) -> Result<(), SolverError> {
    let matrix_build_started = Instant::now();
    let rows = model.rows();
    for ((constraint_id, constraint), row) in model.constraints().zip(rows) {
        let mut entries = Vec::with_capacity(row.len());
        for (var_id, coeff) in row {
            let col_idx = var_to_col
                .get(var_id.index())
                .copied()
                .ok_or(SolverError::InvalidVariableId(var_id.inner()))?;
            entries.push((col_idx, coeff));
        }
        highs_model
            .add_row(constraint.bounds.lower, constraint.bounds.upper, &entries)
            .map_err(highs_model_error_to_solver_error)?;

        trace!(
            component = "solver",
            operation = "add_constraint",
            status = "success",
            constraint_id = constraint_id.inner(),
            num_coeffs = entries.len(),
            "Added constraint to HiGHS"
        );
    }

    debug!(
        component = "solver",
        operation = "build_rows",
        status = "success",
        num_constraints = model.num_constraints(),
        duration_ms = matrix_build_started.elapsed().as_secs_f64() * 1000.0,
        "Added all constraints to HiGHS"
    );

    Ok(())
}

/// Single HiGHS solve of the model as it stands.
fn solve_model(model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
    validate_model(model)?;
    let sense = model.objective().sense.ok_or(SolverError::NoObjective)?;

    if model.num_variables() == 0 {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            "Model has no columns; returning the trivial optimum"
        );
        return Ok(Solution::empty(0.0));
    }

    let solver_version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
    let solve_started = Instant::now();
    debug!(
        component = "solver",
        operation = "solve",
        status = "start",
        solver = "highs",
        solver_version = %solver_version,
        variables = model.num_variables() as u64,
        constraints = model.num_constraints() as u64,
        "Starting solve process"
    );

    let mut highs_model = HighsModel::new();
    apply_solver_config(&mut highs_model, config);
    highs_model.set_objective_sense(match sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });

    let var_to_col = add_variables_to_highs(model, &mut highs_model);
    add_constraints_to_highs(model, &mut highs_model, &var_to_col)?;

    let status = highs_model.solve();
    let solve_ms = solve_started.elapsed().as_secs_f64() * 1000.0;
    let mip_gap = highs_model.mip_gap();
    let objective_value_log = highs_model.objective_value().unwrap_or(f64::NAN);

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        solver_status = highs_status_string(status),
        objective_value = objective_value_log,
        mip_gap,
        duration_ms = solve_ms,
        "HiGHS solve completed"
    );

    if !highs_has_solution(status) {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "highs",
            solver_status = highs_status_string(status),
            duration_ms = solve_ms,
            "Solver did not find a solution"
        );
        return Err(SolverError::SolveFailure {
            status: highs_to_status(status),
        });
    }

    let primal_values = highs_model
        .col_values()
        .map_err(highs_model_error_to_solver_error)?;
    if primal_values.len() != model.num_variables() {
        // A limit hit before the first incumbent leaves no primal vector.
        return Err(SolverError::SolveFailure {
            status: if status == HighsStatus::Optimal {
                SolverStatus::Unknown
            } else {
                highs_to_status(status)
            },
        });
    }
    let objective_value = highs_model
        .objective_value()
        .map_err(highs_model_error_to_solver_error)?;

    Ok(Solution {
        primal_values,
        objective_value,
        status,
        solve_time_seconds: solve_started.elapsed().as_secs_f64(),
        mip_gap,
        lazy_rounds: 0,
        lazy_cuts: 0,
        lazy_satisfied: true,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_new_rejects_missing_objective() {
        let result = Solver::new(Model::new());
        assert!(matches!(result, Err(SolverError::NoObjective)));
    }

    #[test]
    fn test_config_for_round_shrinks_time_limit() {
        let config = SolverConfig::new().with_time_limit(10.0).with_threads(1);
        let round = config_for_round(&config, 4.0);
        assert_eq!(round.time_limit, Some(6.0));
        assert_eq!(round.threads, Some(1));

        let spent = config_for_round(&config, 12.0);
        assert_eq!(spent.time_limit, Some(0.0));

        let unlimited = config_for_round(&SolverConfig::new(), 100.0);
        assert_eq!(unlimited.time_limit, None);
    }

    #[test]
    fn test_setters_update_config() {
        let mut model = Model::new();
        model.minimize(kep_expr::Expr::new_empty()).unwrap();
        let mut solver = Solver::new(model).unwrap();
        solver.set_time_limit(5.0);
        solver.set_mip_gap(0.0);
        solver.set_threads(1);
        solver.set_log_to_console(false);

        let config = solver.config();
        assert_eq!(config.time_limit, Some(5.0));
        assert_eq!(config.mip_gap, Some(0.0));
        assert_eq!(config.threads, Some(1));
        assert!(!solver.has_lazy_constraints());
    }
}
