//! Single runs and their parallel fan-out.

use crate::config::RunConfig;
use crate::error::RunError;
use crate::record::RunResult;
use kep_highs::Solver;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

/// Number of workers used when the caller does not choose one.
pub fn default_parallelism() -> usize {
    num_cpus::get().max(1)
}

/// Generate the instance, build the formulation and solve it.
///
/// The objective is reported as the total weight of the chosen cycles, the
/// negation of the minimized model objective.
///
/// # Errors
///
/// Returns a configuration error before anything is built, or the error of
/// the failing stage.
pub fn run_once(config: &RunConfig) -> Result<RunResult, RunError> {
    config.validate()?;
    let started = Instant::now();

    let instance = config.instance.generate()?;
    let formulation = config.formulation.build(&instance, config.k)?;
    let mut result = RunResult::echo(config, formulation.stats());

    let (model, _, separator) = formulation.into_parts();
    let mut solver = Solver::new(model)?;
    if let Some(separator) = separator {
        solver.set_lazy_constraints(separator);
    }
    result.setup_seconds = started.elapsed().as_secs_f64();

    let solution = solver.solve_with_config(&config.solver)?;
    result.objective = 0.0 - solution.objective_value();
    result.solve_seconds = solution.solve_time_seconds();
    result.mip_gap = Some(solution.mip_gap()).filter(|gap| gap.is_finite());
    result.status = solution.status_str().to_string();
    result.lazy_rounds = solution.lazy_rounds();
    result.lazy_cuts = solution.lazy_cuts();
    result.lazy_satisfied = solution.lazy_satisfied();

    if result.is_optimal() {
        debug!(
            component = "runner",
            operation = "run",
            status = "success",
            formulation = config.formulation.as_str(),
            n = result.n,
            k = result.k,
            seed = result.seed,
            objective = result.objective,
            lazy_rounds = result.lazy_rounds,
            setup_ms = result.setup_seconds * 1000.0,
            duration_ms = result.solve_seconds * 1000.0,
            "Run finished"
        );
    } else {
        warn!(
            component = "runner",
            operation = "run",
            status = "warn",
            formulation = config.formulation.as_str(),
            n = result.n,
            k = result.k,
            seed = result.seed,
            solver_status = result.status.as_str(),
            lazy_satisfied = result.lazy_satisfied,
            objective = result.objective,
            duration_ms = result.solve_seconds * 1000.0,
            "Run stopped before proving optimality"
        );
    }

    Ok(result)
}

/// Execute independent runs on a pool of `parallelism` workers.
///
/// Results come back in the order of `configs`; a failing run does not stop
/// the others.
///
/// # Errors
///
/// Returns [`RunError::ThreadPool`] if the pool cannot be created.
pub fn run_batch(
    configs: &[RunConfig],
    parallelism: usize,
) -> Result<Vec<Result<RunResult, RunError>>, RunError> {
    let started = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()
        .map_err(|err| RunError::ThreadPool {
            reason: err.to_string(),
        })?;

    let results: Vec<Result<RunResult, RunError>> =
        pool.install(|| configs.par_iter().map(run_once).collect());

    let failed = results.iter().filter(|result| result.is_err()).count();
    debug!(
        component = "runner",
        operation = "batch",
        status = if failed == 0 { "success" } else { "partial" },
        runs = configs.len() as u64,
        failed = failed as u64,
        parallelism = parallelism.max(1) as u64,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Batch finished"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kep_formulation::FormulationKind;
    use kep_graph::InstanceConfig;

    fn small(formulation: FormulationKind, seed: i32) -> RunConfig {
        RunConfig::new(formulation, InstanceConfig::new(8, 0.3, true, seed), 3)
            .with_time_limit(60.0)
    }

    #[test]
    fn run_once_reports_positive_weight_and_echoes_config() {
        let result = run_once(&small(FormulationKind::Cycle, 42)).unwrap();
        assert_eq!(result.formulation, FormulationKind::Cycle);
        assert_eq!((result.n, result.k, result.seed), (8, 3, 42));
        assert!(result.objective >= 0.0);
        assert!(result.is_optimal());
        assert!(result.model.variables > 0);
    }

    #[test]
    fn run_once_rejects_invalid_config_before_building() {
        let mut config = small(FormulationKind::ArcPath, 42);
        config.instance.n = 0;
        assert_eq!(run_once(&config).unwrap_err().code(), "GRAPH_INVALID_NODE_COUNT");
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let mut bad = small(FormulationKind::Mtz, 42);
        bad.k = 0;
        let configs = vec![
            small(FormulationKind::Cycle, 42),
            bad,
            small(FormulationKind::ArcPathRowGen, 42),
        ];
        let results = run_batch(&configs, 2).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        let first = results[0].as_ref().unwrap();
        let last = results[2].as_ref().unwrap();
        assert_eq!(last.formulation, FormulationKind::ArcPathRowGen);
        assert!((first.objective - last.objective).abs() < 1e-6);
    }

    #[test]
    fn default_parallelism_is_positive() {
        assert!(default_parallelism() >= 1);
    }
}
