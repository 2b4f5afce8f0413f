//! Run configuration and the experiment grid.

use crate::error::RunError;
use kep_formulation::{FormulationError, FormulationKind};
use kep_graph::InstanceConfig;
use kep_solver::SolverConfig;

pub const DEFAULT_NODES: usize = 10;
pub const DEFAULT_MAX_CYCLE_LENGTH: usize = 3;
pub const DEFAULT_DENSITY: f64 = 0.2;
/// Thirty minutes per run.
pub const DEFAULT_TIME_LIMIT_SECONDS: f64 = 1800.0;
pub const FIRST_SEED: i32 = 42;

/// One solver run: an instance, a formulation of it and solver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub formulation: FormulationKind,
    pub instance: InstanceConfig,
    pub k: usize,
    pub solver: SolverConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(
            FormulationKind::Cycle,
            InstanceConfig::new(DEFAULT_NODES, DEFAULT_DENSITY, false, FIRST_SEED),
            DEFAULT_MAX_CYCLE_LENGTH,
        )
    }
}

impl RunConfig {
    /// Exact single-threaded solve with the default time limit.
    pub fn new(formulation: FormulationKind, instance: InstanceConfig, k: usize) -> Self {
        Self {
            formulation,
            instance,
            k,
            solver: SolverConfig::exact_single_thread(DEFAULT_TIME_LIMIT_SECONDS),
        }
    }

    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.solver.time_limit = Some(seconds);
        self
    }

    /// Reject invalid parameters before any instance or model is built.
    ///
    /// # Errors
    ///
    /// Returns the instance error for bad `n` or density, an invalid `k`
    /// error, or [`RunError::InvalidConfig`] for unusable solver limits.
    pub fn validate(&self) -> Result<(), RunError> {
        self.instance.validate()?;
        if self.k < 1 {
            return Err(FormulationError::InvalidMaxCycleLength { k: self.k }.into());
        }
        if let Some(limit) = self.solver.time_limit.filter(|t| !(t.is_finite() && *t > 0.0)) {
            return Err(RunError::InvalidConfig {
                reason: format!("time limit must be positive (got {limit})"),
            });
        }
        if let Some(gap) = self.solver.mip_gap.filter(|g| !(g.is_finite() && *g >= 0.0)) {
            return Err(RunError::InvalidConfig {
                reason: format!("mip gap must be non-negative (got {gap})"),
            });
        }
        Ok(())
    }
}

/// Lists of parameter values whose cartesian product forms an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentGrid {
    pub formulations: Vec<FormulationKind>,
    pub nodes: Vec<usize>,
    pub max_cycle_lengths: Vec<usize>,
    pub densities: Vec<f64>,
    pub real_weights: Vec<bool>,
    /// Seeds per combination, counting up from [`FIRST_SEED`].
    pub runs: usize,
    pub solver: SolverConfig,
}

impl Default for ExperimentGrid {
    fn default() -> Self {
        Self {
            formulations: vec![FormulationKind::Cycle],
            nodes: vec![DEFAULT_NODES],
            max_cycle_lengths: vec![DEFAULT_MAX_CYCLE_LENGTH],
            densities: vec![DEFAULT_DENSITY],
            real_weights: vec![false],
            runs: 1,
            solver: SolverConfig::exact_single_thread(DEFAULT_TIME_LIMIT_SECONDS),
        }
    }
}

impl ExperimentGrid {
    /// Expand the grid into run configurations.
    ///
    /// Nodes vary slowest, then density, cycle length, weight mode and
    /// formulation; seeds vary fastest so that every formulation sees the
    /// same instances.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] for an empty parameter list or zero
    /// runs, or the first invalid combination.
    pub fn expand(&self) -> Result<Vec<RunConfig>, RunError> {
        let empty = [
            ("formulation", self.formulations.is_empty()),
            ("n", self.nodes.is_empty()),
            ("k", self.max_cycle_lengths.is_empty()),
            ("density", self.densities.is_empty()),
            ("weights", self.real_weights.is_empty()),
        ];
        if let Some((name, _)) = empty.iter().find(|(_, is_empty)| *is_empty) {
            return Err(RunError::InvalidConfig {
                reason: format!("{name} list is empty"),
            });
        }
        if self.runs == 0 {
            return Err(RunError::InvalidConfig {
                reason: "runs must be greater than zero".to_string(),
            });
        }
        let runs = i32::try_from(self.runs).map_err(|_| RunError::InvalidConfig {
            reason: format!("too many runs ({})", self.runs),
        })?;

        let mut configs = Vec::new();
        for &n in &self.nodes {
            for &density in &self.densities {
                for &k in &self.max_cycle_lengths {
                    for &real_weights in &self.real_weights {
                        for &formulation in &self.formulations {
                            for offset in 0..runs {
                                let seed = FIRST_SEED.saturating_add(offset);
                                let config = RunConfig::new(
                                    formulation,
                                    InstanceConfig::new(n, density, real_weights, seed),
                                    k,
                                )
                                .with_solver_config(self.solver.clone());
                                config.validate()?;
                                configs.push(config);
                            }
                        }
                    }
                }
            }
        }
        Ok(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_reference_runner() {
        let config = RunConfig::default();
        assert_eq!(config.instance.n, 10);
        assert_eq!(config.k, 3);
        assert!((config.instance.density - 0.2).abs() < f64::EPSILON);
        assert!(!config.instance.real_weights);
        assert_eq!(config.instance.seed, 42);
        assert_eq!(config.solver.threads, Some(1));
        assert_eq!(config.solver.mip_gap, Some(0.0));
        assert_eq!(config.solver.time_limit, Some(1800.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let mut config = RunConfig::default();
        config.instance.n = 0;
        assert_eq!(config.validate().unwrap_err().code(), "GRAPH_INVALID_NODE_COUNT");

        let mut config = RunConfig::default();
        config.instance.density = 1.5;
        assert_eq!(config.validate().unwrap_err().code(), "GRAPH_INVALID_DENSITY");

        let mut config = RunConfig::default();
        config.k = 0;
        assert_eq!(config.validate().unwrap_err().code(), "FORMULATION_INVALID_K");

        let config = RunConfig::default().with_time_limit(0.0);
        assert_eq!(config.validate().unwrap_err().code(), "RUN_INVALID_CONFIG");

        let config =
            RunConfig::default().with_solver_config(SolverConfig::new().with_mip_gap(-0.1));
        assert_eq!(config.validate().unwrap_err().code(), "RUN_INVALID_CONFIG");
    }

    #[test]
    fn grid_expands_to_cartesian_product() {
        let grid = ExperimentGrid {
            formulations: vec![FormulationKind::Cycle, FormulationKind::Mtz],
            nodes: vec![10, 20],
            max_cycle_lengths: vec![3],
            densities: vec![0.2, 0.5],
            real_weights: vec![true],
            runs: 3,
            ..ExperimentGrid::default()
        };
        let configs = grid.expand().unwrap();
        assert_eq!(configs.len(), 2 * 2 * 2 * 3);

        let first = &configs[0];
        assert_eq!(first.formulation, FormulationKind::Cycle);
        assert_eq!(first.instance.n, 10);
        assert_eq!(first.instance.seed, 42);
        assert_eq!(configs[2].instance.seed, 44);
        assert_eq!(configs[3].formulation, FormulationKind::Mtz);
        assert_eq!(configs[3].instance.seed, 42);
        assert_eq!(configs.last().map(|c| c.instance.n), Some(20));
    }

    #[test]
    fn grid_rejects_empty_lists_and_invalid_values() {
        let grid = ExperimentGrid {
            densities: Vec::new(),
            ..ExperimentGrid::default()
        };
        let err = grid.expand().unwrap_err();
        assert_eq!(err.code(), "RUN_INVALID_CONFIG");
        assert!(err.to_string().contains("density"));

        let grid = ExperimentGrid {
            runs: 0,
            ..ExperimentGrid::default()
        };
        assert!(grid.expand().is_err());

        let grid = ExperimentGrid {
            max_cycle_lengths: vec![3, 0],
            ..ExperimentGrid::default()
        };
        assert_eq!(grid.expand().unwrap_err().code(), "FORMULATION_INVALID_K");
    }
}
