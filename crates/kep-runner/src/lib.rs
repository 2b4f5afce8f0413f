//! Experiment runner for comparing KEP formulations.
//!
//! A [`RunConfig`] names a formulation, a generated instance and solver
//! settings. [`run_once`] turns it into a [`RunResult`]; [`run_batch`] runs
//! many of them on a rayon pool. [`ExperimentGrid`] expands comma-separated
//! parameter lists into the cartesian product of runs.

mod config;
mod error;
pub mod logging;
mod record;
mod run;

pub use config::{
    DEFAULT_DENSITY, DEFAULT_MAX_CYCLE_LENGTH, DEFAULT_NODES, DEFAULT_TIME_LIMIT_SECONDS,
    ExperimentGrid, FIRST_SEED, RunConfig,
};
pub use error::RunError;
pub use record::{RunResult, append_records_jsonl, load_records_jsonl};
pub use run::{default_parallelism, run_batch, run_once};
