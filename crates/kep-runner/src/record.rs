//! Result records written one JSON object per line.

use crate::config::RunConfig;
use kep_core::ModelStats;
use kep_formulation::FormulationKind;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Outcome of one run together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub formulation: FormulationKind,
    pub n: usize,
    pub k: usize,
    pub density: f64,
    pub seed: i32,
    pub real_weights: bool,
    /// Total weight of the chosen cycles.
    pub objective: f64,
    /// Instance generation, model construction and solver setup.
    pub setup_seconds: f64,
    /// Solver wall-clock time over all lazy-constraint rounds.
    pub solve_seconds: f64,
    /// Relative MIP gap, absent when the solver reports none.
    pub mip_gap: Option<f64>,
    pub status: String,
    pub lazy_rounds: u32,
    pub lazy_cuts: usize,
    pub lazy_satisfied: bool,
    /// Size of the model before any lazy cut was added.
    pub model: ModelStats,
}

impl RunResult {
    pub(crate) fn echo(config: &RunConfig, model: ModelStats) -> Self {
        Self {
            formulation: config.formulation,
            n: config.instance.n,
            k: config.k,
            density: config.instance.density,
            seed: config.instance.seed,
            real_weights: config.instance.real_weights,
            objective: 0.0,
            setup_seconds: 0.0,
            solve_seconds: 0.0,
            mip_gap: None,
            status: String::new(),
            lazy_rounds: 0,
            lazy_cuts: 0,
            lazy_satisfied: true,
            model,
        }
    }

    /// Whether the run proved optimality with every lazy cut satisfied.
    pub fn is_optimal(&self) -> bool {
        self.status == "optimal" && self.lazy_satisfied
    }
}

/// Append records to a JSONL file, creating it and its parent directories.
///
/// # Errors
///
/// Returns any I/O or serialization error.
pub fn append_records_jsonl(
    path: &Path,
    records: &[RunResult],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Load every record of a JSONL file, skipping blank lines.
///
/// # Errors
///
/// Returns any I/O error or the first malformed line.
pub fn load_records_jsonl(path: &Path) -> Result<Vec<RunResult>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: i32) -> RunResult {
        let mut record = RunResult::echo(
            &RunConfig::default(),
            ModelStats {
                variables: 12,
                integer_variables: 12,
                constraints: 10,
                nonzeros: 30,
            },
        );
        record.seed = seed;
        record.objective = 3.0;
        record.status = "optimal".to_string();
        record
    }

    #[test]
    fn record_serializes_formulation_by_name() {
        let json = serde_json::to_value(sample(42)).unwrap();
        assert_eq!(json["formulation"], "cycle");
        assert_eq!(json["model"]["variables"], 12);
        assert!(json["mip_gap"].is_null());
    }

    #[test]
    fn append_then_load_keeps_every_record() {
        let dir = std::env::temp_dir().join(format!("kep-runner-record-{}", std::process::id()));
        let path = dir.join("nested").join("results.jsonl");
        let _ = std::fs::remove_dir_all(&dir);

        append_records_jsonl(&path, &[sample(42)]).unwrap();
        append_records_jsonl(&path, &[sample(43), sample(44)]).unwrap();
        let loaded = load_records_jsonl(&path).unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2], sample(44));
        assert!(loaded.iter().all(RunResult::is_optimal));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
