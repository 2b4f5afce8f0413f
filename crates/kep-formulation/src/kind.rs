//! Closed set of formulations and dispatch to their builders.

use crate::error::FormulationError;
use crate::formulation::{Formulation, VariableMap};
use crate::formulations::{arc, cycle, extended_edge, mtz};
use crate::separator::{SeparationKind, Separator};
use kep_core::Model;
use kep_graph::Compatibility;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// A MILP encoding of the kidney exchange problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormulationKind {
    #[serde(rename = "cycle")]
    Cycle,
    #[serde(rename = "arcPath")]
    ArcPath,
    #[serde(rename = "arcPathRowGen")]
    ArcPathRowGen,
    #[serde(rename = "arcCycleRowGen")]
    ArcCycleRowGen,
    #[serde(rename = "edge")]
    ExtendedEdge,
    #[serde(rename = "mtz")]
    Mtz,
}

impl FormulationKind {
    pub const ALL: [FormulationKind; 6] = [
        FormulationKind::Cycle,
        FormulationKind::ArcPath,
        FormulationKind::ArcPathRowGen,
        FormulationKind::ArcCycleRowGen,
        FormulationKind::ExtendedEdge,
        FormulationKind::Mtz,
    ];

    /// Name used on the command line and in result records.
    pub fn as_str(self) -> &'static str {
        match self {
            FormulationKind::Cycle => "cycle",
            FormulationKind::ArcPath => "arcPath",
            FormulationKind::ArcPathRowGen => "arcPathRowGen",
            FormulationKind::ArcCycleRowGen => "arcCycleRowGen",
            FormulationKind::ExtendedEdge => "edge",
            FormulationKind::Mtz => "mtz",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.as_str()).collect()
    }

    /// True for the variants that rely on a lazy-constraint separator.
    pub fn uses_row_generation(self) -> bool {
        matches!(
            self,
            FormulationKind::ArcPathRowGen | FormulationKind::ArcCycleRowGen
        )
    }

    /// Build the model for `instance` with cycles of at most `k` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`FormulationError::InvalidMaxCycleLength`] if `k < 1`, before
    /// anything is enumerated, or a wrapped model error.
    pub fn build(self, instance: &Compatibility, k: usize) -> Result<Formulation, FormulationError> {
        if k < 1 {
            return Err(FormulationError::InvalidMaxCycleLength { k });
        }

        let started = Instant::now();
        let mut model = Model::new();
        let mut separator = None;
        let mut path_rows = 0usize;

        let variables = match self {
            FormulationKind::Cycle => VariableMap::Cycles(cycle::build(&mut model, instance, k)?),
            FormulationKind::ArcPath => {
                let arcs = arc::build_base(&mut model, instance)?;
                path_rows = arc::add_path_rows(&mut model, instance, &arcs, k)?;
                VariableMap::Arcs(arcs)
            }
            FormulationKind::ArcPathRowGen | FormulationKind::ArcCycleRowGen => {
                let arcs = arc::build_base(&mut model, instance)?;
                let kind = if self == FormulationKind::ArcPathRowGen {
                    SeparationKind::Paths
                } else {
                    SeparationKind::Cycles
                };
                separator = Some(Separator::new(kind, arcs.clone(), k));
                VariableMap::Arcs(arcs)
            }
            FormulationKind::ExtendedEdge => {
                VariableMap::Layered(extended_edge::build(&mut model, instance, k)?)
            }
            FormulationKind::Mtz => VariableMap::Mtz(mtz::build(&mut model, instance, k)?),
        };

        debug!(
            component = "formulation",
            operation = "build",
            status = "success",
            formulation = self.as_str(),
            n = instance.len(),
            k,
            variables = model.num_variables() as u64,
            constraints = model.num_constraints() as u64,
            nnz = model.num_coefficients() as u64,
            path_rows = path_rows as u64,
            row_generation = separator.is_some(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Built formulation"
        );

        Ok(Formulation::new(self, k, model, variables, separator))
    }
}

impl fmt::Display for FormulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormulationKind {
    type Err = FormulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormulationError::UnknownFormulation {
                name: s.to_string(),
            })
    }
}
