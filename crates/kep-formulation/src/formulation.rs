//! Built formulation: the model, its index map and an optional separator.

use crate::arc_vars::ArcVariables;
use crate::formulations::{CycleVariables, MtzVariables};
use crate::kind::FormulationKind;
use crate::layered::LayeredArcVariables;
use crate::separator::Separator;
use kep_core::{Model, ModelStats};

/// Maps model columns back to graph structures.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableMap {
    Arcs(ArcVariables),
    Cycles(CycleVariables),
    Layered(LayeredArcVariables),
    Mtz(MtzVariables),
}

impl VariableMap {
    /// Arcs used by a primal solution, sorted and without duplicates.
    pub fn chosen_arcs(&self, values: &[f64]) -> Vec<(usize, usize)> {
        match self {
            VariableMap::Arcs(arcs) => arcs.chosen(values),
            VariableMap::Cycles(cycles) => cycles.chosen(values),
            VariableMap::Layered(layered) => layered.chosen(values),
            VariableMap::Mtz(mtz) => mtz.arcs.chosen(values),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Formulation {
    kind: FormulationKind,
    k: usize,
    model: Model,
    variables: VariableMap,
    separator: Option<Separator>,
}

impl Formulation {
    pub(crate) fn new(
        kind: FormulationKind,
        k: usize,
        model: Model,
        variables: VariableMap,
        separator: Option<Separator>,
    ) -> Self {
        Self {
            kind,
            k,
            model,
            variables,
            separator,
        }
    }

    pub fn kind(&self) -> FormulationKind {
        self.kind
    }

    pub fn max_cycle_length(&self) -> usize {
        self.k
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Lazy-constraint callback for the row-generation variants.
    pub fn separator(&self) -> Option<&Separator> {
        self.separator.as_ref()
    }

    pub fn stats(&self) -> ModelStats {
        self.model.stats()
    }

    /// Hand the model and separator to a solver, keeping the index map for
    /// reading the solution back.
    pub fn into_parts(self) -> (Model, VariableMap, Option<Separator>) {
        (self.model, self.variables, self.separator)
    }
}
