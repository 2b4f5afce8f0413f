//! Cycle formulation: one column per short cycle, one packing row per node.

use kep_core::{Bounds, Constraint, Model, ModelError, Variable};
use kep_expr::{ConstraintId, Expr, VariableId};
use kep_graph::{Compatibility, CycleEnumerator, cycle_arcs};

/// Enumerated cycles and their column ids, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleVariables {
    cycles: Vec<(Vec<usize>, VariableId)>,
}

impl CycleVariables {
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], VariableId)> + '_ {
        self.cycles
            .iter()
            .map(|(cycle, id)| (cycle.as_slice(), *id))
    }

    /// Arcs of every cycle whose column is set.
    pub fn chosen(&self, values: &[f64]) -> Vec<(usize, usize)> {
        let mut arcs: Vec<(usize, usize)> = self
            .cycles
            .iter()
            .filter(|(_, id)| values.get(id.index()).is_some_and(|v| *v > 0.5))
            .flat_map(|(cycle, _)| cycle_arcs(cycle).collect::<Vec<_>>())
            .collect();
        arcs.sort_unstable();
        arcs
    }
}

/// Rows first, then one binary column per cycle of at most `k` nodes with
/// objective `-Σ w` over its arcs and a 1 in the row of each of its nodes.
pub(crate) fn build(
    model: &mut Model,
    instance: &Compatibility,
    k: usize,
) -> Result<CycleVariables, ModelError> {
    let n = instance.len();
    let mut rows: Vec<ConstraintId> = Vec::with_capacity(n);
    for node in 0..n {
        let row = model.add_constraint(Constraint {
            bounds: Bounds::at_most(1.0),
        })?;
        model.set_constraint_name(row, format!("pack[{node}]"))?;
        rows.push(row);
    }

    let mut cycles = Vec::new();
    let mut objective = Expr::new_empty();
    for cycle in CycleEnumerator::new(instance.arcs(), k) {
        let id = model.add_named_variable(Variable::binary(), format!("c{}", cycles.len()))?;
        for node in &cycle {
            model.set_coefficient(id, rows[*node], 1.0)?;
        }
        objective.push_term(id, -instance.cycle_weight(&cycle));
        cycles.push((cycle, id));
    }
    model.minimize(objective)?;

    Ok(CycleVariables { cycles })
}
