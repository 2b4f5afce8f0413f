//! Sparse arc-indexed variable map and the rows shared by arc formulations.

use kep_core::{Model, ModelError, Variable};
use kep_expr::{Expr, VariableId};
use kep_graph::{AdjacencyMatrix, Compatibility, cycle_arcs, path_arcs};
use kep_solver::Incumbent;
use std::collections::BTreeMap;

/// One binary per present arc, keyed by `(from, to)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcVariables {
    n: usize,
    vars: BTreeMap<(usize, usize), VariableId>,
}

impl ArcVariables {
    /// Add a binary `x[i,j]` for every arc of the instance.
    pub fn add_binaries(model: &mut Model, instance: &Compatibility) -> Result<Self, ModelError> {
        let mut vars = BTreeMap::new();
        for (from, to) in instance.arcs().arcs() {
            let id = model.add_named_variable(Variable::binary(), format!("x[{from},{to}]"))?;
            vars.insert((from, to), id);
        }
        Ok(Self {
            n: instance.len(),
            vars,
        })
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get(&self, from: usize, to: usize) -> Option<VariableId> {
        self.vars.get(&(from, to)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), VariableId)> + '_ {
        self.vars.iter().map(|(arc, id)| (*arc, *id))
    }

    /// `Σ_j x[node,j]`
    pub fn outflow(&self, node: usize) -> Expr {
        Expr::sum_vars(
            self.vars
                .range((node, 0)..(node + 1, 0))
                .map(|(_, id)| *id),
        )
    }

    /// `Σ_i x[i,node]`
    pub fn inflow(&self, node: usize) -> Expr {
        Expr::sum_vars(
            self.vars
                .iter()
                .filter(|((_, to), _)| *to == node)
                .map(|(_, id)| *id),
        )
    }

    /// `Σ w[i,j] x[i,j]`, scaled by `sign`.
    pub fn weighted_sum(&self, instance: &Compatibility, sign: f64) -> Expr {
        Expr::from_linear(
            self.vars
                .iter()
                .map(|((from, to), id)| (*id, sign * instance.weight(*from, *to)))
                .filter(|(_, coeff)| *coeff != 0.0)
                .collect(),
        )
    }

    /// Sum of the arc variables along a path; `None` if an arc has no variable.
    pub fn path_sum(&self, path: &[usize]) -> Option<Expr> {
        path_arcs(path)
            .map(|(from, to)| self.get(from, to).map(Expr::var))
            .sum()
    }

    /// Sum of the arc variables around a cycle, closing arc included.
    pub fn cycle_sum(&self, cycle: &[usize]) -> Option<Expr> {
        cycle_arcs(cycle)
            .map(|(from, to)| self.get(from, to).map(Expr::var))
            .sum()
    }

    /// Arcs whose variable is set in the incumbent.
    pub fn support(&self, incumbent: &Incumbent<'_>) -> AdjacencyMatrix {
        let mut support = AdjacencyMatrix::new(self.n);
        for ((from, to), id) in &self.vars {
            if incumbent.is_set(*id) {
                // Keys come from a validated adjacency matrix.
                let _ = support.insert(*from, *to);
            }
        }
        support
    }

    /// Arcs whose primal value exceeds one half.
    pub fn chosen(&self, values: &[f64]) -> Vec<(usize, usize)> {
        self.vars
            .iter()
            .filter(|(_, id)| values.get(id.index()).is_some_and(|v| *v > 0.5))
            .map(|(arc, _)| *arc)
            .collect()
    }

    /// Per node: in-flow equals out-flow, and at most one outgoing arc.
    ///
    /// Nodes without arcs get no rows.
    pub fn add_flow_rows(&self, model: &mut Model) -> Result<(), ModelError> {
        for node in 0..self.n {
            let inflow = self.inflow(node);
            let outflow = self.outflow(node);
            if inflow.is_constant() && outflow.is_constant() {
                continue;
            }
            model.add_named_constraint_expr(inflow.eq_expr(&outflow), format!("flow[{node}]"))?;
            if !outflow.is_constant() {
                model.add_named_constraint_expr(outflow.le_scalar(1.0), format!("out[{node}]"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn triangle() -> Compatibility {
        Compatibility::from_weighted_arcs(3, [(0, 1, 0.5), (1, 2, 0.25), (2, 0, 1.0), (1, 0, 2.0)])
            .unwrap()
    }

    #[test]
    fn one_binary_per_arc() {
        let mut model = Model::new();
        let vars = ArcVariables::add_binaries(&mut model, &triangle()).unwrap();
        assert_eq!(vars.len(), 4);
        assert_eq!(model.num_variables(), 4);
        let x01 = vars.get(0, 1).unwrap();
        assert_eq!(model.get_variable_name(x01), Some("x[0,1]"));
        assert!(vars.get(0, 2).is_none());
    }

    #[test]
    fn reductions_pick_the_right_arcs() {
        let mut model = Model::new();
        let vars = ArcVariables::add_binaries(&mut model, &triangle()).unwrap();
        let x = |i, j| vars.get(i, j).unwrap();

        assert_eq!(vars.outflow(1).normalized_terms(), vec![(x(1, 0), 1.0), (x(1, 2), 1.0)]);
        let mut inflow = vars.inflow(0).normalized_terms();
        inflow.sort_by_key(|(id, _)| *id);
        assert_eq!(inflow, vec![(x(1, 0), 1.0), (x(2, 0), 1.0)]);

        let objective = vars.weighted_sum(&triangle(), -1.0);
        assert_eq!(objective.linear_terms().len(), 4);
        assert_eq!(objective.evaluate(|_| 1.0), -3.75);
    }

    #[test]
    fn path_and_cycle_sums() {
        let mut model = Model::new();
        let vars = ArcVariables::add_binaries(&mut model, &triangle()).unwrap();

        let path = vars.path_sum(&[0, 1, 2]).unwrap();
        assert_eq!(path.linear_terms().len(), 2);
        let cycle = vars.cycle_sum(&[0, 1, 2]).unwrap();
        assert_eq!(cycle.linear_terms().len(), 3);
        assert!(vars.path_sum(&[0, 2]).is_none());
    }

    #[test]
    fn support_and_chosen_read_incumbent() {
        let mut model = Model::new();
        let vars = ArcVariables::add_binaries(&mut model, &triangle()).unwrap();
        let mut values = vec![0.0; vars.len()];
        values[vars.get(0, 1).unwrap().index()] = 1.0;
        values[vars.get(1, 0).unwrap().index()] = 0.9999;

        let incumbent = Incumbent::new(&values, -2.5, 0);
        let support = vars.support(&incumbent);
        assert_eq!(support.arcs().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
        assert_eq!(vars.chosen(&values), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn flow_rows_skip_isolated_nodes() {
        let instance = Compatibility::from_weighted_arcs(4, [(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        let mut model = Model::new();
        let vars = ArcVariables::add_binaries(&mut model, &instance).unwrap();
        vars.add_flow_rows(&mut model).unwrap();
        assert_eq!(model.num_constraints(), 4);
    }
}
