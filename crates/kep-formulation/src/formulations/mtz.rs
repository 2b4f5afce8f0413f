//! Miller-Tucker-Zemlin style formulation.
//!
//! Every node carries a cycle label `y_i` (the smallest node of its cycle),
//! a position `u_i` within the cycle and a flag `z_i` marking the node whose
//! outgoing arc closes the cycle. Arcs force equal labels on both ends and
//! increasing positions unless they leave the last node.

use crate::arc_vars::ArcVariables;
use kep_core::{Bounds, Model, ModelError, Variable};
use kep_expr::{Expr, VariableId};
use kep_graph::Compatibility;

/// Arc binaries plus the per-node label, position and closing flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MtzVariables {
    pub arcs: ArcVariables,
    pub cycle_label: Vec<VariableId>,
    pub position: Vec<VariableId>,
    pub is_last: Vec<VariableId>,
}

pub(crate) fn build(
    model: &mut Model,
    instance: &Compatibility,
    k: usize,
) -> Result<MtzVariables, ModelError> {
    let n = instance.len();
    let big_n = n as f64;
    let big_k = k as f64;

    let arcs = ArcVariables::add_binaries(model, instance)?;
    let mut cycle_label = Vec::with_capacity(n);
    let mut position = Vec::with_capacity(n);
    let mut is_last = Vec::with_capacity(n);
    for node in 0..n {
        cycle_label.push(model.add_named_variable(
            Variable::integer(Bounds::new(node as f64, big_n - 1.0)),
            format!("y[{node}]"),
        )?);
    }
    for node in 0..n {
        position.push(model.add_named_variable(
            Variable::integer(Bounds::new(1.0, big_k)),
            format!("u[{node}]"),
        )?);
    }
    for node in 0..n {
        is_last.push(model.add_named_variable(Variable::binary(), format!("z[{node}]"))?);
    }

    model.minimize(arcs.weighted_sum(instance, -1.0))?;
    arcs.add_flow_rows(model)?;

    // z_i = 1 forces y_i = i
    for node in 0..n {
        let row = Expr::var(cycle_label[node]) + Expr::term(is_last[node], big_n);
        model.add_named_constraint_expr(
            row.le_scalar(big_n + node as f64),
            format!("last[{node}]"),
        )?;
    }

    for ((from, to), x) in arcs.iter() {
        // x_ij = 1 forces y_i = y_j
        let forward = Expr::var(cycle_label[from]) - Expr::var(cycle_label[to])
            + Expr::term(x, big_n);
        model.add_named_constraint_expr(
            forward.le_scalar(big_n),
            format!("label_fwd[{from},{to}]"),
        )?;
        let backward = Expr::var(cycle_label[to]) - Expr::var(cycle_label[from])
            + Expr::term(x, big_n);
        model.add_named_constraint_expr(
            backward.le_scalar(big_n),
            format!("label_bwd[{from},{to}]"),
        )?;

        // x_ij = 1 forces u_i < u_j unless z_i = 1
        let order = Expr::var(position[from]) - Expr::var(position[to]) + Expr::term(x, big_k)
            - Expr::term(is_last[from], big_k);
        model.add_named_constraint_expr(
            order.le_scalar(big_k - 1.0),
            format!("order[{from},{to}]"),
        )?;
    }

    Ok(MtzVariables {
        arcs,
        cycle_label,
        position,
        is_last,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn variable_blocks_and_bounds() {
        let instance =
            Compatibility::from_weighted_arcs(3, [(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]).unwrap();
        let mut model = Model::new();
        let vars = build(&mut model, &instance, 3).unwrap();

        assert_eq!(model.num_variables(), 3 + 3 * 3);
        let y2 = model.get_variable(vars.cycle_label[2]).unwrap();
        assert_eq!((y2.bounds.lower, y2.bounds.upper), (2.0, 2.0));
        let u0 = model.get_variable(vars.position[0]).unwrap();
        assert!(u0.is_integer);
        assert_eq!((u0.bounds.lower, u0.bounds.upper), (1.0, 3.0));
        // 3 flow + 3 out + 3 last + 3 arcs * 3 rows
        assert_eq!(model.num_constraints(), 18);
    }

    #[test]
    fn order_row_coefficients() {
        let instance = Compatibility::from_weighted_arcs(2, [(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        let mut model = Model::new();
        let vars = build(&mut model, &instance, 2).unwrap();

        let row = model.get_constraint_by_name("order[0,1]").unwrap();
        let bounds = model.get_constraint(row).unwrap().bounds;
        assert_eq!(bounds.upper, 1.0);
        let x01 = vars.arcs.get(0, 1).unwrap();
        let coeff = model
            .get_column(x01)
            .unwrap()
            .iter()
            .find(|(id, _)| *id == row)
            .map(|(_, c)| *c);
        assert_eq!(coeff, Some(2.0));
    }
}
