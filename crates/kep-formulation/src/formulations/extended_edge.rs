//! Extended-edge formulation over layered arc copies.

use crate::layered::LayeredArcVariables;
use kep_core::{Model, ModelError};
use kep_graph::Compatibility;

pub(crate) fn build(
    model: &mut Model,
    instance: &Compatibility,
    k: usize,
) -> Result<LayeredArcVariables, ModelError> {
    let n = instance.len();
    let x = LayeredArcVariables::add_binaries(model, instance, k)?;
    model.minimize(x.weighted_sum(instance, -1.0))?;

    let outflow = x.sum_over_to();
    let inflow = x.sum_over_from();

    // in = out per (node, layer)
    for layer in 0..n {
        for node in layer..n {
            let key = (node, layer);
            let (incoming, outgoing) = match (inflow.get(&key), outflow.get(&key)) {
                (None, None) => continue,
                (incoming, outgoing) => (
                    incoming.cloned().unwrap_or_default(),
                    outgoing.cloned().unwrap_or_default(),
                ),
            };
            model.add_named_constraint_expr(
                incoming.eq_expr(&outgoing),
                format!("flow[{node},{layer}]"),
            )?;
        }
    }

    // each node leaves through at most one arc over all layers
    for (node, total) in x.sum_over_to_and_layer() {
        model.add_named_constraint_expr(total.le_scalar(1.0), format!("node[{node}]"))?;
    }

    // each layer holds at most k arcs
    for (layer, total) in x.sum_over_arcs() {
        model.add_named_constraint_expr(total.le_scalar(k as f64), format!("layer[{layer}]"))?;
    }

    // layer l is only used when node l itself is in it
    for layer in 0..n {
        let head = outflow.get(&(layer, layer)).cloned().unwrap_or_default();
        for node in layer + 1..n {
            let Some(out) = outflow.get(&(node, layer)) else {
                continue;
            };
            model.add_named_constraint_expr(
                out.le_expr(&head),
                format!("anchor[{node},{layer}]"),
            )?;
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_per_family() {
        // 0 <-> 1 and 1 <-> 2.
        let instance = Compatibility::from_weighted_arcs(
            3,
            [(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0), (2, 1, 1.0)],
        )
        .unwrap();
        let mut model = Model::new();
        let x = build(&mut model, &instance, 2).unwrap();

        assert_eq!(x.len(), 4);
        assert!(model.get_constraint_by_name("flow[0,0]").is_some());
        assert!(model.get_constraint_by_name("flow[2,1]").is_some());
        assert!(model.get_constraint_by_name("flow[2,0]").is_none());
        assert!(model.get_constraint_by_name("node[1]").is_some());
        assert!(model.get_constraint_by_name("layer[1]").is_some());
        assert!(model.get_constraint_by_name("anchor[1,0]").is_some());
        assert!(model.get_constraint_by_name("anchor[2,1]").is_some());
        // flow: (0,0) (1,0) (1,1) (2,1); node: 0 1 2; layer: 0 1; anchor: (1,0) (2,1)
        assert_eq!(model.num_constraints(), 11);
    }
}
