//! Arc formulations: a binary per arc with flow rows, cycle length bounded
//! either by explicit path rows or by row generation.

use crate::arc_vars::ArcVariables;
use kep_core::{Model, ModelError};
use kep_graph::{Compatibility, PathEnumerator};

/// Arc binaries, `-Σ w x` objective, and per-node `in = out`, `out <= 1`.
pub(crate) fn build_base(
    model: &mut Model,
    instance: &Compatibility,
) -> Result<ArcVariables, ModelError> {
    let arcs = ArcVariables::add_binaries(model, instance)?;
    model.minimize(arcs.weighted_sum(instance, -1.0))?;
    arcs.add_flow_rows(model)?;
    Ok(arcs)
}

/// For every path of `k + 1` nodes: `Σ path arcs <= k - 1`.
///
/// Returns the number of rows added.
pub(crate) fn add_path_rows(
    model: &mut Model,
    instance: &Compatibility,
    arcs: &ArcVariables,
    k: usize,
) -> Result<usize, ModelError> {
    let mut added = 0;
    for path in PathEnumerator::exceeding(instance.arcs(), k) {
        let Some(sum) = arcs.path_sum(&path) else {
            continue;
        };
        model.add_constraint_expr(sum.le_scalar(k as f64 - 1.0))?;
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Compatibility {
        Compatibility::from_weighted_arcs(
            4,
            [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (1, 0, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn base_has_flow_rows_only() {
        let mut model = Model::new();
        let arcs = build_base(&mut model, &square()).unwrap();
        assert_eq!(arcs.len(), 5);
        // 4 flow rows and 4 out-degree rows.
        assert_eq!(model.num_constraints(), 8);
        assert!(model.get_constraint_by_name("flow[2]").is_some());
    }

    #[test]
    fn path_rows_follow_enumeration() {
        let mut model = Model::new();
        let instance = square();
        let arcs = build_base(&mut model, &instance).unwrap();
        let before = model.num_constraints();
        let added = add_path_rows(&mut model, &instance, &arcs, 3).unwrap();
        // The four rotations of the square; the chord 1 -> 0 closes no 4-node path.
        assert_eq!(added, 4);
        assert_eq!(model.num_constraints(), before + added);
    }
}
