//! Layered arc variables `x[i,j,l]` of the extended-edge formulation.
//!
//! Layer `l` carries the cycle whose smallest node is `l`. Arcs are only
//! copied into a layer when a closed walk through `l` of at most `k` arcs
//! can use them, which keeps the model far below `n^3` columns.

use kep_core::{Model, ModelError, Variable};
use kep_expr::{Expr, VariableId};
use kep_graph::{Compatibility, ShortestPaths};
use std::collections::BTreeMap;

/// Sparse `(from, to, layer)` variable map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredArcVariables {
    n: usize,
    vars: BTreeMap<(usize, usize, usize), VariableId>,
}

impl LayeredArcVariables {
    /// Add a binary for every arc admitted into every layer.
    pub fn add_binaries(
        model: &mut Model,
        instance: &Compatibility,
        k: usize,
    ) -> Result<Self, ModelError> {
        let n = instance.len();
        let distances = ShortestPaths::new(instance.arcs());
        let mut vars = BTreeMap::new();
        for layer in 0..n {
            for (from, to) in instance.arcs().arcs() {
                if !distances.admits(from, to, layer, k) {
                    continue;
                }
                let id = model
                    .add_named_variable(Variable::binary(), format!("x[{from},{to},{layer}]"))?;
                vars.insert((from, to, layer), id);
            }
        }
        Ok(Self { n, vars })
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

    pub fn get(&self, from: usize, to: usize, layer: usize) -> Option<VariableId> {
        self.vars.get(&(from, to, layer)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), VariableId)> + '_ {
        self.vars.iter().map(|(key, id)| (*key, *id))
    }

    /// Out-flow per `(node, layer)`: `Σ_j x[node,j,layer]`.
    pub fn sum_over_to(&self) -> BTreeMap<(usize, usize), Expr> {
        self.group_by(|(from, _, layer)| (from, layer))
    }

    /// In-flow per `(node, layer)`: `Σ_i x[i,node,layer]`.
    pub fn sum_over_from(&self) -> BTreeMap<(usize, usize), Expr> {
        self.group_by(|(_, to, layer)| (to, layer))
    }

    /// Arcs leaving each node over all layers: `Σ_{j,l} x[node,j,l]`.
    pub fn sum_over_to_and_layer(&self) -> BTreeMap<usize, Expr> {
        self.group_by(|(from, _, _)| from)
    }

    /// Arcs used in each layer: `Σ_{i,j} x[i,j,layer]`.
    pub fn sum_over_arcs(&self) -> BTreeMap<usize, Expr> {
        self.group_by(|(_, _, layer)| layer)
    }

    /// Copies of each arc over all layers: `Σ_l x[i,j,l]`.
    pub fn sum_over_layers(&self) -> BTreeMap<(usize, usize), Expr> {
        self.group_by(|(from, to, _)| (from, to))
    }

    /// `Σ w[i,j] Σ_l x[i,j,l]`, scaled by `sign`.
    pub fn weighted_sum(&self, instance: &Compatibility, sign: f64) -> Expr {
        Expr::from_linear(
            self.vars
                .iter()
                .map(|((from, to, _), id)| (*id, sign * instance.weight(*from, *to)))
                .filter(|(_, coeff)| *coeff != 0.0)
                .collect(),
        )
    }

    /// Arcs whose copy in some layer has a primal value above one half.
    pub fn chosen(&self, values: &[f64]) -> Vec<(usize, usize)> {
        let mut arcs: Vec<(usize, usize)> = self
            .vars
            .iter()
            .filter(|(_, id)| values.get(id.index()).is_some_and(|v| *v > 0.5))
            .map(|((from, to, _), _)| (*from, *to))
            .collect();
        arcs.sort_unstable();
        arcs.dedup();
        arcs
    }

    fn group_by<K: Ord>(
        &self,
        key: impl Fn((usize, usize, usize)) -> K,
    ) -> BTreeMap<K, Expr> {
        let mut groups: BTreeMap<K, Expr> = BTreeMap::new();
        for (triple, id) in &self.vars {
            groups.entry(key(*triple)).or_default().push_term(*id, 1.0);
        }
        groups
    }
}
