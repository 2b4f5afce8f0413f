//! Row generation for the arc formulations.
//!
//! The arc model without length rows admits cycle covers with arbitrarily
//! long cycles. At every integer incumbent the separator rebuilds the chosen
//! arcs as a graph and returns one cut per structure that breaks the bound.

use crate::arc_vars::ArcVariables;
use kep_expr::ConstraintExpr;
use kep_graph::{AdjacencyMatrix, CycleEnumerator, PathEnumerator};
use kep_solver::{Incumbent, LazyConstraints};
use tracing::debug;

/// Which structures the separator looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparationKind {
    /// Paths of `k + 1` nodes, cut as `Σ path arcs <= k - 1`.
    Paths,
    /// Cycles longer than `k`, cut as `Σ cycle arcs <= len - 1`.
    Cycles,
}

impl SeparationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SeparationKind::Paths => "paths",
            SeparationKind::Cycles => "cycles",
        }
    }
}

/// Lazy-constraint callback holding the arc variables and the cycle bound.
#[derive(Debug, Clone)]
pub struct Separator {
    kind: SeparationKind,
    arcs: ArcVariables,
    k: usize,
}

impl Separator {
    pub fn new(kind: SeparationKind, arcs: ArcVariables, k: usize) -> Self {
        Self { kind, arcs, k }
    }

    pub fn kind(&self) -> SeparationKind {
        self.kind
    }

    pub fn max_cycle_length(&self) -> usize {
        self.k
    }

    pub fn arc_variables(&self) -> &ArcVariables {
        &self.arcs
    }

    /// Cuts violated by a support graph, in enumeration order.
    pub fn cuts_for_support(&self, support: &AdjacencyMatrix) -> Vec<ConstraintExpr> {
        match self.kind {
            SeparationKind::Paths => PathEnumerator::exceeding(support, self.k)
                .filter_map(|path| {
                    self.arcs
                        .path_sum(&path)
                        .map(|sum| sum.le_scalar(self.k as f64 - 1.0))
                })
                .collect(),
            SeparationKind::Cycles => CycleEnumerator::unbounded(support)
                .filter(|cycle| cycle.len() > self.k)
                .filter_map(|cycle| {
                    self.arcs
                        .cycle_sum(&cycle)
                        .map(|sum| sum.le_scalar(cycle.len() as f64 - 1.0))
                })
                .collect(),
        }
    }
}

impl LazyConstraints for Separator {
    fn separate(&mut self, incumbent: &Incumbent<'_>) -> Vec<ConstraintExpr> {
        let support = self.arcs.support(incumbent);
        let cuts = self.cuts_for_support(&support);
        debug!(
            component = "separator",
            operation = "separate",
            status = if cuts.is_empty() { "accepted" } else { "violated" },
            kind = self.kind.as_str(),
            round = incumbent.round(),
            support_arcs = support.num_arcs() as u64,
            cuts = cuts.len() as u64,
            "Separated integer incumbent"
        );
        cuts
    }
}
