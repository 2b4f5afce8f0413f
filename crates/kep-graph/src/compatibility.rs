//! Directed compatibility graph with arc weights.

use crate::error::GraphError;

/// Dense boolean adjacency over nodes `0..n` without self-arcs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Graph on `n` nodes with no arcs.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Build from an arc list.
    ///
    /// # Errors
    ///
    /// Returns an error for endpoints outside `0..n` or self-arcs.
    pub fn from_arcs(
        n: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let mut matrix = Self::new(n);
        for (from, to) in arcs {
            matrix.insert(from, to)?;
        }
        Ok(matrix)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// True when the arc `from -> to` exists. Out-of-range nodes have no arcs.
    pub fn contains(&self, from: usize, to: usize) -> bool {
        from < self.n && to < self.n && self.cells[from * self.n + to]
    }

    /// Add the arc `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns an error for endpoints outside `0..n` or self-arcs.
    pub fn insert(&mut self, from: usize, to: usize) -> Result<(), GraphError> {
        self.check_arc(from, to)?;
        self.cells[from * self.n + to] = true;
        Ok(())
    }

    /// Remove the arc `from -> to` if present.
    pub fn remove(&mut self, from: usize, to: usize) {
        if from < self.n && to < self.n {
            self.cells[from * self.n + to] = false;
        }
    }

    pub fn num_arcs(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Arcs in row-major order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(move |(idx, _)| (idx / n, idx % n))
    }

    /// Successors of `from` in ascending order.
    pub fn successors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |to| self.contains(from, *to))
    }

    /// Predecessors of `to` in ascending order.
    pub fn predecessors(&self, to: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |from| self.contains(*from, to))
    }

    fn check_arc(&self, from: usize, to: usize) -> Result<(), GraphError> {
        for node in [from, to] {
            if node >= self.n {
                return Err(GraphError::NodeOutOfRange { node, n: self.n });
            }
        }
        if from == to {
            return Err(GraphError::SelfArc { node: from });
        }
        Ok(())
    }
}

/// KEP instance: arcs plus a fully populated weight matrix.
///
/// Weights are stored for every ordered pair, but only entries on present
/// arcs carry meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Compatibility {
    arcs: AdjacencyMatrix,
    weights: Vec<f64>,
}

impl Compatibility {
    /// Combine an adjacency matrix with a row-major `n * n` weight vector.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DimensionMismatch`] if `weights.len() != n * n`.
    pub fn new(arcs: AdjacencyMatrix, weights: Vec<f64>) -> Result<Self, GraphError> {
        let expected = arcs.len() * arcs.len();
        if weights.len() != expected {
            return Err(GraphError::DimensionMismatch {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self { arcs, weights })
    }

    /// Build from weighted arcs; every other pair gets weight 0.
    ///
    /// # Errors
    ///
    /// Returns an error for endpoints outside `0..n` or self-arcs.
    pub fn from_weighted_arcs(
        n: usize,
        arcs: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, GraphError> {
        let mut matrix = AdjacencyMatrix::new(n);
        let mut weights = vec![0.0; n * n];
        for (from, to, weight) in arcs {
            matrix.insert(from, to)?;
            weights[from * n + to] = weight;
        }
        Ok(Self {
            arcs: matrix,
            weights,
        })
    }

    /// Unit weights on every arc of `arcs`.
    pub fn unit(arcs: AdjacencyMatrix) -> Self {
        let weights = arcs
            .cells
            .iter()
            .map(|present| if *present { 1.0 } else { 0.0 })
            .collect();
        Self { arcs, weights }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn arcs(&self) -> &AdjacencyMatrix {
        &self.arcs
    }

    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        self.arcs.contains(from, to)
    }

    /// Weight of the pair `from -> to`, 0.0 outside the matrix.
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        let n = self.len();
        if from < n && to < n {
            self.weights[from * n + to]
        } else {
            0.0
        }
    }

    /// Present arcs with their weights, row-major.
    pub fn weighted_arcs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.arcs
            .arcs()
            .map(|(from, to)| (from, to, self.weight(from, to)))
    }

    /// Total weight of a cycle given as its node sequence (closing arc included).
    pub fn cycle_weight(&self, cycle: &[usize]) -> f64 {
        cycle_arcs(cycle).map(|(from, to)| self.weight(from, to)).sum()
    }
}

/// Arcs of a cycle in visiting order, starting with the closing arc.
pub fn cycle_arcs(cycle: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let closing = cycle.last().copied();
    closing
        .into_iter()
        .chain(cycle.iter().copied())
        .zip(cycle.iter().copied())
}

/// Consecutive arcs of a path.
pub fn path_arcs(path: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    path.windows(2).map(|pair| (pair[0], pair[1]))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_arcs_and_out_of_range_nodes() {
        let mut matrix = AdjacencyMatrix::new(3);
        assert_eq!(matrix.insert(1, 1), Err(GraphError::SelfArc { node: 1 }));
        assert_eq!(
            matrix.insert(0, 3),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert_eq!(matrix.num_arcs(), 0);
    }

    #[test]
    fn arcs_and_neighbours_are_ordered() {
        let matrix = AdjacencyMatrix::from_arcs(4, [(2, 0), (0, 3), (0, 1), (3, 0)]).unwrap();
        assert_eq!(
            matrix.arcs().collect::<Vec<_>>(),
            vec![(0, 1), (0, 3), (2, 0), (3, 0)]
        );
        assert_eq!(matrix.successors(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(matrix.predecessors(0).collect::<Vec<_>>(), vec![2, 3]);
        assert!(!matrix.contains(7, 0));
    }

    #[test]
    fn weights_must_match_dimension() {
        let result = Compatibility::new(AdjacencyMatrix::new(2), vec![0.0; 3]);
        assert_eq!(
            result,
            Err(GraphError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn cycle_weight_includes_closing_arc() {
        let compat =
            Compatibility::from_weighted_arcs(3, [(0, 1, 0.5), (1, 2, 0.25), (2, 0, 2.0)]).unwrap();
        assert_eq!(compat.cycle_weight(&[0, 1, 2]), 2.75);
        assert_eq!(
            cycle_arcs(&[0, 1, 2]).collect::<Vec<_>>(),
            vec![(2, 0), (0, 1), (1, 2)]
        );
        assert_eq!(path_arcs(&[0, 1, 2]).collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn unit_weights_follow_arcs() {
        let compat = Compatibility::unit(AdjacencyMatrix::from_arcs(2, [(0, 1)]).unwrap());
        assert_eq!(compat.weight(0, 1), 1.0);
        assert_eq!(compat.weight(1, 0), 0.0);
        assert_eq!(compat.weighted_arcs().count(), 1);
    }
}
