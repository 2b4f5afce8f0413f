//! Enumeration of simple directed paths with a fixed node count.

use crate::compatibility::AdjacencyMatrix;

/// Iterator over every simple path of exactly `nodes` distinct nodes.
///
/// Paths are not rotation-reduced: each start node is tried in ascending
/// order and successors are visited in ascending order.
#[derive(Debug, Clone)]
pub struct PathEnumerator<'a> {
    arcs: &'a AdjacencyMatrix,
    nodes: usize,
    start: usize,
    path: Vec<usize>,
    next_candidate: Vec<usize>,
    on_path: Vec<bool>,
}

impl<'a> PathEnumerator<'a> {
    /// Paths with exactly `nodes` nodes (`nodes - 1` arcs).
    pub fn new(arcs: &'a AdjacencyMatrix, nodes: usize) -> Self {
        Self {
            arcs,
            nodes,
            start: 0,
            path: Vec::with_capacity(nodes),
            next_candidate: Vec::with_capacity(nodes),
            on_path: vec![false; arcs.len()],
        }
    }

    /// Paths one node longer than the cycle bound `k`; any such path in a
    /// cycle cover lies on a cycle that is too long.
    pub fn exceeding(arcs: &'a AdjacencyMatrix, k: usize) -> Self {
        Self::new(arcs, k + 1)
    }

    fn push(&mut self, node: usize) {
        self.path.push(node);
        self.next_candidate.push(0);
        self.on_path[node] = true;
    }

    fn pop(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_path[node] = false;
        }
        self.next_candidate.pop();
    }

    /// Emit the current path if it is complete, leaving the stack ready to
    /// continue the search.
    fn take_complete(&mut self) -> Option<Vec<usize>> {
        if self.path.len() == self.nodes {
            let path = self.path.clone();
            self.pop();
            Some(path)
        } else {
            None
        }
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.arcs.len();
        if self.nodes == 0 {
            return None;
        }

        loop {
            if self.path.is_empty() {
                if self.start >= n {
                    return None;
                }
                let start = self.start;
                self.start += 1;
                self.push(start);
                if let Some(path) = self.take_complete() {
                    return Some(path);
                }
                continue;
            }

            let depth = self.path.len() - 1;
            let last = self.path[depth];
            let mut candidate = self.next_candidate[depth];
            while candidate < n && (self.on_path[candidate] || !self.arcs.contains(last, candidate))
            {
                candidate += 1;
            }

            if candidate < n {
                self.next_candidate[depth] = candidate + 1;
                self.push(candidate);
                if let Some(path) = self.take_complete() {
                    return Some(path);
                }
            } else {
                self.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_every_orientation() {
        let arcs = AdjacencyMatrix::from_arcs(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
        let paths: Vec<Vec<usize>> = PathEnumerator::new(&arcs, 3).collect();
        assert_eq!(paths, vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]]);
    }

    #[test]
    fn single_node_paths() {
        let arcs = AdjacencyMatrix::new(3);
        let paths: Vec<Vec<usize>> = PathEnumerator::new(&arcs, 1).collect();
        assert_eq!(paths, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn exceeding_bound_needs_k_plus_one_nodes() {
        let arcs = AdjacencyMatrix::from_arcs(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(PathEnumerator::exceeding(&arcs, 3).count(), 1);
        assert_eq!(PathEnumerator::exceeding(&arcs, 4).count(), 0);
        assert_eq!(PathEnumerator::exceeding(&arcs, 1).count(), 3);
    }

    #[test]
    fn zero_nodes_yield_nothing() {
        let arcs = AdjacencyMatrix::from_arcs(2, [(0, 1)]).unwrap();
        assert_eq!(PathEnumerator::new(&arcs, 0).count(), 0);
    }
}
