//! Bounded enumeration of simple directed cycles.

use crate::compatibility::AdjacencyMatrix;

/// Iterator over the simple cycles of a graph, each reported once.
///
/// Cycles are emitted in canonical form: the smallest node first, followed
/// by the remaining nodes in arc order. The closing arc back to the first
/// node is implied. The search is a depth-first walk with an explicit stack;
/// from start node `s` it only visits nodes greater than `s`, which is what
/// makes every cycle appear exactly once.
#[derive(Debug, Clone)]
pub struct CycleEnumerator<'a> {
    arcs: &'a AdjacencyMatrix,
    max_nodes: usize,
    first: usize,
    path: Vec<usize>,
    next_candidate: Vec<usize>,
    on_path: Vec<bool>,
    fresh: bool,
}

impl<'a> CycleEnumerator<'a> {
    /// Cycles with at most `max_len` nodes.
    pub fn new(arcs: &'a AdjacencyMatrix, max_len: usize) -> Self {
        Self {
            arcs,
            max_nodes: max_len,
            first: 0,
            path: Vec::with_capacity(max_len.min(arcs.len())),
            next_candidate: Vec::with_capacity(max_len.min(arcs.len())),
            on_path: vec![false; arcs.len()],
            fresh: false,
        }
    }

    /// Every simple cycle, regardless of length.
    pub fn unbounded(arcs: &'a AdjacencyMatrix) -> Self {
        Self::new(arcs, arcs.len())
    }

    fn push(&mut self, node: usize) {
        self.path.push(node);
        self.next_candidate.push(self.first + 1);
        self.on_path[node] = true;
        self.fresh = true;
    }

    fn pop(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_path[node] = false;
        }
        self.next_candidate.pop();
    }
}

impl Iterator for CycleEnumerator<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.arcs.len();
        if self.max_nodes == 0 {
            return None;
        }

        loop {
            if self.path.is_empty() {
                if self.first >= n {
                    return None;
                }
                self.push(self.first);
            }

            let depth = self.path.len() - 1;
            let last = self.path[depth];

            if self.fresh {
                self.fresh = false;
                if self.arcs.contains(last, self.first) {
                    return Some(self.path.clone());
                }
            }

            if self.path.len() < self.max_nodes {
                let mut candidate = self.next_candidate[depth];
                while candidate < n
                    && (self.on_path[candidate] || !self.arcs.contains(last, candidate))
                {
                    candidate += 1;
                }
                if candidate < n {
                    self.next_candidate[depth] = candidate + 1;
                    self.push(candidate);
                    continue;
                }
            }

            self.pop();
            if self.path.is_empty() {
                self.first += 1;
            }
        }
    }
}
