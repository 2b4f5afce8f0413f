//! All-pairs unit-length shortest paths and the layer admission test.

use crate::compatibility::AdjacencyMatrix;

/// Hop distances between every ordered node pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    n: usize,
    dist: Vec<u32>,
}

impl ShortestPaths {
    /// Distance assigned to unreachable pairs. Two of them still sum without overflow.
    pub const UNREACHABLE: u32 = u32::MAX / 2;

    /// Relax `d[i][t] = min(d[i][t], d[i][j] + d[j][t])` until a full pass
    /// changes nothing.
    pub fn new(arcs: &AdjacencyMatrix) -> Self {
        let n = arcs.len();
        let mut dist = vec![Self::UNREACHABLE; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    dist[i * n + j] = 0;
                } else if arcs.contains(i, j) {
                    dist[i * n + j] = 1;
                }
            }
        }

        let mut passes = 0u32;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for i in 0..n {
                for j in 0..n {
                    let via = dist[i * n + j];
                    if via >= Self::UNREACHABLE {
                        continue;
                    }
                    for t in 0..n {
                        let candidate = via + dist[j * n + t];
                        if candidate < dist[i * n + t] {
                            dist[i * n + t] = candidate;
                            changed = true;
                        }
                    }
                }
            }
        }

        tracing::trace!(
            component = "graph",
            operation = "shortest_paths",
            status = "success",
            n,
            passes,
            "Computed all-pairs hop distances"
        );

        Self { n, dist }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Raw distance, [`Self::UNREACHABLE`] when no path exists.
    pub fn raw(&self, from: usize, to: usize) -> u32 {
        if from < self.n && to < self.n {
            self.dist[from * self.n + to]
        } else {
            Self::UNREACHABLE
        }
    }

    /// Hop count of a shortest path, `None` when unreachable.
    pub fn distance(&self, from: usize, to: usize) -> Option<u32> {
        let d = self.raw(from, to);
        (d < Self::UNREACHABLE).then_some(d)
    }

    /// Whether arc `from -> to` may carry flow in the layer of `layer`.
    ///
    /// Layer `l` only holds cycles whose smallest node is `l`, so both
    /// endpoints must be at least `l`, and the shortest closed walk
    /// `l ~> from -> to ~> l` must fit in `k` arcs.
    pub fn admits(&self, from: usize, to: usize, layer: usize, k: usize) -> bool {
        if from == to || from < layer || to < layer {
            return false;
        }
        let walk = u64::from(self.raw(layer, from)) + 1 + u64::from(self.raw(to, layer));
        walk <= k as u64
    }
}
