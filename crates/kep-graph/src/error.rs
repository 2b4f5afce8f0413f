//! Graph and instance error types.

/// Errors raised while building or generating compatibility graphs.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Instances need at least one node.
    InvalidNodeCount { n: usize },
    /// Density must be a finite value in `[0, 1]`.
    InvalidDensity { density: f64 },
    /// An arc endpoint is outside `0..n`.
    NodeOutOfRange { node: usize, n: usize },
    /// Arcs from a node to itself are not allowed.
    SelfArc { node: usize },
    /// Weight storage does not match the node count.
    DimensionMismatch { expected: usize, actual: usize },
}

impl GraphError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::InvalidNodeCount { .. } => "GRAPH_INVALID_NODE_COUNT",
            GraphError::InvalidDensity { .. } => "GRAPH_INVALID_DENSITY",
            GraphError::NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
            GraphError::SelfArc { .. } => "GRAPH_SELF_ARC",
            GraphError::DimensionMismatch { .. } => "GRAPH_DIMENSION_MISMATCH",
        }
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidNodeCount { n } => write!(
                f,
                "[{}] Instance needs at least one node (got {})",
                self.code(),
                n
            ),
            GraphError::InvalidDensity { density } => write!(
                f,
                "[{}] Density must lie in [0, 1] (got {})",
                self.code(),
                density
            ),
            GraphError::NodeOutOfRange { node, n } => write!(
                f,
                "[{}] Node {} is out of range for {} nodes",
                self.code(),
                node,
                n
            ),
            GraphError::SelfArc { node } => {
                write!(f, "[{}] Self-arc on node {} is not allowed", self.code(), node)
            }
            GraphError::DimensionMismatch { expected, actual } => write!(
                f,
                "[{}] Expected {} weight entries, got {}",
                self.code(),
                expected,
                actual
            ),
        }
    }
}

impl std::error::Error for GraphError {}
