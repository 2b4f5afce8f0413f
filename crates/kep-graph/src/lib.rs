//! Compatibility graphs for the kidney exchange problem.
//!
//! - [`Compatibility`]: arcs and weights of one instance
//! - [`InstanceConfig`]: reproducible random instances
//! - [`CycleEnumerator`] / [`PathEnumerator`]: lazy depth-first enumeration
//! - [`ShortestPaths`]: hop distances used to prune layered formulations

pub mod compatibility;
pub mod cycles;
pub mod distances;
pub mod error;
pub mod generator;
pub mod paths;
pub mod rng;

pub use compatibility::{AdjacencyMatrix, Compatibility, cycle_arcs, path_arcs};
pub use cycles::CycleEnumerator;
pub use distances::ShortestPaths;
pub use error::GraphError;
pub use generator::{InstanceConfig, WeightDraw};
pub use paths::PathEnumerator;
pub use rng::SubtractiveRng;
