//! Column-oriented model builder shared by every KEP formulation.

pub mod model;
pub mod types;

pub use model::{Model, ModelError, ModelStats};
pub use types::{Bounds, Constraint, Objective, Sense, Variable};
