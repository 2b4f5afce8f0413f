//! Identifiers and linear expressions shared by the KEP model crates.

pub mod expr;
pub mod ids;

pub use expr::{ComparisonSense, ConstraintExpr, Expr};
pub use ids::{ConstraintId, VariableId};
