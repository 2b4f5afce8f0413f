//! Linear expressions over model variables.
//!
//! - `core`: `Expr`, linear terms plus a constant
//! - `constraint`: `ConstraintExpr`, an expression compared against a right-hand side

pub mod constraint;
pub mod core;

pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::Expr;
