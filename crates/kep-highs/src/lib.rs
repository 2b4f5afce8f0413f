//! Bridge from a `kep-core::Model` to the HiGHS solver.
//!
//! The model's column-first storage is translated into a HiGHS row problem
//! for every solve. Registered lazy-constraint callbacks are driven by
//! re-solving: each integer optimum is handed to the callback, returned cuts
//! become permanent rows, and the loop ends once an incumbent passes.

pub mod ffi;
pub mod solution;
pub mod solver;
mod status;

pub use ffi::{
    HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, highs_version,
};
pub use solution::Solution;
pub use solver::Solver;
