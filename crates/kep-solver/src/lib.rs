//! Shared solver abstractions for KEP models.
//!
//! Solver backends (like `kep-highs`) implement these traits so that the
//! formulation and runner crates never name a concrete solver.
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for solver behavior
//! - [`SolverStatus`]: Common status values across solvers
//! - [`SolverError`]: Error types for solver operations
//! - [`Solve`]: Trait for solver implementations
//! - [`SolutionView`]: Trait for accessing solution data
//! - [`LazyConstraints`]: Callback that turns an integer incumbent into cuts

mod config;
mod error;
mod lazy;
mod status;
mod traits;

pub use config::SolverConfig;
pub use error::SolverError;
pub use lazy::{Incumbent, LazyConstraints};
pub use status::SolverStatus;
pub use traits::{SolutionView, Solve};
