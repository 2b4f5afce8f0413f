//! Model builders, one module per encoding.
//!
//! - [`arc`]: arc binaries with flow rows, shared by the three arc variants
//! - [`cycle`]: one column per short cycle
//! - [`extended_edge`]: arc copies per layer
//! - [`mtz`]: arc binaries with label and position integers

pub(crate) mod arc;
pub mod cycle;
pub(crate) mod extended_edge;
pub mod mtz;

pub use cycle::CycleVariables;
pub use mtz::MtzVariables;
