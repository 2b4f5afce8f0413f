//! MILP formulations of the kidney exchange problem.
//!
//! Every formulation minimizes the negated weight of a set of vertex-disjoint
//! directed cycles with at most `k` nodes each, so all of them reach the same
//! optimum on the same instance:
//!
//! | Kind | Columns | Length bound |
//! |---|---|---|
//! | `cycle` | one per enumerated cycle | by construction |
//! | `arcPath` | one per arc | a row per `k + 1`-node path |
//! | `arcPathRowGen` | one per arc | path cuts from the [`Separator`] |
//! | `arcCycleRowGen` | one per arc | long-cycle cuts from the [`Separator`] |
//! | `edge` | one per arc and layer | shortest-path layer pruning |
//! | `mtz` | arcs plus per-node integers | label and position rows |

mod arc_vars;
mod error;
mod formulation;
pub mod formulations;
mod kind;
mod layered;
mod separator;

pub use arc_vars::ArcVariables;
pub use error::FormulationError;
pub use formulation::{Formulation, VariableMap};
pub use formulations::{CycleVariables, MtzVariables};
pub use kind::FormulationKind;
pub use layered::LayeredArcVariables;
pub use separator::{SeparationKind, Separator};
