use crate::types::{Bounds, Constraint, Variable};

pub(super) fn continuous_variable(lower: f64, upper: f64) -> Variable {
    Variable::continuous(Bounds::new(lower, upper))
}

pub(super) fn bounded_constraint(lower: f64, upper: f64) -> Constraint {
    Constraint {
        bounds: Bounds::new(lower, upper),
    }
}
