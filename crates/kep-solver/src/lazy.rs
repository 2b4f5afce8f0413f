//! Lazy-constraint (row generation) callback seam.
//!
//! A backend that supports lazy constraints presents every integer incumbent
//! to the registered [`LazyConstraints`] implementation. Returned cuts are
//! added to the model as permanent, globally valid rows before the solve
//! continues; an empty result accepts the incumbent.

use kep_expr::{ConstraintExpr, VariableId};

/// Integer incumbent presented to a lazy-constraint callback.
#[derive(Debug, Clone, Copy)]
pub struct Incumbent<'a> {
    values: &'a [f64],
    objective_value: f64,
    round: u32,
}

impl<'a> Incumbent<'a> {
    pub fn new(values: &'a [f64], objective_value: f64, round: u32) -> Self {
        Self {
            values,
            objective_value,
            round,
        }
    }

    /// Primal value of a variable, `None` for ids outside the model.
    pub fn value(&self, id: VariableId) -> Option<f64> {
        self.values.get(id.index()).copied()
    }

    /// Binary reading of a variable: set when its value exceeds one half.
    pub fn is_set(&self, id: VariableId) -> bool {
        self.value(id).is_some_and(|value| value > 0.5)
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Zero-based separation round that produced this incumbent.
    pub fn round(&self) -> u32 {
        self.round
    }
}

/// Callback that inspects an integer incumbent and returns violated cuts.
pub trait LazyConstraints {
    fn separate(&mut self, incumbent: &Incumbent<'_>) -> Vec<ConstraintExpr>;
}

impl<F> LazyConstraints for F
where
    F: FnMut(&Incumbent<'_>) -> Vec<ConstraintExpr>,
{
    fn separate(&mut self, incumbent: &Incumbent<'_>) -> Vec<ConstraintExpr> {
        self(incumbent)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use kep_expr::Expr;

    #[test]
    fn incumbent_reads_values_by_id() {
        let values = [1.0, 0.2, 0.9999];
        let incumbent = Incumbent::new(&values, -3.5, 2);

        assert_eq!(incumbent.value(VariableId::new(1)), Some(0.2));
        assert_eq!(incumbent.value(VariableId::new(7)), None);
        assert!(incumbent.is_set(VariableId::new(0)));
        assert!(!incumbent.is_set(VariableId::new(1)));
        assert!(incumbent.is_set(VariableId::new(2)));
        assert!(!incumbent.is_set(VariableId::new(9)));
        assert_eq!(incumbent.objective_value(), -3.5);
        assert_eq!(incumbent.round(), 2);
    }

    #[test]
    fn closures_act_as_callbacks() {
        let mut calls = 0;
        let mut callback = |incumbent: &Incumbent<'_>| {
            calls += 1;
            let chosen: Vec<VariableId> = (0..incumbent.values().len() as u32)
                .map(VariableId::new)
                .filter(|id| incumbent.is_set(*id))
                .collect();
            if chosen.len() > 1 {
                vec![Expr::sum_vars(chosen).le_scalar(1.0)]
            } else {
                Vec::new()
            }
        };

        let values = [1.0, 1.0, 0.0];
        let cuts = callback.separate(&Incumbent::new(&values, 0.0, 0));
        assert_eq!(cuts.len(), 1);
        assert_eq!(cuts[0].rhs(), 1.0);

        let values = [1.0, 0.0, 0.0];
        assert!(callback.separate(&Incumbent::new(&values, 0.0, 1)).is_empty());
        assert_eq!(calls, 2);
    }
}
