//! Model module for building optimization models.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Column-first sparse storage access
//! - [`metadata`]: Variable and constraint naming
//! - [`stats`]: Size summary used in build reports

mod builder;
mod error;
mod metadata;
mod stats;
mod storage;

use crate::types::{Constraint, Objective, Variable};
use kep_expr::ids::{ConstraintId, VariableId};
use std::collections::BTreeMap;

pub use error::ModelError;
pub use stats::ModelStats;

/// A model builder for mixed-integer programs.
///
/// Variables and constraints receive dense ids in insertion order. Constraints
/// may be appended after a model has been handed to a solver adapter, which is
/// how lazily generated cuts become permanent rows.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
    // Column-first sparse storage, each column sorted by constraint id.
    pub(crate) columns: Vec<Vec<(ConstraintId, f64)>>,
    // Lazy-allocated naming storage
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with preallocated variable and constraint storage.
    pub fn with_capacities(variables: usize, constraints: usize) -> Self {
        Self {
            variables: Vec::with_capacity(variables),
            constraints: Vec::with_capacity(constraints),
            columns: Vec::with_capacity(variables),
            ..Self::default()
        }
    }

    /// Get the objective
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if id.index() < self.constraints.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    pub(crate) fn normalize_terms(&self, terms: Vec<(VariableId, f64)>) -> Vec<(VariableId, f64)> {
        let terms_in = terms.len();
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in terms {
            if coeff == 0.0 {
                continue;
            }
            *merged.entry(var_id).or_insert(0.0) += coeff;
        }

        let normalized: Vec<(VariableId, f64)> = merged
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .collect();

        tracing::trace!(
            component = "model",
            operation = "lower_expr",
            status = "success",
            expr_terms_in = terms_in,
            expr_terms_out = normalized.len(),
            "Lowered linear expression"
        );

        normalized
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Objective, Sense};
    use kep_expr::expr::{ComparisonSense, ConstraintExpr, Expr};
    use support::{bounded_constraint, continuous_variable};

    mod naming_stats;
    mod support;

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert_eq!(model.num_coefficients(), 0);
    }

    #[test]
    fn test_add_variable() {
        let mut model = Model::new();
        let var = continuous_variable(0.0, 10.0);

        let id = model.add_variable(var).unwrap();
        assert_eq!(id, VariableId::new(0));
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.get_variable(id).unwrap(), &var);
    }

    #[test]
    fn test_add_constraint() {
        let mut model = Model::new();
        let constraint = bounded_constraint(0.0, 100.0);

        let id = model.add_constraint(constraint).unwrap();
        assert_eq!(model.num_constraints(), 1);
        assert_eq!(model.get_constraint(id).unwrap(), &constraint);
    }

    #[test]
    fn test_set_objective() {
        let mut model = Model::new();
        let var_id = model.add_variable(continuous_variable(0.0, 10.0)).unwrap();

        model
            .set_objective(Objective {
                sense: Some(Sense::Minimize),
                terms: vec![(var_id, 1.0)],
            })
            .unwrap();
        assert_eq!(model.objective().sense, Some(Sense::Minimize));
        assert_eq!(model.objective().terms.len(), 1);
    }

    #[test]
    fn test_set_objective_rejects_missing_sense() {
        let mut model = Model::new();
        let result = model.set_objective(Objective::new());
        assert_eq!(result, Err(ModelError::NoObjective));
    }

    #[test]
    fn test_objective_terms_are_merged() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::binary()).unwrap();
        let y = model.add_variable(Variable::binary()).unwrap();

        model
            .minimize(Expr::term(x, -1.5) + Expr::term(y, 2.0) + Expr::term(x, -0.5))
            .unwrap();
        assert_eq!(model.objective().terms, vec![(x, -2.0), (y, 2.0)]);
        assert_eq!(model.objective_coefficients(), vec![-2.0, 2.0]);
    }

    #[test]
    fn test_multiple_objectives_rejected() {
        let mut model = Model::new();
        let var_id = model.add_variable(continuous_variable(0.0, 10.0)).unwrap();

        model.minimize(Expr::term(var_id, 1.0)).unwrap();

        let result = model.maximize(Expr::term(var_id, 1.0));
        assert_eq!(result, Err(ModelError::MultipleObjectives));
    }

    #[test]
    fn test_set_coefficient_with_invalid_variable_fails() {
        let mut model = Model::new();
        let invalid_var_id = VariableId::new(999);
        let constraint_id = model.add_constraint(bounded_constraint(0.0, 100.0)).unwrap();

        let result = model.set_coefficient(invalid_var_id, constraint_id, 2.5);
        assert_eq!(result, Err(ModelError::InvalidVariableId(invalid_var_id)));
    }

    #[test]
    fn test_set_coefficient_with_invalid_constraint_fails() {
        let mut model = Model::new();
        let var_id = model.add_variable(continuous_variable(0.0, 10.0)).unwrap();
        let invalid_constraint_id = ConstraintId::new(999);

        let result = model.set_coefficient(var_id, invalid_constraint_id, 2.5);
        assert_eq!(
            result,
            Err(ModelError::InvalidConstraintId(invalid_constraint_id))
        );
    }

    #[test]
    fn test_set_coefficient_rejects_non_finite_values() {
        let mut model = Model::new();
        let var_id = model.add_variable(Variable::binary()).unwrap();
        let constraint_id = model.add_constraint(bounded_constraint(0.0, 1.0)).unwrap();

        let result = model.set_coefficient(var_id, constraint_id, f64::NAN);
        assert!(matches!(
            result,
            Err(ModelError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_coefficients_persist_in_sorted_columns() {
        let mut model = Model::new();
        let v1 = model.add_variable(continuous_variable(0.0, 10.0)).unwrap();
        let v2 = model
            .add_variable(Variable::integer(Bounds::new(-5.0, 5.0)))
            .unwrap();

        let c1 = model.add_constraint(bounded_constraint(0.0, 15.0)).unwrap();
        let c2 = model.add_constraint(bounded_constraint(-10.0, 10.0)).unwrap();

        model.set_coefficient(v1, c2, -2.0).unwrap();
        model.set_coefficient(v1, c1, 1.5).unwrap();
        model.set_coefficient(v2, c2, 3.5).unwrap();
        model.set_coefficient(v2, c2, 4.0).unwrap();

        assert_eq!(model.get_column(v1).unwrap(), &[(c1, 1.5), (c2, -2.0)]);
        assert_eq!(model.get_column(v2).unwrap(), &[(c2, 4.0)]);
        assert_eq!(model.num_coefficients(), 3);
        assert_eq!(
            model.rows(),
            vec![vec![(v1, 1.5)], vec![(v1, -2.0), (v2, 4.0)]]
        );
    }

    #[test]
    fn test_variable_constructors() {
        let binary = Variable::binary();
        assert_eq!(binary.bounds, Bounds::new(0.0, 1.0));
        assert!(binary.is_integer);

        let continuous = Variable::continuous(Bounds::new(2.5, 10.5));
        assert!(!continuous.is_integer);

        let integer = Variable::integer(Bounds::new(1.0, 4.0));
        assert_eq!(integer.bounds.upper, 4.0);
        assert!(integer.is_integer);
    }

    #[test]
    fn test_add_constraint_expr_maps_sense_to_bounds() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::binary()).unwrap();
        let y = model.add_variable(Variable::binary()).unwrap();

        let ge = model
            .add_constraint_expr(ConstraintExpr::new(
                Expr::var(x),
                ComparisonSense::GreaterEqual,
                2.0,
            ))
            .unwrap();
        let stored = model.get_constraint(ge).unwrap();
        assert_eq!(stored.bounds.lower, 2.0);
        assert!(stored.bounds.upper.is_infinite());

        let eq = model
            .add_constraint_expr(Expr::var(x).eq_expr(&Expr::var(y)))
            .unwrap();
        assert_eq!(model.get_constraint(eq).unwrap().bounds, Bounds::fixed(0.0));
        assert_eq!(model.get_column(y).unwrap(), &[(eq, -1.0)]);
    }

    #[test]
    fn test_add_constraint_expr_rejects_unknown_variable() {
        let mut model = Model::new();
        model.add_variable(Variable::binary()).unwrap();
        let missing = VariableId::new(5);

        let result = model.add_constraint_expr(Expr::var(missing).le_scalar(1.0));
        assert_eq!(result, Err(ModelError::InvalidVariableId(missing)));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_variable_bounds_validation() {
        let mut model = Model::new();
        let result = model.add_variable(continuous_variable(5.0, 1.0));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
    }

    #[test]
    fn test_constraint_bounds_validation() {
        let mut model = Model::new();
        let result = model.add_constraint(bounded_constraint(10.0, 0.0));
        assert!(matches!(
            result,
            Err(ModelError::InvalidConstraintBounds { .. })
        ));
    }

    #[test]
    fn test_error_codes_prefix_display() {
        let err = ModelError::InvalidVariableId(VariableId::new(3));
        assert_eq!(err.code(), "VARIABLE_INVALID_ID");
        assert!(err.to_string().starts_with("[VARIABLE_INVALID_ID]"));
        assert!(
            ModelError::MultipleObjectives
                .to_string()
                .contains("already has an objective")
        );
    }
}
