//! Storage access methods for the model.

use crate::types::{Constraint, Variable};
use kep_expr::ids::{ConstraintId, VariableId};

use super::Model;
use super::error::ModelError;

impl Model {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of coefficients in the model.
    pub fn num_coefficients(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Get a variable by ID.
    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Iterate variables in id order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(idx, var)| (VariableId::new(idx as u32), var))
    }

    /// Iterate constraints in id order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(idx, con)| (ConstraintId::new(idx as u32), con))
    }

    /// Get the coefficient matrix in CSC (column-sparse-compressed) form.
    ///
    /// Each column holds (constraint_id, coefficient) pairs sorted by constraint id.
    pub fn columns(&self) -> impl Iterator<Item = (VariableId, &[(ConstraintId, f64)])> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, coeffs)| (VariableId::new(idx as u32), coeffs.as_slice()))
    }

    /// Get the coefficient matrix in CRS (row-sparse-compressed) form.
    ///
    /// Returns a vector of rows, each containing (variable_id, coefficient) pairs.
    pub fn rows(&self) -> Vec<Vec<(VariableId, f64)>> {
        let mut rows = vec![Vec::new(); self.num_constraints()];
        for (var_id, coeffs) in self.columns() {
            for (constraint_id, coeff) in coeffs {
                if let Some(row) = rows.get_mut(constraint_id.index()) {
                    row.push((var_id, *coeff));
                }
            }
        }
        rows
    }

    /// Get the coefficients for a specific variable (column)
    pub fn get_column(&self, var_id: VariableId) -> Option<&[(ConstraintId, f64)]> {
        self.columns.get(var_id.index()).map(Vec::as_slice)
    }

    /// Dense objective coefficients indexed by variable position.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coeffs = vec![0.0; self.num_variables()];
        for (var_id, coeff) in &self.objective.terms {
            if let Some(slot) = coeffs.get_mut(var_id.index()) {
                *slot += *coeff;
            }
        }
        coeffs
    }
}
