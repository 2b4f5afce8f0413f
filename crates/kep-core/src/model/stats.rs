use serde::{Deserialize, Serialize};

use super::Model;

/// Size summary of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStats {
    pub variables: usize,
    pub integer_variables: usize,
    pub constraints: usize,
    pub nonzeros: usize,
}

impl Model {
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            variables: self.num_variables(),
            integer_variables: self.variables.iter().filter(|var| var.is_integer).count(),
            constraints: self.num_constraints(),
            nonzeros: self.num_coefficients(),
        }
    }
}
