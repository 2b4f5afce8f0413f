//! Formulation error types.

use kep_core::ModelError;

/// Errors raised while selecting or building a formulation.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulationError {
    /// Maximum cycle length must be at least 1.
    InvalidMaxCycleLength { k: usize },
    /// Name does not match any formulation.
    UnknownFormulation { name: String },
    /// The model rejected a variable, row or objective.
    Model(ModelError),
}

impl FormulationError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            FormulationError::InvalidMaxCycleLength { .. } => "FORMULATION_INVALID_K",
            FormulationError::UnknownFormulation { .. } => "FORMULATION_UNKNOWN",
            FormulationError::Model(err) => err.code(),
        }
    }
}

impl std::fmt::Display for FormulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulationError::InvalidMaxCycleLength { k } => write!(
                f,
                "[{}] Maximum cycle length must be at least 1 (got {})",
                self.code(),
                k
            ),
            FormulationError::UnknownFormulation { name } => write!(
                f,
                "[{}] Unknown formulation '{}' (expected one of: {})",
                self.code(),
                name,
                crate::FormulationKind::names().join(", ")
            ),
            FormulationError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FormulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormulationError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for FormulationError {
    fn from(err: ModelError) -> Self {
        FormulationError::Model(err)
    }
}
