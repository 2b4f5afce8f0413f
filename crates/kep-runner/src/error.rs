//! Runner error types.

use kep_formulation::FormulationError;
use kep_graph::GraphError;
use kep_solver::SolverError;

/// Errors raised while configuring or executing experiment runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// A run configuration was rejected before anything was built.
    InvalidConfig { reason: String },
    /// Instance generation failed.
    Graph(GraphError),
    /// Formulation selection or construction failed.
    Formulation(FormulationError),
    /// The solver failed or rejected a lazy cut.
    Solver(SolverError),
    /// The worker pool could not be created.
    ThreadPool { reason: String },
    /// The tracing subscriber could not be installed.
    Logging { reason: String },
}

impl RunError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            RunError::InvalidConfig { .. } => "RUN_INVALID_CONFIG",
            RunError::Graph(err) => err.code(),
            RunError::Formulation(err) => err.code(),
            RunError::Solver(err) => err.code(),
            RunError::ThreadPool { .. } => "RUN_THREAD_POOL",
            RunError::Logging { .. } => "RUN_LOGGING",
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::InvalidConfig { reason } => {
                write!(f, "[{}] Invalid run configuration: {}", self.code(), reason)
            }
            RunError::Graph(err) => err.fmt(f),
            RunError::Formulation(err) => err.fmt(f),
            RunError::Solver(err) => err.fmt(f),
            RunError::ThreadPool { reason } => {
                write!(f, "[{}] Failed to build worker pool: {}", self.code(), reason)
            }
            RunError::Logging { reason } => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Graph(err) => Some(err),
            RunError::Formulation(err) => Some(err),
            RunError::Solver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GraphError> for RunError {
    fn from(err: GraphError) -> Self {
        RunError::Graph(err)
    }
}

impl From<FormulationError> for RunError {
    fn from(err: FormulationError) -> Self {
        RunError::Formulation(err)
    }
}

impl From<SolverError> for RunError {
    fn from(err: SolverError) -> Self {
        RunError::Solver(err)
    }
}
