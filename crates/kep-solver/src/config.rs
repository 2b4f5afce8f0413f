//! Solver configuration types.

/// Configuration options for solver behavior.
///
/// Every field is optional; `None` leaves the backend default in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds, shared by every lazy-constraint round.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance.
    pub mip_gap: Option<f64>,
    /// Verbosity level.
    pub verbosity: Option<u32>,
    /// Enable/disable presolve.
    pub presolve: Option<bool>,
    /// Number of threads to use.
    pub threads: Option<u32>,
    /// Feasibility tolerance.
    pub tolerance: Option<f64>,
    /// Log solver output to console.
    pub log_to_console: Option<bool>,
    /// Upper bound on lazy-constraint rounds.
    pub max_lazy_rounds: Option<u32>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the relative MIP gap tolerance.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    /// Set the number of threads.
    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Set the feasibility tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Enable or disable console logging.
    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// Cap the number of lazy-constraint rounds.
    pub fn with_max_lazy_rounds(mut self, rounds: u32) -> Self {
        self.max_lazy_rounds = Some(rounds);
        self
    }

    /// Settings used for a single exact KEP run: one thread, zero gap.
    pub fn exact_single_thread(time_limit_seconds: f64) -> Self {
        Self::new()
            .with_threads(1)
            .with_mip_gap(0.0)
            .with_time_limit(time_limit_seconds)
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
