//! Configuration for the fixpoint solver

/// Configuration options for constraint solving
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of full passes over the constraint list per solve
    pub max_iterations: usize,

    /// Margin used for containment when a relation does not give one
    pub default_margin: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            default_margin: 0.0,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pass cap (at least one pass always runs)
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Set the fallback containment margin
    pub fn with_default_margin(mut self, margin: f64) -> Self {
        self.default_margin = margin;
        self
    }
}
