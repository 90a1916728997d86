//! Fixpoint driver for the active constraint set
//!
//! Constraints do not commute: a later one can undo what an earlier one
//! just fixed. The solver therefore runs the whole ordered list again and
//! again until a pass leaves every variable alone, or until the configured
//! number of passes is spent.

use tracing::{debug, warn};

use super::canvas::{Canvas, PortId};
use super::config::SolverConfig;
use super::{Constraint, Solve};

/// Stable handle for a constraint added to a [`ConstraintSolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u64);

/// Outcome of [`ConstraintSolver::solve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// Passes run, including the final quiet one
    pub passes: usize,
    /// Whether the last pass changed nothing
    pub converged: bool,
}

/// Ordered set of active constraints
#[derive(Debug, Default)]
pub struct ConstraintSolver {
    config: SolverConfig,
    constraints: Vec<(ConstraintId, Constraint)>,
    next_id: u64,
}

impl ConstraintSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            constraints: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.config.max_iterations = max_iterations.max(1);
    }

    /// Append a constraint; it runs after every constraint added before it.
    pub fn add(&mut self, constraint: impl Into<Constraint>) -> ConstraintId {
        let id = ConstraintId(self.next_id);
        self.next_id += 1;
        self.constraints.push((id, constraint.into()));
        id
    }

    /// Drop a constraint, keeping the order of the others
    pub fn remove(&mut self, id: ConstraintId) -> Option<Constraint> {
        let index = self.constraints.iter().position(|(cid, _)| *cid == id)?;
        Some(self.constraints.remove(index).1)
    }

    pub fn get(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints.iter().map(|(id, c)| (*id, c))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Solve every constraint once, in order.
    ///
    /// Returns whether any variable or port side changed.
    pub fn solve_pass(&mut self, canvas: &mut Canvas) -> bool {
        let before = canvas.revision();
        for (_, constraint) in &mut self.constraints {
            constraint.solve(canvas);
        }
        canvas.revision() != before
    }

    /// Run passes until one changes nothing or the pass cap is reached
    pub fn solve(&mut self, canvas: &mut Canvas) -> SolveReport {
        let cap = self.config.max_iterations.max(1);
        for pass in 1..=cap {
            let revision = canvas.revision();
            if !self.solve_pass(canvas) {
                debug!(passes = pass, "constraints settled");
                return SolveReport {
                    passes: pass,
                    converged: true,
                };
            }
            debug!(pass, writes = canvas.revision() - revision, "pass changed variables");
        }
        warn!(
            passes = cap,
            constraints = self.constraints.len(),
            "constraints still changing after the last allowed pass"
        );
        SolveReport {
            passes: cap,
            converged: false,
        }
    }

    /// Re-decide the side of a port from its current position, after the
    /// user dragged it. Returns `false` if no constraint pins that port.
    pub fn reclassify_port(&mut self, port: PortId, canvas: &mut Canvas) -> bool {
        let mut found = false;
        for (_, constraint) in &mut self.constraints {
            if let Constraint::PortBoundary(boundary) = constraint {
                if boundary.port() == port {
                    boundary.reclassify(canvas);
                    found = true;
                }
            }
        }
        found
    }
}
