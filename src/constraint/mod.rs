//! Constraint engine for keeping diagram geometry consistent
//!
//! Each constraint looks at a handful of canvas variables and, if they
//! violate its relation, writes a local correction through the
//! epsilon-guarded [`Variables::update`]. There is no global solving: the
//! [`ConstraintSolver`] simply repeats the ordered list of constraints until
//! nothing changes.

pub mod canvas;
pub mod config;
pub mod containment;
pub mod geometry;
pub mod port_boundary;
pub mod port_distance;
pub mod relative;
pub mod solver;
pub mod types;
pub mod variables;

pub use canvas::{Canvas, Port, PortId};
pub use config::SolverConfig;
pub use containment::{KeepPointWithin, KeepRectangleWithin};
pub use geometry::point_left_of_line;
pub use port_boundary::PortBoundary;
pub use port_distance::{port_offset, KeepPortDistance};
pub use relative::KeepRelativePosition;
pub use solver::{ConstraintId, ConstraintSolver, SolveReport};
pub use types::*;
pub use variables::{VarId, Variables, EPSILON};

/// A relation that can correct the canvas towards satisfying itself
pub trait Solve {
    /// Apply one local correction; the only effect is on canvas variables
    /// (and, for ports, their side).
    fn solve(&mut self, canvas: &mut Canvas);
}

/// Any of the constraint kinds, as stored by the solver
#[derive(Debug, Clone)]
pub enum Constraint {
    RectangleWithin(KeepRectangleWithin),
    PointWithin(KeepPointWithin),
    RelativePosition(KeepRelativePosition),
    PortDistance(KeepPortDistance),
    PortBoundary(PortBoundary),
}

impl Constraint {
    /// Short name of the constraint kind, for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::RectangleWithin(_) => "rectangle-within",
            Constraint::PointWithin(_) => "point-within",
            Constraint::RelativePosition(_) => "relative-position",
            Constraint::PortDistance(_) => "port-distance",
            Constraint::PortBoundary(_) => "port-boundary",
        }
    }
}

impl Solve for Constraint {
    fn solve(&mut self, canvas: &mut Canvas) {
        match self {
            Constraint::RectangleWithin(c) => c.solve(canvas),
            Constraint::PointWithin(c) => c.solve(canvas),
            Constraint::RelativePosition(c) => c.solve(canvas),
            Constraint::PortDistance(c) => c.solve(canvas),
            Constraint::PortBoundary(c) => c.solve(canvas),
        }
    }
}

impl From<KeepRectangleWithin> for Constraint {
    fn from(c: KeepRectangleWithin) -> Self {
        Constraint::RectangleWithin(c)
    }
}

impl From<KeepPointWithin> for Constraint {
    fn from(c: KeepPointWithin) -> Self {
        Constraint::PointWithin(c)
    }
}

impl From<KeepRelativePosition> for Constraint {
    fn from(c: KeepRelativePosition) -> Self {
        Constraint::RelativePosition(c)
    }
}

impl From<KeepPortDistance> for Constraint {
    fn from(c: KeepPortDistance) -> Self {
        Constraint::PortDistance(c)
    }
}

impl From<PortBoundary> for Constraint {
    fn from(c: PortBoundary) -> Self {
        Constraint::PortBoundary(c)
    }
}
