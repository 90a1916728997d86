//! Rigid attachment of a point to an anchor

use super::canvas::Canvas;
use super::types::{Point, PointVars};
use super::Solve;

/// Keeps `point` at the offset from `anchor` it had when the constraint was
/// created.
#[derive(Debug, Clone)]
pub struct KeepRelativePosition {
    anchor: PointVars,
    point: PointVars,
    dx: f64,
    dy: f64,
}

impl KeepRelativePosition {
    /// Capture the current `point - anchor` offset
    pub fn new(anchor: PointVars, point: PointVars, canvas: &Canvas) -> Self {
        let a = canvas.point(anchor);
        let p = canvas.point(point);
        Self {
            anchor,
            point,
            dx: p.x - a.x,
            dy: p.y - a.y,
        }
    }

    pub fn anchor(&self) -> PointVars {
        self.anchor
    }

    pub fn point(&self) -> PointVars {
        self.point
    }

    /// The offset captured at construction
    pub fn delta(&self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

impl Solve for KeepRelativePosition {
    fn solve(&mut self, canvas: &mut Canvas) {
        let anchor = canvas.point(self.anchor);
        canvas.update(self.point.x, anchor.x + self.dx);
        canvas.update(self.point.y, anchor.y + self.dy);
    }
}
