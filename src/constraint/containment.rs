//! Containment of a rectangle (or a single point) inside a parent rectangle

use tracing::debug;

use super::canvas::Canvas;
use super::types::{PointVars, RectVars};
use super::Solve;

/// Keeps a child rectangle inside its parent, `margin` away from every edge.
///
/// Edges are corrected one after the other in the order west, east, north,
/// south, each test reading the values written by the previous ones. A child
/// wider (or taller) than the margin-shrunk parent is shifted using the
/// parent's inner size, so it ends up flush with the west (north) edge.
#[derive(Debug, Clone)]
pub struct KeepRectangleWithin {
    parent: RectVars,
    child: RectVars,
    margin: f64,
}

impl KeepRectangleWithin {
    /// A negative, NaN or missing margin means no margin.
    pub fn new(parent: RectVars, child: RectVars, margin: Option<f64>) -> Self {
        Self {
            parent,
            child,
            margin: margin.filter(|m| *m >= 0.0).unwrap_or(0.0),
        }
    }

    pub fn parent(&self) -> RectVars {
        self.parent
    }

    pub fn child(&self) -> RectVars {
        self.child
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

impl Solve for KeepRectangleWithin {
    fn solve(&mut self, canvas: &mut Canvas) {
        let parent = canvas.bounds(self.parent);
        let child = canvas.bounds(self.child);
        let margin = self.margin;

        let mut width = child.width();
        let mut height = child.height();
        if width > parent.width() - 2.0 * margin {
            width = parent.width() - 2.0 * margin;
        }
        if height > parent.height() - 2.0 * margin {
            height = parent.height() - 2.0 * margin;
        }

        let (nw, se) = (self.child.nw, self.child.se);

        // West
        if parent.nw.x > canvas.value(nw.x) - margin {
            debug!(edge = "west", "child crosses parent edge");
            canvas.update(nw.x, parent.nw.x + margin);
            let x = canvas.value(nw.x);
            canvas.update(se.x, x + width);
        }
        // East
        if parent.se.x < canvas.value(se.x) + margin {
            debug!(edge = "east", "child crosses parent edge");
            canvas.update(se.x, parent.se.x - margin);
            let x = canvas.value(se.x);
            canvas.update(nw.x, x - width);
        }
        // North
        if parent.nw.y > canvas.value(nw.y) - margin {
            debug!(edge = "north", "child crosses parent edge");
            canvas.update(nw.y, parent.nw.y + margin);
            let y = canvas.value(nw.y);
            canvas.update(se.y, y + height);
        }
        // South
        if parent.se.y < canvas.value(se.y) + margin {
            debug!(edge = "south", "child crosses parent edge");
            canvas.update(se.y, parent.se.y - margin);
            let y = canvas.value(se.y);
            canvas.update(nw.y, y - height);
        }
    }
}

/// Keeps a single point inside a rectangle.
///
/// Built as a [`KeepRectangleWithin`] whose child has both corners on the
/// point. The margin is applied as for a rectangle: the point stays at
/// least `margin` away from every parent edge. Pass `None` for a point that
/// may sit on the edge itself.
#[derive(Debug, Clone)]
pub struct KeepPointWithin {
    inner: KeepRectangleWithin,
}

impl KeepPointWithin {
    pub fn new(parent: RectVars, point: PointVars, margin: Option<f64>) -> Self {
        Self {
            inner: KeepRectangleWithin::new(parent, RectVars::from_point(point), margin),
        }
    }

    pub fn parent(&self) -> RectVars {
        self.inner.parent
    }

    pub fn point(&self) -> PointVars {
        self.inner.child.nw
    }

    pub fn margin(&self) -> f64 {
        self.inner.margin
    }
}

impl Solve for KeepPointWithin {
    fn solve(&mut self, canvas: &mut Canvas) {
        self.inner.solve(canvas);
    }
}
