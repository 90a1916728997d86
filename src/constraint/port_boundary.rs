//! Keeping a port glued to one side of its shape
//!
//! A port lives on the border of its shape, inset by half its clearance so
//! the glyph never crosses the visible edge. The side it belongs to is
//! decided once, from the two diagonals of the shape, when the constraint is
//! created or when the user drags the port. After that the constraint only
//! tracks edges: it remembers where the port was after the previous solve
//! and, if that position is still on one of the inset edges, keeps the port
//! on that edge and lets it slide along it. This keeps a port on the side
//! the user chose while the shape is resized around it.

use tracing::debug;

use super::canvas::{Canvas, PortId};
use super::geometry::point_left_of_line;
use super::types::{Bounds, Point, PointVars, RectVars, Side};
use super::variables::VarId;
use super::Solve;

/// Pins a port to the border of a rectangle
#[derive(Debug, Clone)]
pub struct PortBoundary {
    rect: RectVars,
    point: PointVars,
    port: PortId,
    /// Port position after the previous solve
    reference: Point,
}

impl PortBoundary {
    /// Create the constraint and classify the port from its current position.
    pub fn new(rect: RectVars, port: PortId, canvas: &mut Canvas) -> Self {
        let point = canvas.port(port).position;
        let mut constraint = Self {
            rect,
            point,
            port,
            reference: canvas.point(point),
        };
        constraint.classify(canvas);
        constraint
    }

    pub fn port(&self) -> PortId {
        self.port
    }

    pub fn rect(&self) -> RectVars {
        self.rect
    }

    /// Position remembered from the previous solve
    pub fn reference(&self) -> Point {
        self.reference
    }

    /// Re-decide the side from the port's current position, as after the
    /// user dragged it.
    pub fn reclassify(&mut self, canvas: &mut Canvas) {
        self.reference = canvas.point(self.point);
        self.classify(canvas);
    }

    /// Shape border shrunk by half the port clearance
    fn border(&self, canvas: &Canvas) -> Bounds {
        let inset = canvas.port(self.port).clearance / 2.0;
        canvas.bounds(self.rect).shrink(inset)
    }

    fn classify(&mut self, canvas: &mut Canvas) {
        let border = self.border(canvas);
        let p = self.reference;
        let sw = Point::new(border.nw.x, border.se.y);
        let ne = Point::new(border.se.x, border.nw.y);

        let side = if point_left_of_line(p, border.nw, border.se) {
            if point_left_of_line(p, sw, ne) {
                Side::Top
            } else {
                Side::Right
            }
        } else if point_left_of_line(p, sw, ne) {
            Side::Left
        } else {
            Side::Bottom
        };
        debug!(port = self.port.index(), %side, "port classified");
        canvas.set_port_side(self.port, side);

        match side {
            Side::Top | Side::Bottom => limit(canvas, self.point.x, border.nw.x, border.se.x),
            Side::Left | Side::Right => limit(canvas, self.point.y, border.nw.y, border.se.y),
        }
        self.snap_to_side(canvas, &border);
        self.reference = canvas.point(self.point);
    }

    /// Push the port onto the edge of its current side
    fn snap_to_side(&self, canvas: &mut Canvas, border: &Bounds) {
        let side = canvas.port(self.port).side();
        match side {
            Side::Right => canvas.update(self.point.x, border.se.x),
            Side::Bottom => canvas.update(self.point.y, border.se.y),
            Side::Left => canvas.update(self.point.x, border.nw.x),
            Side::Top => canvas.update(self.point.y, border.nw.y),
        };
    }

    fn set_side(&self, canvas: &mut Canvas, side: Side) {
        let from = canvas.port(self.port).side();
        if canvas.set_port_side(self.port, side) {
            debug!(port = self.port.index(), %from, to = %side, "port changed side");
        }
    }
}

impl Solve for PortBoundary {
    fn solve(&mut self, canvas: &mut Canvas) {
        let border = self.border(canvas);
        let (west, north, east, south) = (border.nw.x, border.nw.y, border.se.x, border.se.y);
        let reference = self.reference;
        let (x, y) = (self.point.x, self.point.y);

        if border.corners().contains(&reference) {
            // Free along both edges until it leaves the corner
            limit(canvas, x, west, east);
            limit(canvas, y, north, south);
        } else if reference.x == west {
            canvas.update(x, west);
            limit(canvas, y, north, south);
            self.set_side(canvas, Side::Left);
        } else if reference.y == north {
            canvas.update(y, north);
            limit(canvas, x, west, east);
            self.set_side(canvas, Side::Top);
        } else if reference.x == east {
            canvas.update(x, east);
            limit(canvas, y, north, south);
            self.set_side(canvas, Side::Right);
        } else if reference.y == south {
            canvas.update(y, south);
            limit(canvas, x, west, east);
            self.set_side(canvas, Side::Bottom);
        } else {
            // The edges moved past the port: keep its side, drop it on that edge
            self.snap_to_side(canvas, &border);
        }

        self.reference = canvas.point(self.point);
    }
}

/// Clamp a variable into `[low, high]`
fn limit(canvas: &mut Canvas, var: VarId, low: f64, high: f64) {
    let value = canvas.value(var);
    if value > high {
        canvas.update(var, high);
    } else if value < low {
        canvas.update(var, low);
    }
}
