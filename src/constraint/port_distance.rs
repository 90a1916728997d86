//! Offset of a connector end from the port it is attached to

use super::canvas::{Canvas, PortId};
use super::types::{Point, PointVars, Side};
use super::Solve;

/// Keeps `point` at `distance` from `anchor`, perpendicular to the side the
/// port is snapped to.
///
/// Incoming ends sit outside the shape, outgoing ends inside it, so the
/// arrowhead of a connector always points into the port.
#[derive(Debug, Clone)]
pub struct KeepPortDistance {
    anchor: PointVars,
    point: PointVars,
    port: PortId,
    distance: f64,
    incoming: bool,
}

impl KeepPortDistance {
    pub fn new(anchor: PointVars, point: PointVars, port: PortId, distance: f64, incoming: bool) -> Self {
        Self {
            anchor,
            point,
            port,
            distance,
            incoming,
        }
    }

    pub fn port(&self) -> PortId {
        self.port
    }

    pub fn point(&self) -> PointVars {
        self.point
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn incoming(&self) -> bool {
        self.incoming
    }
}

/// Where the connector end goes for a port on `side`
pub fn port_offset(anchor: Point, side: Side, incoming: bool, distance: f64) -> Point {
    let d = distance;
    match (side, incoming) {
        (Side::Top, true) => Point::new(anchor.x, anchor.y - d),
        (Side::Top, false) => Point::new(anchor.x, anchor.y + d),
        (Side::Bottom, true) => Point::new(anchor.x, anchor.y + d),
        (Side::Bottom, false) => Point::new(anchor.x, anchor.y - d),
        (Side::Left, true) => Point::new(anchor.x - d, anchor.y),
        (Side::Left, false) => Point::new(anchor.x + d, anchor.y),
        (Side::Right, true) => Point::new(anchor.x + d, anchor.y),
        (Side::Right, false) => Point::new(anchor.x - d, anchor.y),
    }
}

impl Solve for KeepPortDistance {
    fn solve(&mut self, canvas: &mut Canvas) {
        let side = canvas.port(self.port).side();
        let anchor = canvas.point(self.anchor);
        let target = port_offset(anchor, side, self.incoming, self.distance);
        canvas.update(self.point.x, target.x);
        canvas.update(self.point.y, target.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::canvas::Port;

    fn solve_for(side: Side, incoming: bool) -> Point {
        let mut canvas = Canvas::new();
        let anchor = canvas.add_point(Point::new(100.0, 100.0));
        let end = canvas.add_point(Point::new(0.0, 0.0));
        let port = canvas.add_port(Port::new(anchor, 8.0, side, incoming));

        KeepPortDistance::new(anchor, end, port, 8.0, incoming).solve(&mut canvas);
        canvas.point(end)
    }

    #[test]
    fn test_top_incoming() {
        assert_eq!(solve_for(Side::Top, true), Point::new(100.0, 92.0));
    }

    #[test]
    fn test_right_outgoing() {
        assert_eq!(solve_for(Side::Right, false), Point::new(92.0, 100.0));
    }

    #[test]
    fn test_full_table() {
        let cases = [
            (Side::Top, true, Point::new(100.0, 92.0)),
            (Side::Top, false, Point::new(100.0, 108.0)),
            (Side::Bottom, true, Point::new(100.0, 108.0)),
            (Side::Bottom, false, Point::new(100.0, 92.0)),
            (Side::Left, true, Point::new(92.0, 100.0)),
            (Side::Left, false, Point::new(108.0, 100.0)),
            (Side::Right, true, Point::new(108.0, 100.0)),
            (Side::Right, false, Point::new(92.0, 100.0)),
        ];
        for (side, incoming, expected) in cases {
            assert_eq!(solve_for(side, incoming), expected, "{side} incoming={incoming}");
        }
    }

    #[test]
    fn test_follows_side_changes() {
        let mut canvas = Canvas::new();
        let anchor = canvas.add_point(Point::new(50.0, 0.0));
        let end = canvas.add_point(Point::new(50.0, -8.0));
        let port = canvas.add_port(Port::new(anchor, 8.0, Side::Top, true));
        let mut constraint = KeepPortDistance::new(anchor, end, port, 8.0, true);

        constraint.solve(&mut canvas);
        assert_eq!(canvas.point(end), Point::new(50.0, -8.0));

        canvas.set_port_side(port, Side::Left);
        constraint.solve(&mut canvas);
        assert_eq!(canvas.point(end), Point::new(42.0, 0.0));
    }
}
