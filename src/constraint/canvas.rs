//! The canvas: owner of every variable and port the constraints refer to

use super::types::{Bounds, Point, PointVars, RectVars, Side};
use super::variables::{VarId, Variables};

/// Handle to a port in a [`Canvas`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub(crate) usize);

impl PortId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A connector attachment point on the boundary of a shape
#[derive(Debug, Clone)]
pub struct Port {
    /// Center of the port glyph
    pub position: PointVars,
    /// Size of the port glyph; half of it is kept clear of the shape edge
    pub clearance: f64,
    /// Whether connectors arrive at (rather than leave from) this port
    pub incoming: bool,
    side: Side,
}

impl Port {
    pub fn new(position: PointVars, clearance: f64, side: Side, incoming: bool) -> Self {
        Self {
            position,
            clearance,
            incoming,
            side,
        }
    }

    /// Side of the owning shape the port is currently snapped to
    pub fn side(&self) -> Side {
        self.side
    }
}

/// Variables and ports of one diagram
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    variables: Variables,
    ports: Vec<Port>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_var(&mut self, value: f64) -> VarId {
        self.variables.add(value)
    }

    pub fn add_point(&mut self, point: Point) -> PointVars {
        PointVars::new(self.add_var(point.x), self.add_var(point.y))
    }

    pub fn add_rect(&mut self, nw: Point, se: Point) -> RectVars {
        RectVars::new(self.add_point(nw), self.add_point(se))
    }

    /// Register a port; its position variables must already exist
    pub fn add_port(&mut self, port: Port) -> PortId {
        self.ports.push(port);
        PortId(self.ports.len() - 1)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn value(&self, id: VarId) -> f64 {
        self.variables.value(id)
    }

    pub fn point(&self, point: PointVars) -> Point {
        point.get(&self.variables)
    }

    pub fn bounds(&self, rect: RectVars) -> Bounds {
        rect.get(&self.variables)
    }

    /// Epsilon-guarded write; see [`Variables::update`]
    pub fn update(&mut self, id: VarId, value: f64) -> bool {
        self.variables.update(id, value)
    }

    /// Direct edit of a variable by its owner
    pub fn set(&mut self, id: VarId, value: f64) {
        self.variables.set(id, value);
    }

    pub fn set_point(&mut self, point: PointVars, to: Point) {
        self.set(point.x, to.x);
        self.set(point.y, to.y);
    }

    /// Translate both corners of a rectangle
    pub fn move_rect(&mut self, rect: RectVars, dx: f64, dy: f64) {
        let b = self.bounds(rect);
        self.set_point(rect.nw, Point::new(b.nw.x + dx, b.nw.y + dy));
        self.set_point(rect.se, Point::new(b.se.x + dx, b.se.y + dy));
    }

    /// Keep the NW corner and place the SE corner at `nw + (width, height)`
    pub fn resize_rect(&mut self, rect: RectVars, width: f64, height: f64) {
        let nw = self.point(rect.nw);
        self.set_point(rect.se, Point::new(nw.x + width, nw.y + height));
    }

    /// Panics if `id` was not returned by [`Canvas::add_port`] on this canvas.
    pub fn port(&self, id: PortId) -> &Port {
        &self.ports[id.0]
    }

    /// Snap a port to another side. Only the port boundary constraint
    /// classifies ports.
    ///
    /// A side change counts towards the revision like a variable write, so
    /// the solver runs another pass for the constraints that read the side.
    pub(crate) fn set_port_side(&mut self, id: PortId, side: Side) -> bool {
        let port = &mut self.ports[id.0];
        if port.side == side {
            return false;
        }
        port.side = side;
        self.variables.touch();
        true
    }

    pub fn set_port_clearance(&mut self, id: PortId, clearance: f64) {
        self.ports[id.0].clearance = clearance;
    }

    pub fn ports(&self) -> impl Iterator<Item = (PortId, &Port)> {
        self.ports.iter().enumerate().map(|(i, p)| (PortId(i), p))
    }

    /// See [`Variables::revision`]
    pub fn revision(&self) -> u64 {
        self.variables.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rect_reads_back() {
        let mut canvas = Canvas::new();
        let rect = canvas.add_rect(Point::new(1.0, 2.0), Point::new(11.0, 22.0));
        let b = canvas.bounds(rect);
        assert_eq!(b.nw, Point::new(1.0, 2.0));
        assert_eq!(b.se, Point::new(11.0, 22.0));
    }

    #[test]
    fn test_move_and_resize_rect() {
        let mut canvas = Canvas::new();
        let rect = canvas.add_rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        canvas.move_rect(rect, 5.0, -2.0);
        assert_eq!(canvas.bounds(rect).nw, Point::new(5.0, -2.0));
        assert_eq!(canvas.bounds(rect).se, Point::new(15.0, 8.0));

        canvas.resize_rect(rect, 30.0, 4.0);
        assert_eq!(canvas.bounds(rect).se, Point::new(35.0, 2.0));
    }

    #[test]
    fn test_port_side_defaults_to_construction_value() {
        let mut canvas = Canvas::new();
        let pos = canvas.add_point(Point::new(0.0, 5.0));
        let id = canvas.add_port(Port::new(pos, 8.0, Side::Left, true));

        assert_eq!(canvas.port(id).side(), Side::Left);
        assert!(canvas.set_port_side(id, Side::Bottom));
        assert_eq!(canvas.port(id).side(), Side::Bottom);
        assert_eq!(canvas.ports().count(), 1);
    }

    #[test]
    fn test_side_change_bumps_revision() {
        let mut canvas = Canvas::new();
        let pos = canvas.add_point(Point::new(0.0, 5.0));
        let id = canvas.add_port(Port::new(pos, 8.0, Side::Left, true));
        let before = canvas.revision();

        assert!(!canvas.set_port_side(id, Side::Left));
        assert_eq!(canvas.revision(), before);

        assert!(canvas.set_port_side(id, Side::Top));
        assert_eq!(canvas.revision(), before + 1);
    }
}
