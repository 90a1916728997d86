//! Core geometric types shared by the constraints

use std::fmt;

use serde::{Deserialize, Serialize};

use super::variables::{VarId, Variables};

/// A 2D point in canvas coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Axis-aligned rectangle given by its north-west and south-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub nw: Point,
    pub se: Point,
}

impl Bounds {
    pub fn new(nw: Point, se: Point) -> Self {
        Self { nw, se }
    }

    pub fn width(&self) -> f64 {
        self.se.x - self.nw.x
    }

    pub fn height(&self) -> f64 {
        self.se.y - self.nw.y
    }

    /// `nw.x <= se.x` and `nw.y <= se.y`
    pub fn is_normalized(&self) -> bool {
        self.nw.x <= self.se.x && self.nw.y <= self.se.y
    }

    /// Shrink inward by `inset` on all four sides
    pub fn shrink(&self, inset: f64) -> Bounds {
        Bounds::new(
            Point::new(self.nw.x + inset, self.nw.y + inset),
            Point::new(self.se.x - inset, self.se.y - inset),
        )
    }

    /// Corners in the order NW, NE, SE, SW
    pub fn corners(&self) -> [Point; 4] {
        [
            self.nw,
            Point::new(self.se.x, self.nw.y),
            self.se,
            Point::new(self.nw.x, self.se.y),
        ]
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.nw.x && point.x <= self.se.x && point.y >= self.nw.y && point.y <= self.se.y
    }
}

/// Side of a shape a port is snapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        f.write_str(name)
    }
}

/// A point made of two canvas variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointVars {
    pub x: VarId,
    pub y: VarId,
}

impl PointVars {
    pub fn new(x: VarId, y: VarId) -> Self {
        Self { x, y }
    }

    /// Read the current position
    pub fn get(&self, vars: &Variables) -> Point {
        Point::new(vars.value(self.x), vars.value(self.y))
    }
}

/// A rectangle made of two corner points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectVars {
    pub nw: PointVars,
    pub se: PointVars,
}

impl RectVars {
    pub fn new(nw: PointVars, se: PointVars) -> Self {
        Self { nw, se }
    }

    /// Degenerate rectangle whose corners are both `point`
    pub fn from_point(point: PointVars) -> Self {
        Self::new(point, point)
    }

    /// Read the current rectangle
    pub fn get(&self, vars: &Variables) -> Bounds {
        Bounds::new(self.nw.get(vars), self.se.get(vars))
    }
}
