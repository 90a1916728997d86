//! Planar predicates

use super::types::Point;

/// Whether `point` lies strictly to the left of the directed line
/// `line_start -> line_end`.
///
/// Canvas coordinates grow downwards, so "left" here is the side a viewer
/// would call the right-hand side on screen. Points on the line are not
/// left of it.
pub fn point_left_of_line(point: Point, line_start: Point, line_end: Point) -> bool {
    let cross = (line_end.x - line_start.x) * (point.y - line_start.y)
        - (line_end.y - line_start.y) * (point.x - line_start.x);
    cross < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_right_of_main_diagonal() {
        let nw = Point::new(0.0, 0.0);
        let se = Point::new(100.0, 50.0);
        assert!(point_left_of_line(Point::new(100.0, 0.0), nw, se));
        assert!(!point_left_of_line(Point::new(0.0, 50.0), nw, se));
    }

    #[test]
    fn test_above_anti_diagonal() {
        let sw = Point::new(0.0, 50.0);
        let ne = Point::new(100.0, 0.0);
        assert!(point_left_of_line(Point::new(50.0, 0.0), sw, ne));
        assert!(!point_left_of_line(Point::new(50.0, 50.0), sw, ne));
    }

    #[test]
    fn test_point_on_line_is_not_left() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!(!point_left_of_line(Point::new(5.0, 5.0), a, b));
    }
}
