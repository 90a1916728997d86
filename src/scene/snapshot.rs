//! Plain-value view of a solved scene

use std::fmt;

use serde::Serialize;

use crate::constraint::Side;

/// Geometry of every element of a scene at one moment
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    pub shapes: Vec<ShapeSnapshot>,
    pub ports: Vec<PortSnapshot>,
    pub connector_ends: Vec<PointSnapshot>,
    pub labels: Vec<PointSnapshot>,
    pub waypoints: Vec<PointSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSnapshot {
    pub name: String,
    pub nw: [f64; 2],
    pub se: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortSnapshot {
    pub name: String,
    pub shape: String,
    pub position: [f64; 2],
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSnapshot {
    pub name: String,
    pub position: [f64; 2],
}

impl Snapshot {
    pub fn shape(&self, name: &str) -> Option<&ShapeSnapshot> {
        self.shapes.iter().find(|s| s.name == name)
    }

    pub fn port(&self, name: &str) -> Option<&PortSnapshot> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Connector end, label or waypoint by name
    pub fn point(&self, name: &str) -> Option<&PointSnapshot> {
        self.connector_ends
            .iter()
            .chain(&self.labels)
            .chain(&self.waypoints)
            .find(|p| p.name == name)
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

fn fmt_point(p: [f64; 2]) -> String {
    format!("({:.1}, {:.1})", p[0], p[1])
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.shapes {
            writeln!(f, "shape {} {} {}", s.name, fmt_point(s.nw), fmt_point(s.se))?;
        }
        for p in &self.ports {
            writeln!(
                f,
                "port {} {} on {} {}",
                p.name,
                fmt_point(p.position),
                p.shape,
                p.side
            )?;
        }
        for (kind, points) in [
            ("end", &self.connector_ends),
            ("label", &self.labels),
            ("waypoint", &self.waypoints),
        ] {
            for p in points {
                writeln!(f, "{} {} {}", kind, p.name, fmt_point(p.position))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            shapes: vec![ShapeSnapshot {
                name: "box".to_string(),
                nw: [0.0, 0.0],
                se: [100.0, 50.0],
            }],
            ports: vec![PortSnapshot {
                name: "box.in".to_string(),
                shape: "box".to_string(),
                position: [4.0, 25.0],
                side: Side::Left,
            }],
            connector_ends: vec![PointSnapshot {
                name: "wire".to_string(),
                position: [-4.0, 25.0],
            }],
            labels: vec![],
            waypoints: vec![],
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let snapshot = sample();
        assert_eq!(snapshot.shape("box").map(|s| s.se), Some([100.0, 50.0]));
        assert_eq!(snapshot.port("box.in").map(|p| p.side), Some(Side::Left));
        assert_eq!(snapshot.point("wire").map(|p| p.position), Some([-4.0, 25.0]));
        assert!(snapshot.point("box").is_none());
    }

    #[test]
    fn test_display_report() {
        insta::assert_snapshot!(sample().to_string(), @r"
        shape box (0.0, 0.0) (100.0, 50.0)
        port box.in (4.0, 25.0) on box left
        end wire (-4.0, 25.0)
        ");
    }

    #[test]
    fn test_to_toml_uses_lowercase_sides() {
        let text = sample().to_toml().expect("should serialize");
        assert!(text.contains("[[ports]]"));
        assert!(text.contains("side = \"left\""));
    }
}
