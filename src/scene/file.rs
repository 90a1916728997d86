//! TOML structure of a scene file

use serde::Deserialize;
use toml::Spanned;

/// Top-level scene document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub solver: Option<SolverSection>,
    #[serde(default)]
    pub shapes: Vec<ShapeDef>,
    #[serde(default)]
    pub ports: Vec<PortDef>,
    #[serde(default)]
    pub connector_ends: Vec<ConnectorEndDef>,
    #[serde(default)]
    pub labels: Vec<LabelDef>,
    #[serde(default)]
    pub waypoints: Vec<WaypointDef>,
}

/// Optional `[solver]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub max_iterations: Option<usize>,
    pub default_margin: Option<f64>,
}

/// A rectangle, optionally nested in a parent shape
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeDef {
    pub name: Spanned<String>,
    pub nw: [f64; 2],
    pub se: [f64; 2],
    pub parent: Option<Spanned<String>>,
    pub margin: Option<f64>,
}

/// A port on the border of a shape
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortDef {
    pub name: Spanned<String>,
    pub shape: Spanned<String>,
    pub position: [f64; 2],
    pub clearance: f64,
    #[serde(default)]
    pub incoming: bool,
}

/// The end of a connector attached to a port
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorEndDef {
    pub name: Spanned<String>,
    pub port: Spanned<String>,
    pub position: [f64; 2],
}

/// A point that moves rigidly with the north-west corner of a shape
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelDef {
    pub name: Spanned<String>,
    pub anchor: Spanned<String>,
    pub position: [f64; 2],
}

/// A point kept inside a shape
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaypointDef {
    pub name: Spanned<String>,
    pub shape: Spanned<String>,
    pub position: [f64; 2],
    pub margin: Option<f64>,
}
