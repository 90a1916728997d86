//! Diagram scenes: shapes, ports and attached points, with the constraints
//! that keep them together
//!
//! A scene is loaded from TOML (see [`SceneFile`]). Every structural
//! relation in the file becomes one constraint:
//!
//! - a shape with a `parent` is kept inside it ([`KeepRectangleWithin`])
//! - a port is pinned to the border of its shape ([`PortBoundary`])
//! - a connector end is kept at the port's clearance from it ([`KeepPortDistance`])
//! - a label moves rigidly with its shape's north-west corner ([`KeepRelativePosition`])
//! - a waypoint is kept inside a shape ([`KeepPointWithin`])
//!
//! Constraints are added in that order, shapes and points in file order.
//! Edits ([`Scene::move_shape`], [`Scene::resize_shape`],
//! [`Scene::drag_port`]) write the canvas directly, like a user gesture
//! would; [`Scene::solve`] then restores every relation.

pub mod file;
pub mod snapshot;
pub mod suggest;

pub use file::SceneFile;
pub use snapshot::{PointSnapshot, PortSnapshot, ShapeSnapshot, Snapshot};

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::constraint::{
    Canvas, ConstraintId, ConstraintSolver, KeepPointWithin, KeepPortDistance,
    KeepRectangleWithin, KeepRelativePosition, Point, PointVars, Port, PortBoundary, PortId,
    RectVars, Side, SolveReport, SolverConfig,
};
use crate::error::{EditError, SceneError};

use self::suggest::find_similar;

#[derive(Debug, Clone)]
struct ShapeEntry {
    name: String,
    rect: RectVars,
    parent: Option<usize>,
    containment: Option<ConstraintId>,
}

#[derive(Debug, Clone)]
struct PortEntry {
    name: String,
    shape: usize,
    port: PortId,
}

#[derive(Debug, Clone)]
struct PointEntry {
    name: String,
    point: PointVars,
    /// Shape the point is kept inside, moved along with it
    shape: Option<usize>,
}

/// A loaded diagram with its canvas and active constraints
#[derive(Debug)]
pub struct Scene {
    canvas: Canvas,
    solver: ConstraintSolver,
    shapes: Vec<ShapeEntry>,
    ports: Vec<PortEntry>,
    connector_ends: Vec<PointEntry>,
    labels: Vec<PointEntry>,
    waypoints: Vec<PointEntry>,
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let file: SceneFile = toml::from_str(content)?;
        Self::from_scene_file(file)
    }

    /// Build the canvas and constraints for a parsed scene document
    pub fn from_scene_file(file: SceneFile) -> Result<Self, SceneError> {
        let config = solver_config(&file)?;
        let default_margin = config.default_margin;

        let mut builder = Builder {
            scene: Scene {
                canvas: Canvas::new(),
                solver: ConstraintSolver::new(config),
                shapes: Vec::new(),
                ports: Vec::new(),
                connector_ends: Vec::new(),
                labels: Vec::new(),
                waypoints: Vec::new(),
            },
            names: HashSet::new(),
        };

        // Shapes first so parents can be referenced before their definition
        for def in &file.shapes {
            builder.claim(&def.name)?;
            let (nw, se) = (Point::from(def.nw), Point::from(def.se));
            if !(nw.x <= se.x && nw.y <= se.y) {
                return Err(SceneError::InvalidRect {
                    name: def.name.get_ref().clone(),
                    span: def.name.span(),
                });
            }
            let rect = builder.scene.canvas.add_rect(nw, se);
            builder.scene.shapes.push(ShapeEntry {
                name: def.name.get_ref().clone(),
                rect,
                parent: None,
                containment: None,
            });
        }
        for (index, def) in file.shapes.iter().enumerate() {
            let Some(parent_name) = &def.parent else {
                continue;
            };
            let parent = builder.shape_index(parent_name)?;
            let margin = def.margin.unwrap_or(default_margin);
            if margin < 0.0 {
                warn!(shape = %def.name.get_ref(), margin, "negative margin treated as zero");
            }
            let scene = &mut builder.scene;
            let id = scene.solver.add(KeepRectangleWithin::new(
                scene.shapes[parent].rect,
                scene.shapes[index].rect,
                Some(margin),
            ));
            scene.shapes[index].parent = Some(parent);
            scene.shapes[index].containment = Some(id);
        }

        for def in &file.ports {
            builder.claim(&def.name)?;
            let shape = builder.shape_index(&def.shape)?;
            if !(def.clearance >= 0.0) {
                return Err(SceneError::NegativeClearance {
                    name: def.name.get_ref().clone(),
                    clearance: def.clearance,
                    span: def.name.span(),
                });
            }
            let scene = &mut builder.scene;
            let position = scene.canvas.add_point(Point::from(def.position));
            let port = scene.canvas.add_port(Port::new(
                position,
                def.clearance,
                Side::default(),
                def.incoming,
            ));
            let boundary = PortBoundary::new(scene.shapes[shape].rect, port, &mut scene.canvas);
            scene.solver.add(boundary);
            debug!(port = %def.name.get_ref(), side = %scene.canvas.port(port).side(), "port placed");
            scene.ports.push(PortEntry {
                name: def.name.get_ref().clone(),
                shape,
                port,
            });
        }

        for def in &file.connector_ends {
            builder.claim(&def.name)?;
            let index = builder.port_index(&def.port)?;
            let scene = &mut builder.scene;
            let port_id = scene.ports[index].port;
            let port = scene.canvas.port(port_id);
            let (anchor, distance, incoming) = (port.position, port.clearance, port.incoming);
            let point = scene.canvas.add_point(Point::from(def.position));
            scene
                .solver
                .add(KeepPortDistance::new(anchor, point, port_id, distance, incoming));
            scene.connector_ends.push(PointEntry {
                name: def.name.get_ref().clone(),
                point,
                shape: None,
            });
        }

        for def in &file.labels {
            builder.claim(&def.name)?;
            let shape = builder.shape_index(&def.anchor)?;
            let scene = &mut builder.scene;
            let point = scene.canvas.add_point(Point::from(def.position));
            let constraint =
                KeepRelativePosition::new(scene.shapes[shape].rect.nw, point, &scene.canvas);
            scene.solver.add(constraint);
            scene.labels.push(PointEntry {
                name: def.name.get_ref().clone(),
                point,
                shape: None,
            });
        }

        for def in &file.waypoints {
            builder.claim(&def.name)?;
            let shape = builder.shape_index(&def.shape)?;
            let scene = &mut builder.scene;
            let point = scene.canvas.add_point(Point::from(def.position));
            scene.solver.add(KeepPointWithin::new(
                scene.shapes[shape].rect,
                point,
                Some(def.margin.unwrap_or(default_margin)),
            ));
            scene.waypoints.push(PointEntry {
                name: def.name.get_ref().clone(),
                point,
                shape: Some(shape),
            });
        }

        let scene = builder.scene;
        debug!(
            shapes = scene.shapes.len(),
            ports = scene.ports.len(),
            constraints = scene.solver.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn solver(&self) -> &ConstraintSolver {
        &self.solver
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.solver.set_max_iterations(max_iterations);
    }

    /// Run the constraints to a fixpoint
    pub fn solve(&mut self) -> SolveReport {
        self.solver.solve(&mut self.canvas)
    }

    /// Translate a shape together with its nested shapes, their ports and
    /// the waypoints kept inside them.
    pub fn move_shape(&mut self, name: &str, dx: f64, dy: f64) -> Result<(), EditError> {
        let root = self.find_shape(name)?;
        finite(name, dx, dy)?;
        let moved: Vec<usize> = (0..self.shapes.len())
            .filter(|&i| self.is_within(i, root))
            .collect();

        for &i in &moved {
            self.canvas.move_rect(self.shapes[i].rect, dx, dy);
        }
        let points = self
            .ports
            .iter()
            .filter(|p| moved.contains(&p.shape))
            .map(|p| self.canvas.port(p.port).position)
            .chain(
                self.waypoints
                    .iter()
                    .filter(|w| w.shape.is_some_and(|s| moved.contains(&s)))
                    .map(|w| w.point),
            )
            .collect::<Vec<_>>();
        for point in points {
            let p = self.canvas.point(point);
            self.canvas.set_point(point, Point::new(p.x + dx, p.y + dy));
        }
        debug!(shape = name, dx, dy, moved = moved.len(), "shape moved");
        Ok(())
    }

    /// Keep the north-west corner and set a new size
    pub fn resize_shape(&mut self, name: &str, width: f64, height: f64) -> Result<(), EditError> {
        let index = self.find_shape(name)?;
        if !(width >= 0.0 && height >= 0.0 && width.is_finite() && height.is_finite()) {
            return Err(EditError::InvalidSize {
                name: name.to_string(),
                width,
                height,
            });
        }
        self.canvas.resize_rect(self.shapes[index].rect, width, height);
        debug!(shape = name, width, height, "shape resized");
        Ok(())
    }

    /// Drop a port at a new position and let it pick its side again
    pub fn drag_port(&mut self, name: &str, x: f64, y: f64) -> Result<(), EditError> {
        let index = self.find_port(name)?;
        finite(name, x, y)?;
        let port = self.ports[index].port;
        let position = self.canvas.port(port).position;
        self.canvas.set_point(position, Point::new(x, y));
        self.solver.reclassify_port(port, &mut self.canvas);
        debug!(port = name, side = %self.canvas.port(port).side(), "port dragged");
        Ok(())
    }

    /// Take a shape out of its parent; returns `false` if it had none
    pub fn detach_shape(&mut self, name: &str) -> Result<bool, EditError> {
        let index = self.find_shape(name)?;
        let entry = &mut self.shapes[index];
        entry.parent = None;
        match entry.containment.take() {
            Some(id) => {
                self.solver.remove(id);
                debug!(shape = name, "shape detached from parent");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Current geometry of every element
    pub fn snapshot(&self) -> Snapshot {
        let points = |entries: &[PointEntry]| {
            entries
                .iter()
                .map(|e| PointSnapshot {
                    name: e.name.clone(),
                    position: self.canvas.point(e.point).into(),
                })
                .collect()
        };

        Snapshot {
            shapes: self
                .shapes
                .iter()
                .map(|s| {
                    let b = self.canvas.bounds(s.rect);
                    ShapeSnapshot {
                        name: s.name.clone(),
                        nw: b.nw.into(),
                        se: b.se.into(),
                    }
                })
                .collect(),
            ports: self
                .ports
                .iter()
                .map(|p| {
                    let port = self.canvas.port(p.port);
                    PortSnapshot {
                        name: p.name.clone(),
                        shape: self.shapes[p.shape].name.clone(),
                        position: self.canvas.point(port.position).into(),
                        side: port.side(),
                    }
                })
                .collect(),
            connector_ends: points(&self.connector_ends),
            labels: points(&self.labels),
            waypoints: points(&self.waypoints),
        }
    }

    /// Whether shape `index` is `ancestor` or nested somewhere inside it
    fn is_within(&self, index: usize, ancestor: usize) -> bool {
        let mut current = Some(index);
        // Parent links may form a cycle; never walk more steps than shapes
        for _ in 0..=self.shapes.len() {
            match current {
                Some(i) if i == ancestor => return true,
                Some(i) => current = self.shapes[i].parent,
                None => return false,
            }
        }
        false
    }

    fn find_shape(&self, name: &str) -> Result<usize, EditError> {
        self.shapes
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| EditError::Undefined {
                kind: "shape",
                name: name.to_string(),
                suggestions: find_similar(self.shapes.iter().map(|s| s.name.as_str()), name, 2),
            })
    }

    fn find_port(&self, name: &str) -> Result<usize, EditError> {
        self.ports
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| EditError::Undefined {
                kind: "port",
                name: name.to_string(),
                suggestions: find_similar(self.ports.iter().map(|p| p.name.as_str()), name, 2),
            })
    }
}

/// Scene under construction, tracking every name defined so far
struct Builder {
    scene: Scene,
    names: HashSet<String>,
}

impl Builder {
    fn claim(&mut self, name: &toml::Spanned<String>) -> Result<(), SceneError> {
        if !self.names.insert(name.get_ref().clone()) {
            return Err(SceneError::DuplicateName {
                name: name.get_ref().clone(),
                span: name.span(),
            });
        }
        Ok(())
    }

    fn shape_index(&self, name: &toml::Spanned<String>) -> Result<usize, SceneError> {
        let shapes = &self.scene.shapes;
        shapes
            .iter()
            .position(|s| s.name == *name.get_ref())
            .ok_or_else(|| {
                SceneError::undefined(
                    "shape",
                    name.get_ref().clone(),
                    name.span(),
                    find_similar(shapes.iter().map(|s| s.name.as_str()), name.get_ref(), 2),
                )
            })
    }

    fn port_index(&self, name: &toml::Spanned<String>) -> Result<usize, SceneError> {
        let ports = &self.scene.ports;
        ports
            .iter()
            .position(|p| p.name == *name.get_ref())
            .ok_or_else(|| {
                SceneError::undefined(
                    "port",
                    name.get_ref().clone(),
                    name.span(),
                    find_similar(ports.iter().map(|p| p.name.as_str()), name.get_ref(), 2),
                )
            })
    }
}

fn finite(name: &str, x: f64, y: f64) -> Result<(), EditError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(EditError::NonFinite {
            name: name.to_string(),
            x,
            y,
        })
    }
}

fn solver_config(file: &SceneFile) -> Result<SolverConfig, SceneError> {
    let mut config = SolverConfig::default();
    if let Some(section) = &file.solver {
        if let Some(max_iterations) = section.max_iterations {
            if max_iterations == 0 {
                return Err(SceneError::ZeroIterations);
            }
            config = config.with_max_iterations(max_iterations);
        }
        if let Some(margin) = section.default_margin {
            config = config.with_default_margin(margin);
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"
[[shapes]]
name = "outer"
nw = [0.0, 0.0]
se = [400.0, 300.0]

[[shapes]]
name = "inner"
parent = "outer"
margin = 10.0
nw = [20.0, 20.0]
se = [120.0, 70.0]

[[ports]]
name = "inner.in"
shape = "inner"
position = [20.0, 45.0]
clearance = 8.0
incoming = true

[[connector_ends]]
name = "wire.head"
port = "inner.in"
position = [0.0, 0.0]

[[labels]]
name = "inner.title"
anchor = "inner"
position = [25.0, 15.0]

[[waypoints]]
name = "wire.bend"
shape = "outer"
position = [500.0, 10.0]
margin = 5.0
"#;

    #[test]
    fn test_load_builds_one_constraint_per_relation() {
        let scene = Scene::from_str(NESTED).expect("should load");
        let kinds: Vec<_> = scene.solver().iter().map(|(_, c)| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "rectangle-within",
                "port-boundary",
                "port-distance",
                "relative-position",
                "point-within",
            ]
        );
    }

    #[test]
    fn test_port_classified_on_load() {
        let scene = Scene::from_str(NESTED).expect("should load");
        let snapshot = scene.snapshot();
        let port = snapshot.port("inner.in").expect("port exists");
        assert_eq!(port.side, Side::Left);
        assert_eq!(port.position, [24.0, 45.0]);
    }

    #[test]
    fn test_solve_settles_loaded_scene() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        let report = scene.solve();
        assert!(report.converged);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.point("wire.head").map(|p| p.position), Some([16.0, 45.0]));
        assert_eq!(snapshot.point("wire.bend").map(|p| p.position), Some([395.0, 10.0]));
        assert_eq!(snapshot.point("inner.title").map(|p| p.position), Some([25.0, 15.0]));
    }

    #[test]
    fn test_move_shape_carries_ports_and_nested_shapes() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        scene.solve();

        scene.move_shape("outer", 50.0, 20.0).expect("shape exists");
        let snapshot = scene.snapshot();
        assert_eq!(snapshot.shape("inner").map(|s| s.nw), Some([70.0, 40.0]));
        assert_eq!(snapshot.port("inner.in").map(|p| p.position), Some([74.0, 65.0]));
        assert_eq!(snapshot.point("wire.bend").map(|p| p.position), Some([445.0, 30.0]));
    }

    #[test]
    fn test_is_within_survives_parent_cycle() {
        let scene = Scene::from_str(
            r#"
[[shapes]]
name = "a"
parent = "b"
nw = [0.0, 0.0]
se = [10.0, 10.0]

[[shapes]]
name = "b"
parent = "a"
nw = [0.0, 0.0]
se = [10.0, 10.0]

[[shapes]]
name = "c"
nw = [0.0, 0.0]
se = [10.0, 10.0]
"#,
        )
        .expect("should load");

        assert!(scene.is_within(0, 1));
        assert!(!scene.is_within(0, 2));
    }

    #[test]
    fn test_detach_removes_containment() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        assert!(scene.detach_shape("inner").expect("shape exists"));
        assert!(!scene.detach_shape("inner").expect("shape exists"));
        assert!(!scene.detach_shape("outer").expect("shape exists"));
        assert_eq!(scene.solver().len(), 4);
    }

    #[test]
    fn test_edit_unknown_shape_suggests() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        match scene.move_shape("iner", 1.0, 1.0) {
            Err(EditError::Undefined { kind, suggestions, .. }) => {
                assert_eq!(kind, "shape");
                assert_eq!(suggestions, vec!["inner".to_string()]);
            }
            other => panic!("expected undefined shape, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_rejects_negative_size() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        let result = scene.resize_shape("inner", -1.0, 10.0);
        assert!(matches!(result, Err(EditError::InvalidSize { .. })));
    }

    #[test]
    fn test_edits_reject_non_finite_numbers() {
        let mut scene = Scene::from_str(NESTED).expect("should load");
        let before = scene.snapshot();

        assert!(matches!(
            scene.resize_shape("inner", f64::NAN, 10.0),
            Err(EditError::InvalidSize { .. })
        ));
        assert!(matches!(
            scene.resize_shape("inner", 10.0, f64::INFINITY),
            Err(EditError::InvalidSize { .. })
        ));
        assert!(matches!(
            scene.move_shape("outer", f64::NAN, 0.0),
            Err(EditError::NonFinite { .. })
        ));
        assert!(matches!(
            scene.drag_port("inner.in", 0.0, f64::NEG_INFINITY),
            Err(EditError::NonFinite { .. })
        ));
        assert_eq!(scene.snapshot(), before);
    }

    #[test]
    fn test_solver_section() {
        let scene = Scene::from_str("[solver]\nmax_iterations = 3\ndefault_margin = 2.5\n")
            .expect("should load");
        assert_eq!(scene.solver().config().max_iterations, 3);
        assert_eq!(scene.solver().config().default_margin, 2.5);
    }
}
