//! Diagram Constraints - local constraint solving for diagram editors
//!
//! This library keeps the geometry of a box-and-arrow diagram consistent
//! while it is being edited: nested shapes stay inside their parents, ports
//! stay glued to the border of their shape, connector ends stay at the right
//! distance from their port, and labels move with what they annotate.
//!
//! # Example
//!
//! ```rust
//! use diagram_constraints::{solve_scene, Edit, RunConfig};
//!
//! let scene = r#"
//!     [[shapes]]
//!     name = "outer"
//!     nw = [0.0, 0.0]
//!     se = [200.0, 100.0]
//!
//!     [[shapes]]
//!     name = "inner"
//!     parent = "outer"
//!     nw = [10.0, 10.0]
//!     se = [60.0, 40.0]
//! "#;
//!
//! let config = RunConfig::new().with_edit(Edit::Move { name: "inner".into(), dx: 500.0, dy: 0.0 });
//! let (snapshot, report) = solve_scene(scene, &config).unwrap();
//! assert!(report.converged);
//! assert_eq!(snapshot.shape("inner").unwrap().se, [200.0, 40.0]);
//! ```

pub mod constraint;
pub mod error;
pub mod scene;

pub use constraint::{
    Canvas, Constraint, ConstraintId, ConstraintSolver, SolveReport, SolverConfig,
};
pub use error::{EditError, SceneError};
pub use scene::{Scene, Snapshot};

use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a scene through the solver
#[derive(Debug, Error)]
pub enum RunError {
    /// Error while loading the scene
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Error while applying an edit
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// A user gesture applied to a loaded scene before solving
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Move { name: String, dx: f64, dy: f64 },
    Resize { name: String, width: f64, height: f64 },
    Drag { port: String, x: f64, y: f64 },
}

impl Edit {
    /// Parse a `--move NAME:DX,DY` argument
    pub fn parse_move(spec: &str) -> Result<Self, EditError> {
        let (name, dx, dy) = parse_spec(spec, "NAME:DX,DY")?;
        Ok(Edit::Move { name, dx, dy })
    }

    /// Parse a `--resize NAME:W,H` argument
    pub fn parse_resize(spec: &str) -> Result<Self, EditError> {
        let (name, width, height) = parse_spec(spec, "NAME:W,H")?;
        Ok(Edit::Resize { name, width, height })
    }

    /// Parse a `--drag PORT:X,Y` argument
    pub fn parse_drag(spec: &str) -> Result<Self, EditError> {
        let (port, x, y) = parse_spec(spec, "PORT:X,Y")?;
        Ok(Edit::Drag { port, x, y })
    }

    /// Apply the edit to a scene
    pub fn apply(&self, scene: &mut Scene) -> Result<(), EditError> {
        match self {
            Edit::Move { name, dx, dy } => scene.move_shape(name, *dx, *dy),
            Edit::Resize { name, width, height } => scene.resize_shape(name, *width, *height),
            Edit::Drag { port, x, y } => scene.drag_port(port, *x, *y),
        }
    }
}

/// Split `NAME:A,B` into its parts. Names may contain `:`; the last one
/// separates the numbers.
fn parse_spec(spec: &str, expected: &str) -> Result<(String, f64, f64), EditError> {
    let invalid = || EditError::invalid_spec(spec, format!("expected {expected}"));

    let (name, numbers) = spec.rsplit_once(':').ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }
    let (a, b) = numbers.split_once(',').ok_or_else(invalid)?;
    let parse = |text: &str| {
        let text = text.trim();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(EditError::invalid_spec(spec, format!("'{text}' is not a finite number"))),
            Err(e) => Err(EditError::invalid_spec(spec, format!("'{text}': {e}"))),
        }
    };

    Ok((name.to_string(), parse(a)?, parse(b)?))
}

/// Configuration for a complete load, edit and solve run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Edits applied in order after loading
    pub edits: Vec<Edit>,
    /// Overrides the scene's `[solver] max_iterations`
    pub max_iterations: Option<usize>,
}

impl RunConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edit to apply before solving
    pub fn with_edit(mut self, edit: Edit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Override the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Load a scene, settle it, apply the edits and settle it again
///
/// The first solve brings a freshly loaded scene into a consistent state so
/// that edits start from the same geometry an editor would show.
pub fn solve_scene(source: &str, config: &RunConfig) -> Result<(Snapshot, SolveReport), RunError> {
    let mut scene = Scene::from_str(source)?;
    if let Some(max_iterations) = config.max_iterations {
        scene.set_max_iterations(max_iterations);
    }

    let initial = scene.solve();
    info!(passes = initial.passes, converged = initial.converged, "scene settled");

    for edit in &config.edits {
        edit.apply(&mut scene)?;
    }
    let report = scene.solve();
    info!(
        edits = config.edits.len(),
        passes = report.passes,
        converged = report.converged,
        "edits solved"
    );

    Ok((scene.snapshot(), report))
}
