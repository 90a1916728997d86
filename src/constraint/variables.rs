//! Scalar variable storage with the epsilon-guarded update
//!
//! Every coordinate a constraint reads or writes lives in a [`Variables`]
//! arena owned by the canvas. Constraints only ever hold [`VarId`] handles
//! and mutate through [`Variables::update`], which drops writes that would
//! change a value by less than [`EPSILON`]. This keeps repeated fixpoint
//! passes from oscillating on rounding noise and lets the solver detect a
//! quiet pass by watching the revision counter.

/// Smallest change a constraint is allowed to write
pub const EPSILON: f64 = 1e-6;

/// Handle to a scalar variable in a [`Variables`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of scalar variables
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: Vec<f64>,
    /// Number of writes that actually changed a value
    revision: u64,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new variable holding `value`
    pub fn add(&mut self, value: f64) -> VarId {
        self.values.push(value);
        VarId(self.values.len() - 1)
    }

    /// Current value of a variable
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn value(&self, id: VarId) -> f64 {
        self.values[id.0]
    }

    /// Epsilon-guarded write used by constraints.
    ///
    /// Returns `true` when the value was written.
    pub fn update(&mut self, id: VarId, value: f64) -> bool {
        let slot = &mut self.values[id.0];
        if (*slot - value).abs() > EPSILON {
            *slot = value;
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Unguarded write for edits made by the owner of the variable
    pub fn set(&mut self, id: VarId, value: f64) {
        let slot = &mut self.values[id.0];
        if *slot != value {
            *slot = value;
            self.revision += 1;
        }
    }

    /// Monotonic counter of value changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Count a change of canvas state held outside the arena
    pub(crate) fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
