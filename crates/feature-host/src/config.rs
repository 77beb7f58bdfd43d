//! Host configuration.

/// Settings controlling how the host drives its delegates.
#[derive(Debug, Clone, Copy)]
pub struct HostConfig {
    /// Chordal tolerance for display meshes (millimetres).
    pub tessellation_tolerance: f64,
    /// Maximum number of change notifications drained for one property write.
    pub max_change_cascade: usize,
    /// Maximum number of transactions kept for undo.
    pub undo_limit: usize,
    /// Whether a successful property write recomputes the object.
    pub auto_recompute: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tessellation_tolerance: 0.1,
            max_change_cascade: 64,
            undo_limit: 100,
            auto_recompute: true,
        }
    }
}

impl HostConfig {
    /// Property writes only; shapes are rebuilt on explicit recompute.
    pub fn manual_recompute() -> Self {
        Self {
            auto_recompute: false,
            ..Self::default()
        }
    }

    /// No undo history.
    pub fn without_undo() -> Self {
        Self {
            undo_limit: 0,
            ..Self::default()
        }
    }
}
