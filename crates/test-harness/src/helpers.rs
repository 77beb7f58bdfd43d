//! Helper functions: error type, unit conversion, mesh math, logging setup.

use feature_host::HostError;
use lumber_types::MM_PER_INCH;
use shape_kernel::RenderMesh;
use tracing_subscriber::EnvFilter;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("object not found: {name}")]
    ObjectNotFound { name: String },

    #[error("no solid for object: {name}")]
    NoSolid { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("host error: {0}")]
    Host(#[from] HostError),
}

// ── Units ───────────────────────────────────────────────────────────────────

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

// ── Mesh Math ───────────────────────────────────────────────────────────────

/// Axis-aligned bounds of a mesh, `(min, max)`. An empty mesh gives zeros.
pub fn mesh_bounding_box(mesh: &RenderMesh) -> ([f32; 3], [f32; 3]) {
    mesh.bounds().unwrap_or(([0.0; 3], [0.0; 3]))
}

/// Total surface area of a triangle mesh.
pub fn mesh_surface_area(mesh: &RenderMesh) -> f64 {
    let vertex = |i: u32| {
        let i = i as usize * 3;
        [
            mesh.vertices[i] as f64,
            mesh.vertices[i + 1] as f64,
            mesh.vertices[i + 2] as f64,
        ]
    };
    mesh.indices
        .chunks_exact(3)
        .map(|tri| {
            let (a, b, c) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]));
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            0.5 * (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
        })
        .sum()
}

// ── Logging ─────────────────────────────────────────────────────────────────

/// Route `tracing` output to the test writer. Honors `RUST_LOG`, defaulting
/// to `warn`. Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_kernel::{Kernel, MockKernel};

    #[test]
    fn inch_round_trip() {
        assert!((inches_to_mm(96.0) - 2438.4).abs() < 1e-9);
        assert!((mm_to_inches(38.1) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn box_mesh_area() {
        let mut k = MockKernel::new();
        let h = k.make_box(1.0, 2.0, 3.0).unwrap();
        let mesh = k.tessellate(&h, 0.1).unwrap();
        assert!((mesh_surface_area(&mesh) - 22.0).abs() < 1e-6);
        assert_eq!(mesh_bounding_box(&mesh), ([0.0; 3], [1.0, 2.0, 3.0]));
    }

    #[test]
    fn logging_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}
