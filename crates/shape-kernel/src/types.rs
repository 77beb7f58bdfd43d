use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal entity identifier.
/// Stable within a single kernel session but NOT across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("degenerate box {x} x {y} x {z}: every edge must be finite and positive")]
    DegenerateBox { x: f64, y: f64, z: f64 },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("solid not found: {handle:?}")]
    SolidNotFound { handle: KernelSolidHandle },
}

/// Check box dimensions before handing them to a kernel.
pub fn validate_box(x: f64, y: f64, z: f64) -> Result<(), KernelError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(x) && ok(y) && ok(z) {
        Ok(())
    } else {
        Err(KernelError::DegenerateBox { x, y, z })
    }
}

/// Tessellated triangle mesh for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
    /// Mapping from triangle ranges to logical faces.
    pub face_ranges: Vec<FaceRange>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of the mesh vertices as (min, max).
    /// Returns None for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.vertices.len() < 3 {
            return None;
        }
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for chunk in self.vertices.chunks_exact(3) {
            for i in 0..3 {
                min[i] = min[i].min(chunk[i]);
                max[i] = max[i].max(chunk[i]);
            }
        }
        Some((min, max))
    }
}

/// Maps a contiguous range of triangles to a logical face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRange {
    /// The KernelId of the face this range belongs to.
    pub face_id: KernelId,
    /// Start index in the indices array (inclusive).
    pub start_index: u32,
    /// End index in the indices array (exclusive).
    pub end_index: u32,
}

/// Geometric signature of a planar face.
///
/// Two solids built from the same parameters have equal signature lists,
/// even though their KernelIds differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSignature {
    /// Outward-pointing unit normal.
    pub normal: [f64; 3],
    /// Face centroid.
    pub centroid: [f64; 3],
    /// Face area.
    pub area: f64,
}

impl FaceSignature {
    /// Compare two signatures within an absolute tolerance.
    pub fn approx_eq(&self, other: &FaceSignature, tol: f64) -> bool {
        let close = |a: &[f64; 3], b: &[f64; 3]| (0..3).all(|i| (a[i] - b[i]).abs() <= tol);
        close(&self.normal, &other.normal)
            && close(&self.centroid, &other.centroid)
            && (self.area - other.area).abs() <= tol
    }
}

/// Sort signatures into a canonical order so lists from different
/// kernel sessions can be compared element-wise.
pub fn sort_signatures(sigs: &mut [FaceSignature]) {
    sigs.sort_by(|a, b| {
        a.centroid
            .partial_cmp(&b.centroid)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.normal.partial_cmp(&b.normal).unwrap_or(std::cmp::Ordering::Equal))
    });
}
