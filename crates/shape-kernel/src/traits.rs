use crate::types::*;

/// Core geometry kernel trait. Provides shape construction and meshing.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
pub trait Kernel {
    /// Create an axis-aligned box with one corner at the origin and the
    /// opposite corner at (x, y, z).
    fn make_box(&mut self, x: f64, y: f64, z: f64) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Drop a solid that is no longer referenced. Unknown handles are ignored.
    fn release(&mut self, solid: &KernelSolidHandle);
}

/// Topology introspection trait. Provides read-only queries on kernel geometry.
pub trait KernelIntrospect {
    /// List all faces of a solid.
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// List all edges of a solid.
    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// List all vertices of a solid.
    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// Axis-aligned bounding box [min_x, min_y, min_z, max_x, max_y, max_z].
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]>;

    /// Compute signatures for all faces of a solid.
    fn compute_all_signatures(&self, solid: &KernelSolidHandle) -> Vec<(KernelId, FaceSignature)>;
}
