//! Display meshing for truck solids.
//!
//! Each B-rep face is triangulated separately and appended to one
//! [`RenderMesh`]; a [`FaceRange`] records which index span came from which
//! face so picking can map triangles back to faces.

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;

use crate::types::*;

/// Accumulates per-face meshes into flat display buffers.
#[derive(Default)]
struct MeshBuffers {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    face_ranges: Vec<FaceRange>,
}

impl MeshBuffers {
    fn append(&mut self, face_id: KernelId, mesh: &PolygonMesh) {
        let base = (self.vertices.len() / 3) as u32;
        let start_index = self.indices.len() as u32;

        for p in mesh.positions() {
            self.vertices.extend([p[0] as f32, p[1] as f32, p[2] as f32]);
        }
        // Planar faces may come back without normals.
        match mesh.normals().as_slice() {
            [] => self
                .normals
                .extend(mesh.positions().iter().flat_map(|_| [0.0f32, 0.0, 1.0])),
            normals => {
                for n in normals {
                    self.normals.extend([n[0] as f32, n[1] as f32, n[2] as f32]);
                }
            }
        }
        self.indices.extend(
            mesh.tri_faces()
                .iter()
                .flat_map(|tri| tri.iter().map(move |v| v.pos as u32 + base)),
        );

        let end_index = self.indices.len() as u32;
        if end_index > start_index {
            self.face_ranges.push(FaceRange {
                face_id,
                start_index,
                end_index,
            });
        }
    }

    fn finish(self) -> Result<RenderMesh, KernelError> {
        if self.indices.is_empty() {
            return Err(KernelError::TessellationFailed {
                reason: "solid produced no triangles".to_string(),
            });
        }
        Ok(RenderMesh {
            vertices: self.vertices,
            normals: self.normals,
            indices: self.indices,
            face_ranges: self.face_ranges,
        })
    }
}

/// Triangulate `solid` within `tolerance` (millimetres). Face ids follow
/// the kernel's entity scheme, `handle * 10000 + face index`, so ranges name
/// the same faces introspection lists.
pub fn tessellate_solid(
    solid: &truck_modeling::Solid,
    handle: &KernelSolidHandle,
    tolerance: f64,
) -> Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {tolerance}"),
        });
    }

    let meshed = solid.triangulation(tolerance);
    let mut buffers = MeshBuffers::default();

    for shell in meshed.boundaries().iter() {
        for (i, face) in shell.face_iter().enumerate() {
            let Some(mut mesh) = face.surface() else {
                continue;
            };
            if !face.orientation() {
                mesh.invert();
            }
            buffers.append(KernelId(handle.id() * 10000 + i as u64), &mesh);
        }
    }

    buffers.finish()
}
