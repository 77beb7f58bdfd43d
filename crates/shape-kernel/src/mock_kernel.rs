//! MockKernel: deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Produces synthetic box topology with predictable entity counts and
//! signatures. Used by the host and feature crates for unit testing.

use std::collections::HashMap;

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// Face definition: (corner vertex indices, outward normal).
type FaceDef = ([usize; 4], [f64; 3]);

#[derive(Debug, Clone)]
struct MockVertex {
    id: KernelId,
    position: [f64; 3],
}

#[derive(Debug, Clone)]
struct MockEdge {
    id: KernelId,
}

#[derive(Debug, Clone)]
struct MockFace {
    id: KernelId,
    corners: [usize; 4],
    normal: [f64; 3],
}

/// A synthetic solid with deterministic topology.
#[derive(Debug, Clone)]
struct MockSolid {
    vertices: Vec<MockVertex>,
    edges: Vec<MockEdge>,
    faces: Vec<MockFace>,
}

impl MockSolid {
    fn face_signature(&self, face: &MockFace) -> FaceSignature {
        let p: Vec<[f64; 3]> = face
            .corners
            .iter()
            .map(|&i| self.vertices[i].position)
            .collect();
        let mut centroid = [0.0; 3];
        for corner in &p {
            for i in 0..3 {
                centroid[i] += corner[i] / 4.0;
            }
        }
        let a = sub(p[1], p[0]);
        let b = sub(p[3], p[0]);
        let c = cross(a, b);
        let area = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
        FaceSignature {
            normal: face.normal,
            centroid,
            area,
        }
    }
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    /// Number of solids currently held by the kernel.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    /// Build 8 vertices, 12 edges, 6 faces spanning (0,0,0)..(x,y,z).
    fn make_box_solid(&mut self, x: f64, y: f64, z: f64) -> MockSolid {
        let positions = [
            [0.0, 0.0, 0.0],
            [x, 0.0, 0.0],
            [x, y, 0.0],
            [0.0, y, 0.0],
            [0.0, 0.0, z],
            [x, 0.0, z],
            [x, y, z],
            [0.0, y, z],
        ];

        let vertices: Vec<MockVertex> = positions
            .iter()
            .map(|&position| MockVertex {
                id: self.alloc_id(),
                position,
            })
            .collect();

        // 4 bottom, 4 top, 4 vertical
        let edges: Vec<MockEdge> = (0..12).map(|_| MockEdge { id: self.alloc_id() }).collect();

        // Corners wind counter-clockwise seen from outside.
        let face_defs: [FaceDef; 6] = [
            ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
            ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([3, 7, 6, 2], [0.0, 1.0, 0.0]),
            ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
            ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
        ];

        let faces: Vec<MockFace> = face_defs
            .iter()
            .map(|&(corners, normal)| MockFace {
                id: self.alloc_id(),
                corners,
                normal,
            })
            .collect();

        MockSolid {
            vertices,
            edges,
            faces,
        }
    }

    fn get(&self, handle: &KernelSolidHandle) -> Option<&MockSolid> {
        self.solids.get(&handle.id())
    }

    /// Two triangles per face = 12 triangles for a box.
    fn tessellate_box(solid: &MockSolid) -> RenderMesh {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        let mut face_ranges = Vec::new();

        for face in &solid.faces {
            let start_index = indices.len() as u32;
            let base_vertex = (vertices.len() / 3) as u32;
            let n = face.normal;

            for &ci in &face.corners {
                let p = solid.vertices[ci].position;
                vertices.extend_from_slice(&[p[0] as f32, p[1] as f32, p[2] as f32]);
                normals.extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
            }

            indices.extend_from_slice(&[
                base_vertex,
                base_vertex + 1,
                base_vertex + 2,
                base_vertex,
                base_vertex + 2,
                base_vertex + 3,
            ]);

            face_ranges.push(FaceRange {
                face_id: face.id,
                start_index,
                end_index: indices.len() as u32,
            });
        }

        RenderMesh {
            vertices,
            normals,
            indices,
            face_ranges,
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl Kernel for MockKernel {
    fn make_box(&mut self, x: f64, y: f64, z: f64) -> Result<KernelSolidHandle, KernelError> {
        validate_box(x, y, z)?;
        let solid = self.make_box_solid(x, y, z);
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        Ok(handle)
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let mock = self.get(solid).ok_or_else(|| KernelError::SolidNotFound {
            handle: solid.clone(),
        })?;
        Ok(Self::tessellate_box(mock))
    }

    fn release(&mut self, solid: &KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.get(solid)
            .map(|s| s.faces.iter().map(|f| f.id).collect())
            .unwrap_or_default()
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.get(solid)
            .map(|s| s.edges.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.get(solid)
            .map(|s| s.vertices.iter().map(|v| v.id).collect())
            .unwrap_or_default()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]> {
        let mock = self.get(solid)?;
        let mut bbox = [f64::MAX, f64::MAX, f64::MAX, f64::MIN, f64::MIN, f64::MIN];
        for v in &mock.vertices {
            for i in 0..3 {
                bbox[i] = bbox[i].min(v.position[i]);
                bbox[i + 3] = bbox[i + 3].max(v.position[i]);
            }
        }
        Some(bbox)
    }

    fn compute_all_signatures(&self, solid: &KernelSolidHandle) -> Vec<(KernelId, FaceSignature)> {
        let Some(mock) = self.get(solid) else {
            return Vec::new();
        };
        mock.faces
            .iter()
            .map(|f| (f.id, mock.face_signature(f)))
            .collect()
    }
}
