//! TruckKernel: real geometry kernel wrapping truck's API.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use truck_modeling::topology::{Face, Solid};

use crate::primitives;
use crate::tessellation;
use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Option<&Solid> {
        self.solids.get(&handle.id())
    }

    /// Number of solids currently held by the kernel.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_box(&mut self, x: f64, y: f64, z: f64) -> Result<KernelSolidHandle, KernelError> {
        validate_box(x, y, z)?;
        debug!(x, y, z, "truck box sweep");
        Ok(self.store_solid(primitives::make_box(x, y, z)))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self
            .solids
            .get(&solid.id())
            .ok_or_else(|| KernelError::SolidNotFound {
                handle: solid.clone(),
            })?;
        tessellation::tessellate_solid(truck_solid, solid, tolerance)
    }

    fn release(&mut self, solid: &KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}

// Entity ids encode their solid: handle * 10000 + offset, with faces at
// 0.., edges at 1000.. and vertices at 2000..

impl KernelIntrospect for TruckKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        for shell in truck_solid.boundaries().iter() {
            for (i, _face) in shell.face_iter().enumerate() {
                ids.push(KernelId(solid.id() * 10000 + i as u64));
            }
        }
        ids
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for shell in truck_solid.boundaries().iter() {
            for edge in shell.edge_iter() {
                if seen.insert(edge.id()) {
                    ids.push(KernelId(solid.id() * 10000 + 1000 + ids.len() as u64));
                }
            }
        }
        ids
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for shell in truck_solid.boundaries().iter() {
            for v in shell.vertex_iter() {
                if seen.insert(v.id()) {
                    ids.push(KernelId(solid.id() * 10000 + 2000 + ids.len() as u64));
                }
            }
        }
        ids
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]> {
        let truck_solid = self.get_solid(solid)?;
        let mut bbox = [f64::MAX, f64::MAX, f64::MAX, f64::MIN, f64::MIN, f64::MIN];
        let mut any = false;
        for shell in truck_solid.boundaries().iter() {
            for v in shell.vertex_iter() {
                let p = v.point();
                for i in 0..3 {
                    bbox[i] = bbox[i].min(p[i]);
                    bbox[i + 3] = bbox[i + 3].max(p[i]);
                }
                any = true;
            }
        }
        any.then_some(bbox)
    }

    fn compute_all_signatures(&self, solid: &KernelSolidHandle) -> Vec<(KernelId, FaceSignature)> {
        let Some(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for shell in truck_solid.boundaries().iter() {
            for (i, face) in shell.face_iter().enumerate() {
                out.push((
                    KernelId(solid.id() * 10000 + i as u64),
                    planar_face_signature(face),
                ));
            }
        }
        out
    }
}

/// Signature of a planar face from its boundary polygon (Newell's method).
fn planar_face_signature(face: &Face) -> FaceSignature {
    let mut points: Vec<[f64; 3]> = Vec::new();
    for wire in face.boundaries() {
        for v in wire.vertex_iter() {
            let p = v.point();
            points.push([p[0], p[1], p[2]]);
        }
    }

    let n = points.len();
    if n < 3 {
        return FaceSignature {
            normal: [0.0; 3],
            centroid: [0.0; 3],
            area: 0.0,
        };
    }

    let mut newell = [0.0; 3];
    let mut centroid = [0.0; 3];
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        newell[0] += (a[1] - b[1]) * (a[2] + b[2]);
        newell[1] += (a[2] - b[2]) * (a[0] + b[0]);
        newell[2] += (a[0] - b[0]) * (a[1] + b[1]);
        for k in 0..3 {
            centroid[k] += a[k] / n as f64;
        }
    }

    let len = (newell[0] * newell[0] + newell[1] * newell[1] + newell[2] * newell[2]).sqrt();
    let normal = if len > 1e-12 {
        [newell[0] / len, newell[1] / len, newell[2] / len]
    } else {
        [0.0; 3]
    };

    FaceSignature {
        normal,
        centroid,
        area: len / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truck_kernel_make_and_tessellate_box() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(1.0, 1.0, 1.0).unwrap();

        let mesh = kernel.tessellate(&handle, 0.1).unwrap();

        assert!(!mesh.vertices.is_empty(), "Mesh should have vertices");
        assert!(!mesh.indices.is_empty(), "Mesh should have indices");
        assert_eq!(mesh.face_ranges.len(), 6, "Box should have 6 face ranges");

        let total_indices = mesh.indices.len() as u32;
        let covered: u32 = mesh
            .face_ranges
            .iter()
            .map(|r| r.end_index - r.start_index)
            .sum();
        assert_eq!(covered, total_indices, "Face ranges should cover all indices");
    }

    #[test]
    fn test_truck_face_ranges_name_listed_faces() {
        let mut kernel = TruckKernel::new();
        let first = kernel.make_box(1.0, 2.0, 3.0).unwrap();
        let second = kernel.make_box(4.0, 5.0, 6.0).unwrap();

        for handle in [&first, &second] {
            let mesh = kernel.tessellate(handle, 0.1).unwrap();
            let mut ranged: Vec<KernelId> = mesh.face_ranges.iter().map(|r| r.face_id).collect();
            ranged.sort_by_key(|id| id.0);
            let mut listed = kernel.list_faces(handle);
            listed.sort_by_key(|id| id.0);
            assert_eq!(ranged, listed);

            let signed: HashSet<KernelId> = kernel
                .compute_all_signatures(handle)
                .into_iter()
                .map(|(id, _)| id)
                .collect();
            assert!(ranged.iter().all(|id| signed.contains(id)));
        }

        // Re-tessellating yields the same ids.
        let again = kernel.tessellate(&first, 0.1).unwrap();
        assert!(again.face_ranges.iter().all(|r| r.face_id.0 / 10000 == first.id()));
    }

    #[test]
    fn test_truck_kernel_counts_and_bounds() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(2.0, 3.0, 4.0).unwrap();

        assert_eq!(kernel.list_faces(&handle).len(), 6);
        assert_eq!(kernel.list_edges(&handle).len(), 12);
        assert_eq!(kernel.list_vertices(&handle).len(), 8);

        let bbox = kernel.bounding_box(&handle).unwrap();
        let expected = [0.0, 0.0, 0.0, 2.0, 3.0, 4.0];
        for i in 0..6 {
            assert!((bbox[i] - expected[i]).abs() < 1e-10, "bbox[{i}]");
        }
    }

    #[test]
    fn test_truck_face_areas() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(2.0, 3.0, 4.0).unwrap();
        let mut areas: Vec<f64> = kernel
            .compute_all_signatures(&handle)
            .into_iter()
            .map(|(_, s)| s.area)
            .collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected = [6.0, 6.0, 8.0, 8.0, 12.0, 12.0];
        for (a, e) in areas.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "area {a} != {e}");
        }
    }

    #[test]
    fn test_truck_release() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(1.0, 1.0, 1.0).unwrap();
        kernel.release(&handle);
        assert_eq!(kernel.solid_count(), 0);
        assert!(kernel.bounding_box(&handle).is_none());
    }
}
