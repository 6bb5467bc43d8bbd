//! Indexed triangle mesh primitive.

use crate::{
    gen_f64,
    hittable::{Hit, Hittable, SurfaceSample},
    triangle::{face_normal, intersect_triangle, sample_triangle, triangle_area},
};
use lumen_core::{MaterialId, Mesh};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// A mesh of triangles sharing one vertex array and one material.
///
/// Every face is tested on each query; there is no acceleration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    mesh: Mesh,
    material: MaterialId,
    /// Running sum of face areas, used to pick faces by area
    cumulative_area: Vec<f64>,
}

impl TriangleMesh {
    /// Wrap a validated mesh.
    pub fn new(mesh: Mesh, material: MaterialId) -> Self {
        let cumulative_area = mesh
            .triangles()
            .scan(0.0, |total, [v0, v1, v2]| {
                *total += triangle_area(v0, v1, v2);
                Some(*total)
            })
            .collect();

        Self {
            mesh,
            material,
            cumulative_area,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Face containing the cumulative area `target`.
    fn face_at(&self, target: f64) -> usize {
        let face = self.cumulative_area.partition_point(|&a| a <= target);
        face.min(self.cumulative_area.len().saturating_sub(1))
    }
}

impl Hittable for TriangleMesh {
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let mut nearest: Option<(f64, usize)> = None;

        for (face, [v0, v1, v2]) in self.mesh.triangles().enumerate() {
            if let Some(t) = intersect_triangle(ray, v0, v1, v2) {
                let limit = nearest.map_or(hit.t, |(best, _)| best);
                if t < limit {
                    nearest = Some((t, face));
                }
            }
        }

        match nearest {
            Some((t, face)) => {
                let [v0, v1, v2] = self.mesh.triangle(face);
                hit.record(t, face_normal(v0, v1, v2), self.material, true);
                true
            }
            None => false,
        }
    }

    fn sample(&self, _reference: Vec3, rng: &mut dyn RngCore) -> SurfaceSample {
        let area = self.area();
        let face = self.face_at(gen_f64(rng) * area);
        let [v0, v1, v2] = self.mesh.triangle(face);

        SurfaceSample {
            point: sample_triangle(v0, v1, v2, rng),
            area,
        }
    }

    fn area(&self) -> f64 {
        self.cumulative_area.last().copied().unwrap_or(0.0)
    }
}
