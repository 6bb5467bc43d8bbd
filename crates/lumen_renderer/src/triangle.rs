//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! Triangles are single-sided: only rays travelling against the face normal
//! `(v1 - v0) x (v2 - v0)` can hit them.

use crate::{
    gen_f64,
    hittable::{Hit, Hittable, SurfaceSample, EPSILON},
};
use lumen_core::MaterialId;
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Material
    material: MaterialId,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialId) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: face_normal(v0, v1, v2),
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        match intersect_triangle(ray, self.v0, self.v1, self.v2) {
            Some(t) if hit.accept_range().surrounds(t) => {
                hit.record(t, self.normal, self.material, true);
                true
            }
            _ => false,
        }
    }

    fn sample(&self, _reference: Vec3, rng: &mut dyn RngCore) -> SurfaceSample {
        SurfaceSample {
            point: sample_triangle(self.v0, self.v1, self.v2, rng),
            area: self.area(),
        }
    }

    fn area(&self) -> f64 {
        triangle_area(self.v0, self.v1, self.v2)
    }
}

/// Unit face normal of a counter-clockwise triangle.
#[inline]
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize()
}

#[inline]
pub(crate) fn triangle_area(v0: Vec3, v1: Vec3, v2: Vec3) -> f64 {
    0.5 * (v1 - v0).cross(v2 - v0).length()
}

/// Möller-Trumbore test shared by triangles and meshes.
///
/// Returns the hit distance when it lies beyond `EPSILON`. The barycentric
/// bounds are checked against the unnormalised determinant, so only one
/// division happens per accepted hit. A determinant that is not strictly
/// positive means the ray is parallel or hits the back face.
#[inline]
pub(crate) fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det <= 0.0 {
        return None;
    }

    let tvec = ray.origin - v0;
    let u = tvec.dot(pvec);
    if u < 0.0 || u > det {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec);
    if v < 0.0 || u + v > det {
        return None;
    }

    let t = edge2.dot(qvec) / det;
    (t > EPSILON).then_some(t)
}

/// Uniform point on a triangle using the square-root barycentric warp.
pub(crate) fn sample_triangle(v0: Vec3, v1: Vec3, v2: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let su = gen_f64(rng).sqrt();
    let r2 = gen_f64(rng);
    let b0 = 1.0 - su;
    let b1 = su * (1.0 - r2);
    let b2 = su * r2;
    v0 * b0 + v1 * b1 + v2 * b2
}
