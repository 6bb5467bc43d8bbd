//! Hittable trait and the Hit accumulator for ray-object intersection.

use lumen_core::MaterialId;
use lumen_math::{Interval, Ray, Vec3};
use rand::RngCore;

/// Minimum hit distance. Secondary rays start exactly on a surface, so
/// anything closer than this is the surface the ray just left.
pub const EPSILON: f64 = 1e-4;

/// Closest intersection found so far along one ray.
///
/// A scene query starts from `Hit::default()` (t = +inf) and lets every
/// primitive try to improve it. A primitive only writes the record when it
/// finds an intersection strictly inside `(EPSILON, t)`, so after the query
/// the record describes the nearest primitive overall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub t: f64,
    /// Geometric surface normal (outward for spheres, face normal for triangles)
    pub normal: Vec3,
    /// Material of the nearest primitive, `None` until something is hit
    pub material: Option<MaterialId>,
    /// True when the ray arrives from outside the surface
    pub into: bool,
}

impl Default for Hit {
    fn default() -> Self {
        Self {
            t: f64::INFINITY,
            normal: Vec3::ZERO,
            material: None,
            into: false,
        }
    }
}

impl Hit {
    /// Whether anything has been recorded.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t < f64::INFINITY
    }

    /// Range a candidate distance must fall in to replace this record.
    #[inline]
    pub fn accept_range(&self) -> Interval {
        Interval::new(EPSILON, self.t)
    }

    /// Overwrite the record with a closer intersection.
    #[inline]
    pub fn record(&mut self, t: f64, normal: Vec3, material: MaterialId, into: bool) {
        self.t = t;
        self.normal = normal;
        self.material = Some(material);
        self.into = into;
    }

    /// Point of intersection along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

/// A point picked on a primitive's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Sampled point, uniformly distributed over the surface
    pub point: Vec3,
    /// Total surface area of the primitive
    pub area: f64,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test the ray against this object and tighten `hit` if it is closer.
    ///
    /// Returns true if the record was updated.
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool;

    /// Pick a point on the surface, for light sampling.
    ///
    /// The point is uniform over the whole surface; `reference` is the
    /// shading point the sample is meant for and does not bias the choice.
    fn sample(&self, reference: Vec3, rng: &mut dyn RngCore) -> SurfaceSample;

    /// Total surface area.
    fn area(&self) -> f64;
}
