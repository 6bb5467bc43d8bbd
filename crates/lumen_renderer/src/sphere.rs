//! Sphere primitive for ray tracing.

use crate::{
    gen_f64,
    hittable::{Hit, Hittable, SurfaceSample, EPSILON},
};
use lumen_core::MaterialId;
use lumen_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;
use std::f64::consts::PI;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Distance to the nearest root beyond `EPSILON`, if any.
    ///
    /// Assumes a unit-length ray direction.
    fn nearest_root(&self, ray: &Ray) -> Option<f64> {
        let op = self.center - ray.origin;
        let b = op.dot(ray.direction);
        let det = b * b - op.length_squared() + self.radius * self.radius;
        if det < 0.0 {
            return None;
        }

        let det = det.sqrt();
        let near = b - det;
        if near > EPSILON {
            return Some(near);
        }
        let far = b + det;
        (far > EPSILON).then_some(far)
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let t = match self.nearest_root(ray) {
            Some(t) if hit.accept_range().surrounds(t) => t,
            _ => return false,
        };

        let mut normal = ray.at(t) - self.center;
        normal.normalize_mut();
        let into = normal.dot(ray.direction) < 0.0;
        hit.record(t, normal, self.material, into);
        true
    }

    fn sample(&self, _reference: Vec3, rng: &mut dyn RngCore) -> SurfaceSample {
        // Uniform direction: z uniform in [-1, 1], azimuth uniform
        let z = 1.0 - 2.0 * gen_f64(rng);
        let phi = 2.0 * PI * gen_f64(rng);
        let ring = (1.0 - z * z).max(0.0).sqrt();
        let direction = Vec3::new(ring * phi.cos(), ring * phi.sin(), z);

        SurfaceSample {
            point: self.center + direction * self.radius,
            area: self.area(),
        }
    }

    fn area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, MaterialId(0))
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::default();

        assert!(sphere.intersect(&ray, &mut hit));
        assert!((hit.t - 4.0).abs() < 1e-12);
        assert!((hit.normal - Vec3::Z).length() < 1e-12);
        assert!(hit.into);
        assert_eq!(hit.material, Some(MaterialId(0)));
    }

    #[test]
    fn test_sphere_distance_matches_geometry() {
        let sphere = Sphere::new(Vec3::new(3.0, -2.0, 7.0), 2.5, MaterialId(1));
        let origin = Vec3::new(-4.0, 1.0, 0.5);
        let ray = Ray::new(origin, (sphere.center() - origin).normalize());
        let mut hit = Hit::default();

        assert!(sphere.intersect(&ray, &mut hit));
        let expected = (origin - sphere.center()).length() - sphere.radius();
        assert!((hit.t - expected).abs() < 1e-9);

        let radial = (ray.at(hit.t) - sphere.center()).normalize();
        assert!((hit.normal - radial).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut hit = Hit::default();

        assert!(sphere.intersect(&ray, &mut hit));
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!(!hit.into);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::default();

        assert!(!sphere.intersect(&ray, &mut hit));
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let mut hit = Hit::default();

        assert!(!sphere.intersect(&ray, &mut hit));
    }

    #[test]
    fn test_sphere_keeps_closer_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::default();
        hit.record(2.0, Vec3::Y, MaterialId(9), true);

        assert!(!sphere.intersect(&ray, &mut hit));
        assert_eq!(hit.t, 2.0);
        assert_eq!(hit.material, Some(MaterialId(9)));
    }

    #[test]
    fn test_sphere_sample_on_surface() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0, MaterialId(0));
        let mut rng = StdRng::seed_from_u64(7);

        let mut mean = Vec3::ZERO;
        let n = 4000;
        for _ in 0..n {
            let sample = sphere.sample(Vec3::ZERO, &mut rng);
            let r = (sample.point - sphere.center()).length();
            assert!((r - 2.0).abs() < 1e-9);
            assert!((sample.area - 16.0 * PI).abs() < 1e-9);
            mean += sample.point - sphere.center();
        }

        // Uniform samples average out near the center
        assert!((mean / n as f64).length() < 0.15);
    }
}
