//! Closed set of scene primitives.

use crate::{
    hittable::{Hit, Hittable, SurfaceSample},
    mesh::TriangleMesh,
    sphere::Sphere,
    triangle::Triangle,
};
use lumen_core::{Geometry, MaterialId, ShapeInstance};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Any primitive a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(TriangleMesh),
}

impl Primitive {
    /// Build the primitive for a resolved catalog shape.
    pub fn from_shape(shape: ShapeInstance) -> Self {
        match shape.geometry {
            Geometry::Sphere { center, radius } => {
                Primitive::Sphere(Sphere::new(center, radius, shape.material))
            }
            Geometry::Triangle { vertices: [v0, v1, v2] } => {
                Primitive::Triangle(Triangle::new(v0, v1, v2, shape.material))
            }
            Geometry::Mesh(mesh) => Primitive::Mesh(TriangleMesh::new(mesh, shape.material)),
        }
    }

    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(s) => s.material(),
            Primitive::Triangle(t) => t.material(),
            Primitive::Mesh(m) => m.material(),
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        match self {
            Primitive::Sphere(s) => s.intersect(ray, hit),
            Primitive::Triangle(t) => t.intersect(ray, hit),
            Primitive::Mesh(m) => m.intersect(ray, hit),
        }
    }

    fn sample(&self, reference: Vec3, rng: &mut dyn RngCore) -> SurfaceSample {
        match self {
            Primitive::Sphere(s) => s.sample(reference, rng),
            Primitive::Triangle(t) => t.sample(reference, rng),
            Primitive::Mesh(m) => m.sample(reference, rng),
        }
    }

    fn area(&self) -> f64 {
        match self {
            Primitive::Sphere(s) => s.area(),
            Primitive::Triangle(t) => t.area(),
            Primitive::Mesh(m) => m.area(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<TriangleMesh> for Primitive {
    fn from(mesh: TriangleMesh) -> Self {
        Primitive::Mesh(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Mesh;

    #[test]
    fn test_from_shape() {
        let sphere = Primitive::from_shape(ShapeInstance {
            name: "ball".into(),
            material: MaterialId(3),
            geometry: Geometry::Sphere {
                center: Vec3::ZERO,
                radius: 2.0,
            },
        });
        assert!(matches!(sphere, Primitive::Sphere(_)));
        assert_eq!(sphere.material(), MaterialId(3));

        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap();
        let panel = Primitive::from_shape(ShapeInstance {
            name: "panel".into(),
            material: MaterialId(1),
            geometry: Geometry::Mesh(mesh),
        });
        assert!(matches!(panel, Primitive::Mesh(_)));
        assert!((panel.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dispatch_matches_variant() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, MaterialId(0));
        let prim = Primitive::from(tri);
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::new(0.0, 0.0, -1.0));

        let mut direct = Hit::default();
        let mut dispatched = Hit::default();
        assert!(tri.intersect(&ray, &mut direct));
        assert!(prim.intersect(&ray, &mut dispatched));
        assert_eq!(direct, dispatched);
    }
}
