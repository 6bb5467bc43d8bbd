//! Renderable scene: a material arena plus a flat list of primitives.

use crate::{
    hittable::{Hit, Hittable},
    primitive::Primitive,
};
use lumen_core::{Material, MaterialId, SceneDescription};
use lumen_math::Ray;

/// Everything the estimator needs to trace rays.
///
/// Primitives are tested one after another with a shared [`Hit`], so the
/// nearest intersection wins regardless of order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build primitives for every shape of a resolved description.
    pub fn from_description(description: SceneDescription) -> Self {
        let SceneDescription {
            name,
            materials,
            shapes,
        } = description;

        let primitives: Vec<Primitive> = shapes.into_iter().map(Primitive::from_shape).collect();

        log::info!(
            "Scene '{}': {} primitives, {} materials",
            name,
            primitives.len(),
            materials.len()
        );

        Self {
            materials,
            primitives,
        }
    }

    /// Store a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Look up a material by handle.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest intersection along `ray`, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut hit = Hit::default();
        let mut hit_anything = false;

        for primitive in &self.primitives {
            hit_anything |= primitive.intersect(ray, &mut hit);
        }

        hit_anything.then_some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sphere::Sphere, triangle::Triangle};
    use lumen_core::Catalog;
    use lumen_math::Vec3;

    fn spheres_along_z(scene: &mut Scene, order: &[f64]) {
        let id = scene.add_material(Material::diffuse(Vec3::splat(0.5)));
        for &z in order {
            scene.add(Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, id));
        }
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.intersect(&ray).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_nearest_hit_independent_of_order() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for order in [[-10.0, -5.0, -20.0], [-20.0, -10.0, -5.0], [-5.0, -20.0, -10.0]] {
            let mut scene = Scene::new();
            spheres_along_z(&mut scene, &order);

            let hit = scene.intersect(&ray).unwrap();
            assert!((hit.t - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_nearest_hit_is_minimum_over_primitives() {
        let mut scene = Scene::new();
        let red = scene.add_material(Material::diffuse(Vec3::new(0.75, 0.25, 0.25)));
        let blue = scene.add_material(Material::diffuse(Vec3::new(0.25, 0.25, 0.75)));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, red));
        scene.add(Triangle::new(
            Vec3::new(-1.0, -1.0, -3.0),
            Vec3::new(1.0, -1.0, -3.0),
            Vec3::new(0.0, 1.0, -3.0),
            blue,
        ));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.intersect(&ray).unwrap();

        let mut best = f64::INFINITY;
        for primitive in scene.primitives() {
            let mut alone = Hit::default();
            if primitive.intersect(&ray, &mut alone) {
                best = best.min(alone.t);
            }
        }

        assert_eq!(hit.t, best);
        assert_eq!(hit.material, Some(blue));
        assert_eq!(scene.material(blue).color, Vec3::new(0.25, 0.25, 0.75));
    }

    #[test]
    fn test_from_builtin_catalog() {
        let description = Catalog::cornell_box().resolve(1, "assets").unwrap();
        let shapes = description.shapes.len();
        let scene = Scene::from_description(description);

        assert_eq!(scene.len(), shapes);

        // Looking down the box from the camera hits something
        let ray = Ray::new(Vec3::new(50.0, 52.0, 295.6), Vec3::new(0.0, -0.042612, -1.0).normalize());
        let hit = scene.intersect(&ray).unwrap();
        assert!(hit.t > 0.0);
    }

    #[test]
    fn test_mesh_box_walls_face_inward() {
        let assets = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");
        let scene = Scene::from_description(Catalog::cornell_box().resolve(2, assets).unwrap());
        let origin = Vec3::new(50.0, 52.0, 295.6);

        // Straight down the middle lands on the back wall
        let ray = Ray::new(origin, Vec3::new(0.0, -0.042612, -1.0).normalize());
        let hit = scene.intersect(&ray).unwrap();
        assert!((ray.at(hit.t).z).abs() < 1e-6);
        assert!((hit.normal - Vec3::Z).length() < 1e-9);

        // Looking up from the floor reaches the light panel's lit side
        let ray = Ray::new(Vec3::new(45.0, 1.0, 80.0), Vec3::Y);
        let hit = scene.intersect(&ray).unwrap();
        let light = scene.material(hit.material.unwrap());
        assert!(light.is_emissive());
        assert!((hit.normal + Vec3::Y).length() < 1e-9);
    }
}
