//! Scene catalog: named materials, named objects and numbered scenes.
//!
//! A catalog is the whole library of things a render can use. A scene id
//! picks a subset of its objects, and [`Catalog::resolve`] turns that subset
//! into a [`SceneDescription`] with a compact material arena and loaded mesh
//! geometry. Catalogs are plain data and can be read from JSON.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::Catalog;
//!
//! let catalog = Catalog::cornell_box();
//! let description = catalog.resolve(1, "assets")?;
//! println!("{} shapes", description.shapes.len());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Material, MaterialId};
use crate::mesh::{load_obj, Mesh, MeshError};

/// Errors that can occur while reading or resolving a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene {0} is not in the catalog")]
    UnknownScene(u32),

    #[error("Scene '{scene}' references unknown object '{object}'")]
    UnknownObject { scene: String, object: String },

    #[error("Object '{object}' references unknown material '{material}'")]
    UnknownMaterial { object: String, material: String },

    #[error("Failed to load mesh {}: {source}", path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A material with the name objects use to refer to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedMaterial {
    pub name: String,

    #[serde(flatten)]
    pub material: Material,
}

/// Shape of a catalog object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Sphere { center: Vec3, radius: f64 },
    Triangle { vertices: [Vec3; 3] },
    /// OBJ file, relative to the asset directory unless absolute
    Mesh { path: PathBuf },
}

/// A named object: a shape plus the name of its material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    pub material: String,

    #[serde(flatten)]
    pub shape: Shape,
}

/// A numbered selection of catalog objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub id: u32,
    pub name: String,
    pub objects: Vec<String>,
}

/// The full library of materials, objects and scenes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub materials: Vec<NamedMaterial>,
    pub objects: Vec<ObjectEntry>,
    pub scenes: Vec<SceneEntry>,
}

/// Geometry ready to be turned into render primitives.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere { center: Vec3, radius: f64 },
    Triangle { vertices: [Vec3; 3] },
    Mesh(Mesh),
}

/// One resolved object of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeInstance {
    pub name: String,
    pub material: MaterialId,
    pub geometry: Geometry,
}

/// A scene selected from a catalog, with its own material arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    pub name: String,
    pub materials: Vec<Material>,
    pub shapes: Vec<ShapeInstance>,
}

impl SceneDescription {
    /// Look up a material by handle.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize the catalog as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a scene entry by id.
    pub fn scene(&self, id: u32) -> Option<&SceneEntry> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Find an object entry by name.
    pub fn object(&self, name: &str) -> Option<&ObjectEntry> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Find a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.material)
    }

    /// Resolve a scene id into its objects, materials and loaded meshes.
    ///
    /// Mesh paths are joined onto `asset_dir`. Only materials used by the
    /// selected objects end up in the description's arena, each once.
    pub fn resolve<P: AsRef<Path>>(&self, scene_id: u32, asset_dir: P) -> CatalogResult<SceneDescription> {
        let asset_dir = asset_dir.as_ref();
        let entry = self
            .scene(scene_id)
            .ok_or(CatalogError::UnknownScene(scene_id))?;

        let mut description = SceneDescription {
            name: entry.name.clone(),
            ..Default::default()
        };
        let mut material_ids: HashMap<&str, MaterialId> = HashMap::new();

        for object_name in &entry.objects {
            let object = self
                .object(object_name)
                .ok_or_else(|| CatalogError::UnknownObject {
                    scene: entry.name.clone(),
                    object: object_name.clone(),
                })?;

            let material = match material_ids.get(object.material.as_str()) {
                Some(&id) => id,
                None => {
                    let material = self.material(&object.material).ok_or_else(|| {
                        CatalogError::UnknownMaterial {
                            object: object.name.clone(),
                            material: object.material.clone(),
                        }
                    })?;
                    let id = MaterialId(description.materials.len());
                    description.materials.push(*material);
                    material_ids.insert(object.material.as_str(), id);
                    id
                }
            };

            let geometry = match &object.shape {
                Shape::Sphere { center, radius } => Geometry::Sphere {
                    center: *center,
                    radius: *radius,
                },
                Shape::Triangle { vertices } => Geometry::Triangle {
                    vertices: *vertices,
                },
                Shape::Mesh { path } => {
                    let path = asset_dir.join(path);
                    let mesh = load_obj(&path)
                        .map_err(|source| CatalogError::Mesh { path: path.clone(), source })?;
                    log::info!(
                        "Loaded mesh '{}' from {} ({} triangles)",
                        object.name,
                        path.display(),
                        mesh.triangle_count()
                    );
                    Geometry::Mesh(mesh)
                }
            };

            description.shapes.push(ShapeInstance {
                name: object.name.clone(),
                material,
                geometry,
            });
        }

        log::debug!(
            "Resolved scene {} '{}': {} objects, {} materials",
            scene_id,
            description.name,
            description.shapes.len(),
            description.materials.len()
        );

        Ok(description)
    }

    /// The built-in Cornell box catalog.
    ///
    /// Scene 1 is the analytic box built from huge spheres. Scene 2 builds
    /// the walls and the ceiling light from the meshes in `cornellbox/`.
    pub fn cornell_box() -> Self {
        let v = Vec3::new;

        let materials = vec![
            named("cyan", Material::diffuse(v(0.65, 0.85, 0.92))),
            named("pink", Material::diffuse(v(0.98, 0.73, 0.83))),
            named("gray", Material::diffuse(v(0.75, 0.75, 0.75))),
            named("black", Material::diffuse(Vec3::ZERO)),
            named("purple", Material::diffuse(v(0.66, 0.58, 0.85))),
            named("mint", Material::diffuse(v(0.58, 0.88, 0.82))),
            named("mirror", Material::specular(Vec3::splat(0.99 * 0.999))),
            named("glass", Material::refractive(Vec3::splat(0.99), 1.5)),
            named("amber_glass", Material::refractive(v(0.99, 0.99, 0.82), 1.5)),
            named("satin", Material::glossy(v(0.9, 0.8, 0.6))),
            named("sky_light", Material::light(Vec3::splat(10.0))),
            named("panel_light", Material::light(Vec3::splat(12.0))),
        ];

        let objects = vec![
            // sphere walls
            sphere("left_wall", "cyan", v(1e5 + 1.0, 40.8, 81.6), 1e5),
            sphere("right_wall", "pink", v(-1e5 + 99.0, 40.8, 81.6), 1e5),
            sphere("back_wall", "gray", v(50.0, 40.8, 1e5), 1e5),
            sphere("front_wall", "black", v(50.0, 40.8, -1e5 + 170.0), 1e5),
            sphere("floor", "gray", v(50.0, 1e5, 81.6), 1e5),
            sphere("ceiling", "purple", v(50.0, -1e5 + 81.6, 81.6), 1e5),
            // sphere light
            sphere("ceiling_light", "sky_light", v(50.0, 681.6 - 0.27, 81.6), 600.0),
            // mesh walls
            mesh("left_panel", "cyan", "cornellbox/left.obj"),
            mesh("right_panel", "pink", "cornellbox/right.obj"),
            mesh("back_panel", "gray", "cornellbox/back.obj"),
            mesh("floor_panel", "gray", "cornellbox/bottom.obj"),
            mesh("ceiling_panel", "purple", "cornellbox/top.obj"),
            // mesh light
            mesh("light_panel", "panel_light", "cornellbox/light.obj"),
            // spheres
            sphere("mirror_ball", "mirror", v(27.0, 16.5, 47.0), 16.5),
            sphere("glass_ball", "glass", v(73.0, 16.5, 78.0), 16.5),
            sphere("mint_ball", "mint", v(38.0, 6.0, 90.0), 6.0),
            sphere("amber_ball", "amber_glass", v(50.0, 9.0, 70.0), 9.0),
            sphere("satin_ball", "satin", v(60.0, 8.0, 105.0), 8.0),
        ];

        let scenes = vec![
            scene(
                1,
                "sphere_box",
                &[
                    "left_wall",
                    "right_wall",
                    "back_wall",
                    "front_wall",
                    "floor",
                    "ceiling",
                    "mirror_ball",
                    "glass_ball",
                    "mint_ball",
                    "amber_ball",
                    "ceiling_light",
                ],
            ),
            scene(
                2,
                "mesh_box",
                &[
                    "left_panel",
                    "right_panel",
                    "back_panel",
                    "floor_panel",
                    "ceiling_panel",
                    "light_panel",
                    "mirror_ball",
                    "glass_ball",
                    "mint_ball",
                    "amber_ball",
                    "satin_ball",
                ],
            ),
        ];

        Self {
            materials,
            objects,
            scenes,
        }
    }
}

fn named(name: &str, material: Material) -> NamedMaterial {
    NamedMaterial {
        name: name.to_string(),
        material,
    }
}

fn sphere(name: &str, material: &str, center: Vec3, radius: f64) -> ObjectEntry {
    ObjectEntry {
        name: name.to_string(),
        material: material.to_string(),
        shape: Shape::Sphere { center, radius },
    }
}

fn mesh(name: &str, material: &str, path: &str) -> ObjectEntry {
    ObjectEntry {
        name: name.to_string(),
        material: material.to_string(),
        shape: Shape::Mesh { path: path.into() },
    }
}

fn scene(id: u32, name: &str, objects: &[&str]) -> SceneEntry {
    SceneEntry {
        id,
        name: name.to_string(),
        objects: objects.iter().map(|o| o.to_string()).collect(),
    }
}
