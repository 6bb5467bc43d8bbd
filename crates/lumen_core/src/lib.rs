//! Lumen Core - Scene data for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Materials**: `Material`, `Reflection` and the `MaterialId` handle
//! - **Meshes**: indexed triangle meshes loaded from OBJ files
//! - **Catalog**: named materials and objects, numbered scenes, JSON I/O
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::Catalog;
//!
//! let catalog = Catalog::load("catalog.json")?;
//! let description = catalog.resolve(1, "assets")?;
//! println!("Scene '{}' has {} shapes", description.name, description.shapes.len());
//! ```

pub mod catalog;
pub mod material;
pub mod mesh;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, Geometry, SceneDescription, ShapeInstance};
pub use material::{Material, MaterialId, Reflection};
pub use mesh::{load_obj, parse_obj, Mesh, MeshError};
