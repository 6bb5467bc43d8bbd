//! Lumen Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for Cornell box style scenes: brute-force
//! intersection over spheres, triangles and triangle meshes, four
//! reflection models, Russian roulette termination and a row-parallel
//! sampling driver.

mod camera;
mod hittable;
mod integrator;
mod material;
mod mesh;
mod output;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use camera::{Camera, DEFAULT_FOV, DEFAULT_NEAR_OFFSET};
pub use hittable::{Hit, Hittable, SurfaceSample, EPSILON};
pub use integrator::{russian_roulette, PathTracer, ROULETTE_DEPTH, SPLIT_DEPTH};
pub use material::{
    diffuse_direction, glossy_direction, reflect, reflectance_at_normal, refract, schlick, Color,
    Interface, GLOSSY_ROUGHNESS,
};
pub use mesh::TriangleMesh;
pub use output::{save_image, to_byte, to_rgb_image, write_ppm, OutputError, OutputResult};
pub use primitive::Primitive;
pub use renderer::{
    format_elapsed, render, render_row, render_with_progress, row_progress_bar, row_seed, ImageBuffer,
    RenderConfig,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Tent filter offset in (-1, 1), peaked at 0.
#[inline]
pub(crate) fn tent(rng: &mut dyn RngCore) -> f64 {
    let r = 2.0 * gen_f64(rng);
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}
