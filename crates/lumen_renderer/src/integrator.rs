//! Monte Carlo radiance estimator.
//!
//! Paths bounce until Russian roulette ends them; there is no fixed depth
//! limit. Single-continuation bounces run as a loop that carries the path
//! throughput, so long paths do not grow the stack. Only the first two
//! dielectric hits of a path split into both branches, which bounds the
//! recursion to two levels.

use crate::{
    gen_f64,
    material::{diffuse_direction, glossy_direction, reflect, refract, Color, Interface},
    scene::Scene,
};
use lumen_core::Reflection;
use lumen_math::{Ray, Vec3Ext};
use rand::RngCore;

/// Depth after which paths are terminated by Russian roulette.
pub const ROULETTE_DEPTH: u32 = 5;

/// Depth up to which a dielectric hit traces both reflection and refraction.
pub const SPLIT_DEPTH: u32 = 2;

/// Survival test for a path whose reflectance peaks at `p`.
///
/// Returns the factor to scale the surviving path by, or `None` when the
/// path is terminated.
#[inline]
pub fn russian_roulette(p: f64, rng: &mut dyn RngCore) -> Option<f64> {
    (gen_f64(rng) < p).then(|| 1.0 / p)
}

/// Unidirectional path tracer over a [`Scene`].
#[derive(Clone, Copy)]
pub struct PathTracer<'a> {
    scene: &'a Scene,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Estimate the radiance arriving along `ray`.
    ///
    /// `depth` is the number of bounces already taken; camera rays start at 0.
    pub fn radiance(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        let mut ray = *ray;
        let mut depth = depth;
        let mut throughput = Color::ONE;
        let mut radiance = Color::ZERO;

        loop {
            let Some(hit) = self.scene.intersect(&ray) else {
                return radiance;
            };
            let Some(id) = hit.material else {
                return radiance;
            };
            let material = self.scene.material(id);

            let x = hit.point(&ray);
            let n = hit.normal;
            let nl = if hit.into { n } else { -n };
            let d = ray.direction;

            let mut f = material.color;
            depth += 1;
            if depth > ROULETTE_DEPTH {
                match russian_roulette(f.max_component(), rng) {
                    Some(scale) => f *= scale,
                    None => return radiance + throughput * material.emission,
                }
            }

            radiance += throughput * material.emission;
            throughput *= f;
            if throughput == Color::ZERO {
                return radiance;
            }

            let next = match material.reflection {
                Reflection::Diffuse => diffuse_direction(nl, rng),
                Reflection::Specular => reflect(d, n),
                Reflection::Glossy => glossy_direction(d, n, nl, rng),
                Reflection::Refractive => {
                    let mirror = reflect(d, n);
                    let interface = refract(d, n, nl, hit.into, material.ior);
                    let transmittance = interface.transmittance();
                    match interface {
                        Interface::TotalInternal => mirror,
                        Interface::Split {
                            direction,
                            reflectance,
                        } => {

                            if depth <= SPLIT_DEPTH {
                                let reflected = self.radiance(&Ray::new(x, mirror), depth, rng);
                                let refracted = self.radiance(&Ray::new(x, direction), depth, rng);
                                let split = reflected * reflectance + refracted * transmittance;
                                return radiance + throughput * split;
                            }

                            let p = 0.25 + 0.5 * reflectance;
                            if gen_f64(rng) < p {
                                throughput *= reflectance / p;
                                mirror
                            } else {
                                throughput *= transmittance / (1.0 - p);
                                direction
                            }
                        }
                    }
                }
            };

            ray = Ray::new(x, next);
        }
    }
}
