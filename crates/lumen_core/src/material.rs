//! Surface materials shared by scene primitives.
//!
//! Materials are plain value records. A scene stores them once in an arena
//! and primitives refer to them through a [`MaterialId`] handle, so any
//! number of primitives can share one material.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// How a surface redirects an incoming path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reflection {
    /// Cosine-weighted bounce over the hemisphere.
    #[default]
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Mirror direction with an angular jitter.
    Glossy,
    /// Glass-like interface that reflects and refracts (Fresnel split).
    Refractive,
}

/// Index of a material in a scene's material arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

impl MaterialId {
    /// Position of the material in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Default index of refraction (glass).
pub const DEFAULT_IOR: f64 = 1.5;

fn default_ior() -> f64 {
    DEFAULT_IOR
}

/// A surface material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Radiance emitted by the surface (zero for non-emitters)
    #[serde(default)]
    pub emission: Vec3,

    /// Per-channel fraction of energy kept on each bounce
    #[serde(default)]
    pub color: Vec3,

    /// Bounce behavior
    #[serde(default)]
    pub reflection: Reflection,

    /// Index of refraction, only read for [`Reflection::Refractive`]
    #[serde(default = "default_ior")]
    pub ior: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emission: Vec3::ZERO,
            color: Vec3::splat(0.75),
            reflection: Reflection::Diffuse,
            ior: DEFAULT_IOR,
        }
    }
}

impl Material {
    /// Create a material from all of its parts.
    pub fn new(emission: Vec3, color: Vec3, reflection: Reflection, ior: f64) -> Self {
        Self {
            emission,
            color,
            reflection,
            ior,
        }
    }

    /// Non-emissive diffuse surface.
    pub fn diffuse(color: Vec3) -> Self {
        Self::new(Vec3::ZERO, color, Reflection::Diffuse, DEFAULT_IOR)
    }

    /// Non-emissive mirror.
    pub fn specular(color: Vec3) -> Self {
        Self::new(Vec3::ZERO, color, Reflection::Specular, DEFAULT_IOR)
    }

    /// Non-emissive glossy reflector.
    pub fn glossy(color: Vec3) -> Self {
        Self::new(Vec3::ZERO, color, Reflection::Glossy, DEFAULT_IOR)
    }

    /// Non-emissive dielectric with the given index of refraction.
    pub fn refractive(color: Vec3, ior: f64) -> Self {
        Self::new(Vec3::ZERO, color, Reflection::Refractive, ior)
    }

    /// Black diffuse emitter.
    pub fn light(emission: Vec3) -> Self {
        Self::new(emission, Vec3::ZERO, Reflection::Diffuse, DEFAULT_IOR)
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }
}
