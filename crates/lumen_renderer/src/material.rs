//! Bounce direction sampling for each reflection model.

use crate::{gen_f64, hittable::EPSILON, tent};
use lumen_math::Vec3;
use rand::RngCore;
use std::f64::consts::PI;

/// Color type alias (RGB radiance, unbounded)
pub type Color = Vec3;

/// Angular jitter applied to glossy reflections, in radians per unit of
/// tent offset.
pub const GLOSSY_ROUGHNESS: f64 = 0.2;

/// Mirror `d` about the plane with normal `n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * n.dot(d)
}

/// Orthonormal basis `(u, v, w)` with `w = n`.
#[inline]
fn basis(n: Vec3) -> (Vec3, Vec3, Vec3) {
    let w = n;
    let a = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = a.cross(w).normalize();
    let v = w.cross(u);
    (u, v, w)
}

/// Cosine-weighted direction over the hemisphere around `nl`.
pub fn diffuse_direction(nl: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = 2.0 * PI * gen_f64(rng);
    let r2 = gen_f64(rng);
    let r2s = r2.sqrt();
    let (u, v, w) = basis(nl);

    (u * r1.cos() * r2s + v * r1.sin() * r2s + w * (1.0 - r2).sqrt()).normalize()
}

/// Mirror direction of `d` jittered in polar and azimuthal angle.
///
/// The angles are taken in the basis around `nl`, with the tangent axes
/// flipped so the mirror direction lies on the positive `u` side.
pub fn glossy_direction(d: Vec3, n: Vec3, nl: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let rd = reflect(d, n);
    let (mut u, mut v, w) = basis(nl);
    if rd.dot(u) < EPSILON {
        u = -u;
        v = -v;
    }

    let dx = tent(rng);
    let dy = tent(rng);

    let cos_alpha = rd.dot(w).clamp(-1.0, 1.0);
    let alpha = cos_alpha.acos();
    let tangent = rd - w * cos_alpha;
    let beta = if tangent.length_squared() > 1e-24 {
        tangent.normalize().dot(v).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };

    let alpha = (alpha + GLOSSY_ROUGHNESS * dx).max(0.0);
    let beta = (beta + GLOSSY_ROUGHNESS * dy).clamp(0.0, PI);

    (w * alpha.cos() + u * alpha.sin() * beta.sin() + v * alpha.sin() * beta.cos()).normalize()
}

/// Schlick's approximation of the Fresnel reflectance.
///
/// `cosine` is the cosine on the less dense side of the interface.
#[inline]
pub fn schlick(r0: f64, cosine: f64) -> f64 {
    let c = 1.0 - cosine;
    r0 + (1.0 - r0) * c.powi(5)
}

/// Normal incidence reflectance of an interface between air and `ior`.
#[inline]
pub fn reflectance_at_normal(ior: f64) -> f64 {
    ((ior - 1.0) / (ior + 1.0)).powi(2)
}

/// Outcome of hitting a dielectric interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interface {
    /// Total internal reflection: all energy goes to the mirror direction.
    TotalInternal,
    /// Energy split between reflection (`reflectance`) and the refracted
    /// `direction` (`1 - reflectance`).
    Split { direction: Vec3, reflectance: f64 },
}

impl Interface {
    /// Fraction of energy transmitted.
    pub fn transmittance(&self) -> f64 {
        match self {
            Interface::TotalInternal => 0.0,
            Interface::Split { reflectance, .. } => 1.0 - reflectance,
        }
    }
}

/// Refract `d` through a surface with geometric normal `n`.
///
/// `nl` is the normal facing the incoming ray, `into` is true when the ray
/// enters the denser medium.
pub fn refract(d: Vec3, n: Vec3, nl: Vec3, into: bool, ior: f64) -> Interface {
    let nnt = if into { 1.0 / ior } else { ior };
    let ddn = d.dot(nl);
    let cos2t = 1.0 - nnt * nnt * (1.0 - ddn * ddn);
    if cos2t < 0.0 {
        return Interface::TotalInternal;
    }

    let sign = if into { 1.0 } else { -1.0 };
    let direction = (d * nnt - n * (sign * (ddn * nnt + cos2t.sqrt()))).normalize();
    let cosine = if into { -ddn } else { direction.dot(n) };

    Interface::Split {
        direction,
        reflectance: schlick(reflectance_at_normal(ior), cosine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-12);
        assert!((r.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diffuse_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = Vec3::new(0.3, -0.8, 0.5).normalize();

        let mut mean_cos = 0.0;
        let count = 20_000;
        for _ in 0..count {
            let d = diffuse_direction(n, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-9);
            let cos = d.dot(n);
            assert!(cos >= -1e-12);
            mean_cos += cos;
        }

        // Cosine weighting gives E[cos] = 2/3
        let mean_cos = mean_cos / count as f64;
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.01, "mean cos {}", mean_cos);
    }

    #[test]
    fn test_glossy_near_mirror() {
        let mut rng = StdRng::seed_from_u64(2);
        let n = Vec3::Y;
        let d = Vec3::new(1.0, -1.0, 0.3).normalize();
        let mirror = reflect(d, n);

        for _ in 0..2000 {
            let g = glossy_direction(d, n, n, &mut rng);
            assert!(g.is_finite());
            assert!((g.length() - 1.0).abs() < 1e-9);
            // Jitter is bounded by the roughness in each angle
            assert!(g.dot(mirror) > (2.0 * GLOSSY_ROUGHNESS).cos() - 1e-9);
            assert!(g.dot(n) > -1e-9);
        }
    }

    #[test]
    fn test_glossy_normal_incidence() {
        let mut rng = StdRng::seed_from_u64(4);
        let n = Vec3::Z;

        for _ in 0..500 {
            let g = glossy_direction(-Vec3::Z, n, n, &mut rng);
            assert!(g.is_finite());
            assert!(g.dot(n) > GLOSSY_ROUGHNESS.cos() - 1e-9);
        }
    }

    #[test]
    fn test_schlick_limits() {
        let r0 = reflectance_at_normal(1.5);
        assert!((r0 - 0.04).abs() < 1e-12);
        assert_eq!(schlick(r0, 1.0), r0);
        assert!((schlick(r0, 0.0) - 1.0).abs() < 1e-12);
        assert!(schlick(r0, 1e-3) > 0.99);
    }

    #[test]
    fn test_refract_normal_incidence() {
        let n = Vec3::Z;
        let d = -Vec3::Z;

        match refract(d, n, n, true, 1.5) {
            Interface::Split {
                direction,
                reflectance,
            } => {
                assert!((direction - d).length() < 1e-12);
                assert!((reflectance - 0.04).abs() < 1e-12);
            }
            Interface::TotalInternal => panic!("normal incidence cannot reflect totally"),
        }
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let n = Vec3::Y;
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();

        let interface = refract(d, n, n, true, 1.5);
        let Interface::Split { direction, reflectance } = interface else {
            panic!("entering glass cannot reflect totally");
        };
        assert!((reflectance + interface.transmittance() - 1.0).abs() < 1e-12);

        // Snell: sin(t) = sin(i) / 1.5
        let sin_t = direction.x;
        assert!((sin_t - (0.5f64.sqrt() / 1.5)).abs() < 1e-9);
        assert!(direction.y < 0.0);
        assert!(reflectance > 0.04 && reflectance < 1.0);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving glass at 60 degrees exceeds the critical angle (~41.8)
        let n = Vec3::Y;
        let d = Vec3::new(60f64.to_radians().sin(), 60f64.to_radians().cos(), 0.0);
        let nl = -n;

        let interface = refract(d, n, nl, false, 1.5);
        assert_eq!(interface, Interface::TotalInternal);
        assert_eq!(interface.transmittance(), 0.0);
    }
}
