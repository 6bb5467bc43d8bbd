// Vector utilities for DVec3
//
// Extends glam::DVec3 with the few operations the path tracer needs that glam
// does not spell the same way. Arithmetic, dot, cross and length already come
// from glam.

use crate::Vec3;

/// Extension trait for Vec3 used by the intersection and shading code
pub trait Vec3Ext {
    /// Component by index: 0 is x, 1 is y, anything else is z.
    fn axis(&self, index: usize) -> f64;

    /// Largest of the three components.
    fn max_component(&self) -> f64;

    /// Normalize in place and return the receiver for chaining.
    ///
    /// A zero-length vector produces non-finite components; callers must
    /// not pass degenerate vectors.
    fn normalize_mut(&mut self) -> &mut Self;

    /// Clamp every component to [0, 1] in place.
    fn clamp_unit(&mut self) -> &mut Self;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn axis(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    #[inline]
    fn normalize_mut(&mut self) -> &mut Self {
        *self /= self.length();
        self
    }

    #[inline]
    fn clamp_unit(&mut self) -> &mut Self {
        self.x = self.x.clamp(0.0, 1.0);
        self.y = self.y.clamp(0.0, 1.0);
        self.z = self.z.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_lookup() {
        let v = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(v.axis(0), 1.0);
        assert_eq!(v.axis(1), 2.0);
        assert_eq!(v.axis(2), 3.0);

        // Out of range falls back to z
        assert_eq!(v.axis(3), 3.0);
        assert_eq!(v.axis(usize::MAX), 3.0);
    }

    #[test]
    fn test_max_component() {
        assert_eq!(Vec3::new(0.75, 0.25, 0.25).max_component(), 0.75);
        assert_eq!(Vec3::new(0.1, 0.9, 0.3).max_component(), 0.9);
        assert_eq!(Vec3::new(-1.0, -2.0, -0.5).max_component(), -0.5);
    }

    #[test]
    fn test_normalize_mut() {
        let mut v = Vec3::new(0.0, 3.0, 4.0);
        v.normalize_mut();

        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.y - 0.6).abs() < 1e-12);
        assert!((v.z - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_not_finite() {
        let mut v = Vec3::ZERO;
        v.normalize_mut();
        assert!(!v.is_finite());
    }

    #[test]
    fn test_clamp_unit() {
        let mut v = Vec3::new(-0.5, 0.5, 1.5);
        v.clamp_unit();
        assert_eq!(v, Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_chaining() {
        let mut v = Vec3::new(2.0, 0.0, 0.0);
        let r = *v.normalize_mut().clamp_unit();
        assert_eq!(r, Vec3::X);
    }
}
