//! Pinhole camera for primary ray generation.

use lumen_math::{Ray, Vec3};

/// Default field-of-view scale: tangent of half the vertical view angle.
pub const DEFAULT_FOV: f64 = 0.5135;

/// Default distance factor primary rays are pushed forward by.
pub const DEFAULT_NEAR_OFFSET: f64 = 140.0;

/// Camera for generating rays into the scene.
///
/// The image plane is spanned by `cx` (horizontal) and `cy` (vertical),
/// scaled so that `dir + cx * a + cy * b` for `a, b` in `[-0.5, 0.5]`
/// covers the whole frame. Primary rays start `near_offset` plane units in
/// front of the origin, which moves them out past the front wall of the
/// Cornell box.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    pub width: u32,
    pub height: u32,
    /// Samples per sub-pixel (each pixel has a 2x2 grid of sub-pixels)
    pub samples: u32,

    // Positioning
    origin: Vec3,
    direction: Vec3,
    fov: f64,
    near_offset: f64,

    // Derived from the above
    cx: Vec3,
    cy: Vec3,
}

impl Camera {
    /// Create a camera at `origin` looking along `direction`.
    pub fn new(origin: Vec3, direction: Vec3, width: u32, height: u32, samples: u32) -> Self {
        let mut camera = Self {
            width,
            height,
            samples: samples.max(1),
            origin,
            direction: direction.normalize(),
            fov: DEFAULT_FOV,
            near_offset: DEFAULT_NEAR_OFFSET,
            cx: Vec3::ZERO,
            cy: Vec3::ZERO,
        };
        camera.update_basis();
        camera
    }

    /// Set the field-of-view scale.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self.update_basis();
        self
    }

    /// Set how far primary rays are advanced before tracing.
    pub fn with_near_offset(mut self, near_offset: f64) -> Self {
        self.near_offset = near_offset;
        self
    }

    fn update_basis(&mut self) {
        // Use Z as the up axis when looking straight up or down
        let up = if self.direction.cross(Vec3::Y).length_squared() < 1e-12 {
            Vec3::Z
        } else {
            Vec3::Y
        };

        let right = self.direction.cross(up).normalize();
        self.cx = right * (self.width as f64 * self.fov / self.height as f64);
        self.cy = self.cx.cross(self.direction).normalize() * self.fov;
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn near_offset(&self) -> f64 {
        self.near_offset
    }

    /// Horizontal image plane vector.
    pub fn cx(&self) -> Vec3 {
        self.cx
    }

    /// Vertical image plane vector.
    pub fn cy(&self) -> Vec3 {
        self.cy
    }

    /// Primary ray through sub-pixel `(sx, sy)` of pixel `(x, y)`.
    ///
    /// `y = 0` is the bottom row. `(dx, dy)` are filter offsets in
    /// `(-1, 1)` measured in sub-pixel units.
    pub fn get_ray(&self, x: u32, y: u32, sx: u32, sy: u32, dx: f64, dy: f64) -> Ray {
        let w = self.width as f64;
        let h = self.height as f64;

        let d = self.cx * (((sx as f64 + 0.5 + dx) / 2.0 + x as f64) / w - 0.5)
            + self.cy * (((sy as f64 + 0.5 + dy) / 2.0 + y as f64) / h - 0.5)
            + self.direction;

        Ray::new(self.origin + d * self.near_offset, d.normalize())
    }
}
