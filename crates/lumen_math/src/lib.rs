// Re-export glam for convenience
pub use glam;

/// Double precision vector used for positions, directions and colors.
///
/// The Cornell box walls are spheres of radius 1e5, so single precision
/// loses too much of the hit point to be usable.
pub type Vec3 = glam::DVec3;

// Lumen math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::Vec3Ext;
