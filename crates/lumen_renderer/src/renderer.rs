//! Parallel pixel sampling driver.
//!
//! Each image row is an independent rayon task with its own generator,
//! seeded from the row index, so a render is reproducible no matter how
//! rows are scheduled across threads.

use crate::{camera::Camera, integrator::PathTracer, material::Color, scene::Scene, tent};
use indicatif::{ProgressBar, ProgressStyle};
use lumen_math::Vec3Ext;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use std::time::Duration;

/// Render configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Mixed into every row seed; 0 reproduces the classic row seeding
    pub seed: u64,
}

/// Linear radiance image.
///
/// Row 0 is the top of the frame, so `pixels` can be written out in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, row), counting rows from the top.
    pub fn get(&self, x: u32, row: u32) -> Color {
        self.pixels[row as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, row), counting rows from the top.
    pub fn set(&mut self, x: u32, row: u32, color: Color) {
        let width = self.width as usize;
        self.pixels[row as usize * width + x as usize] = color;
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// Seed of the generator used for sampling row `y`.
#[inline]
pub fn row_seed(y: u32, seed: u64) -> u64 {
    let y = y as u64;
    (y * y * y) ^ seed
}

/// Sample every pixel of sampling row `y` (0 is the bottom of the frame).
///
/// Each pixel averages a 2x2 grid of sub-pixels; every sub-pixel takes
/// `camera.samples` tent-filtered samples and is clamped to [0, 1] before
/// it is averaged in.
pub fn render_row(tracer: &PathTracer, camera: &Camera, y: u32, seed: u64, row: &mut [Color]) {
    let mut rng = StdRng::seed_from_u64(row_seed(y, seed));
    let inv_samples = 1.0 / camera.samples as f64;

    for (x, pixel) in row.iter_mut().enumerate() {
        let x = x as u32;
        *pixel = Color::ZERO;

        for sy in 0..2 {
            for sx in 0..2 {
                let mut sub = Color::ZERO;
                for _ in 0..camera.samples {
                    let dx = tent(&mut rng);
                    let dy = tent(&mut rng);
                    let ray = camera.get_ray(x, y, sx, sy, dx, dy);
                    sub += tracer.radiance(&ray, 0, &mut rng) * inv_samples;
                }
                *pixel += *sub.clamp_unit() * 0.25;
            }
        }
    }
}

/// Render the scene with the global rayon pool.
///
/// Progress is drawn on stderr when it is a terminal.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    render_with_progress(scene, camera, config, &row_progress_bar(camera.height))
}

/// Render the scene, advancing `progress` by one for every finished row.
pub fn render_with_progress(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    progress: &ProgressBar,
) -> ImageBuffer {
    let width = camera.width as usize;
    let height = camera.height;
    let mut image = ImageBuffer::new(camera.width, camera.height);
    if width == 0 || height == 0 {
        return image;
    }

    log::info!(
        "Rendering {}x{} at {} spp ({} primitives, {} threads)",
        camera.width,
        camera.height,
        camera.samples * 4,
        scene.len(),
        rayon::current_num_threads()
    );

    let tracer = PathTracer::new(scene);
    progress.set_length(height as u64);
    progress.reset();

    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(buffer_row, row)| {
            let y = height - 1 - buffer_row as u32;
            render_row(&tracer, camera, y, config.seed, row);

            progress.inc(1);
            log::trace!("Row {} done ({}/{})", y, progress.position(), height);
        });

    let elapsed = format_elapsed(progress.elapsed());
    progress.finish_with_message(format!("done in {}", elapsed));
    log::info!("Render finished in {}", elapsed);

    image
}

/// Progress bar over the rows of a frame.
pub fn row_progress_bar(rows: u32) -> ProgressBar {
    let bar = ProgressBar::new(rows as u64);
    if let Ok(style) =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows ETA {eta} {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

/// Format a duration as H:MM:SS.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use lumen_core::Material;
    use lumen_math::Vec3;

    /// Camera looking into a uniform emitter of radiance 0.5 from inside.
    fn glowing_room() -> Scene {
        let mut scene = Scene::new();
        let glow = scene.add_material(Material::light(Vec3::splat(0.5)));
        scene.add(Sphere::new(Vec3::ZERO, 1e4, glow));
        scene
    }

    #[test]
    fn test_image_buffer_indexing() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.rows().count(), 2);
    }

    #[test]
    fn test_row_seed() {
        assert_eq!(row_seed(0, 0), 0);
        assert_eq!(row_seed(3, 0), 27);
        assert_eq!(row_seed(2, 1), 9);
    }

    #[test]
    fn test_uniform_radiance() {
        let scene = glowing_room();
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 4, 3, 2);

        let image = render(&scene, &camera, &RenderConfig::default());

        assert_eq!(image.pixels.len(), 12);
        for pixel in &image.pixels {
            assert!((*pixel - Vec3::splat(0.5)).length() < 1e-12);
        }
    }

    #[test]
    fn test_sub_pixels_clamped() {
        let mut scene = Scene::new();
        let glow = scene.add_material(Material::light(Vec3::new(5.0, 0.25, 0.0)));
        scene.add(Sphere::new(Vec3::ZERO, 1e4, glow));
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 2, 2, 1);

        let image = render(&scene, &camera, &RenderConfig::default());
        for pixel in &image.pixels {
            assert!((*pixel - Vec3::new(1.0, 0.25, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_vertical_flip() {
        // Emitter covers only the upper half of the view
        let mut scene = Scene::new();
        let glow = scene.add_material(Material::light(Vec3::ONE));
        scene.add(Sphere::new(Vec3::new(0.0, 1e4 + 0.5, -1e3), 1e4, glow));
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 4, 4, 1).with_near_offset(0.0);

        let image = render(&scene, &camera, &RenderConfig::default());

        // Buffer row 0 is the top of the frame
        assert_eq!(image.get(0, 0), Color::ONE);
        assert_eq!(image.get(3, 0), Color::ONE);
        assert_eq!(image.get(0, 3), Color::ZERO);
        assert_eq!(image.get(3, 3), Color::ZERO);
    }

    #[test]
    fn test_rows_are_deterministic() {
        let scene = {
            let mut scene = Scene::new();
            let wall = scene.add_material(Material::diffuse(Vec3::splat(0.6)));
            let lamp = scene.add_material(Material::light(Vec3::splat(3.0)));
            scene.add(Sphere::new(Vec3::ZERO, 50.0, wall));
            scene.add(Sphere::new(Vec3::new(0.0, 30.0, 0.0), 10.0, lamp));
            scene
        };
        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0), 8, 6, 2)
            .with_near_offset(0.0);
        let tracer = PathTracer::new(&scene);

        let mut first = vec![Color::ZERO; 8];
        let mut second = vec![Color::ZERO; 8];
        render_row(&tracer, &camera, 4, 0, &mut first);
        render_row(&tracer, &camera, 4, 0, &mut second);
        assert_eq!(first, second);

        // The parallel render places the same row at buffer row h - 1 - y
        let image = render(&scene, &camera, &RenderConfig::default());
        assert_eq!(&image.pixels[8..16], &first[..]);

        let mut reseeded = vec![Color::ZERO; 8];
        render_row(&tracer, &camera, 4, 1, &mut reseeded);
        assert_ne!(first, reseeded);
    }

    #[test]
    fn test_progress_counts_every_row() {
        let scene = glowing_room();
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 3, 5, 1);
        let progress = ProgressBar::hidden();

        render_with_progress(&scene, &camera, &RenderConfig::default(), &progress);

        assert_eq!(progress.length(), Some(5));
        assert_eq!(progress.position(), 5);
        assert!(progress.is_finished());
    }

    #[test]
    fn test_row_progress_bar_length() {
        let bar = row_progress_bar(768);
        assert_eq!(bar.length(), Some(768));
        assert_eq!(bar.position(), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1:02:05");
    }
}
