//! Simple path tracer example.
//!
//! Builds a small Cornell-style room by hand and saves it as a PNG.

use lumen_core::Material;
use lumen_renderer::{render, save_image, Camera, Color, RenderConfig, Scene, Sphere, Triangle, Vec3};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(
        Vec3::new(50.0, 52.0, 295.6),
        Vec3::new(0.0, -0.042612, -1.0),
        320,
        240,
        16,
    );

    let image = render(&scene, &camera, &RenderConfig::default());

    let filename = "simple_render.png";
    if let Err(e) = save_image(&image, filename) {
        log::error!("Failed to save {}: {}", filename, e);
        std::process::exit(1);
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let red = scene.add_material(Material::diffuse(Color::new(0.75, 0.25, 0.25)));
    let blue = scene.add_material(Material::diffuse(Color::new(0.25, 0.25, 0.75)));
    let white = scene.add_material(Material::diffuse(Color::splat(0.75)));
    let mirror = scene.add_material(Material::specular(Color::splat(0.999)));
    let glass = scene.add_material(Material::refractive(Color::splat(0.999), 1.5));
    let lamp = scene.add_material(Material::light(Color::splat(12.0)));

    // Walls
    scene.add(Sphere::new(Vec3::new(1e5 + 1.0, 40.8, 81.6), 1e5, red));
    scene.add(Sphere::new(Vec3::new(-1e5 + 99.0, 40.8, 81.6), 1e5, blue));
    scene.add(Sphere::new(Vec3::new(50.0, 40.8, 1e5), 1e5, white));
    scene.add(Sphere::new(Vec3::new(50.0, 1e5, 81.6), 1e5, white));
    scene.add(Sphere::new(Vec3::new(50.0, -1e5 + 81.6, 81.6), 1e5, white));

    // Balls
    scene.add(Sphere::new(Vec3::new(27.0, 16.5, 47.0), 16.5, mirror));
    scene.add(Sphere::new(Vec3::new(73.0, 16.5, 78.0), 16.5, glass));

    // Ceiling light as two downward-facing triangles
    let a = Vec3::new(35.0, 81.5, 65.0);
    let b = Vec3::new(65.0, 81.5, 65.0);
    let c = Vec3::new(65.0, 81.5, 95.0);
    let d = Vec3::new(35.0, 81.5, 95.0);
    scene.add(Triangle::new(a, b, c, lamp));
    scene.add(Triangle::new(a, c, d, lamp));

    scene
}
