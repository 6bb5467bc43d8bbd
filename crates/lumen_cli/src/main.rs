use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::Catalog;
use lumen_math::Vec3;
use lumen_renderer::{render, save_image, Camera, RenderConfig, Scene};

mod cli;

use cli::Args;

/// Camera position looking into the Cornell box through its open front.
const CAMERA_ORIGIN: Vec3 = Vec3::new(50.0, 52.0, 295.6);
const CAMERA_DIRECTION: Vec3 = Vec3::new(0.0, -0.042612, -1.0);

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    if args.dump_catalog {
        println!("{}", Catalog::cornell_box().to_json_pretty()?);
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::cornell_box(),
    };

    let description = catalog
        .resolve(args.scene, &args.assets)
        .with_context(|| format!("Failed to build scene {}", args.scene))?;
    let scene = Scene::from_description(description);

    let camera = Camera::new(
        CAMERA_ORIGIN,
        CAMERA_DIRECTION,
        args.width,
        args.height,
        args.sub_pixel_samples(),
    )
    .with_fov(args.fov);

    let config = RenderConfig { seed: args.seed };
    let image = render(&scene, &camera, &config);

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
