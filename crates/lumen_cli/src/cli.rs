use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a Cornell box scene with Monte Carlo path tracing
#[derive(Debug, Parser)]
#[command(name = "lumen", version)]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 768, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Total samples per pixel, split over the 2x2 sub-pixel grid
    #[arg(short, long, default_value_t = 100)]
    pub samples: u32,

    /// Scene id to render from the catalog
    #[arg(long, default_value_t = 1)]
    pub scene: u32,

    /// JSON scene catalog (built-in Cornell box catalog when omitted)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory mesh paths in the catalog are relative to
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Output image (.ppm or .png)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Worker threads (all cores when omitted)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Field-of-view scale of the camera
    #[arg(long, default_value_t = lumen_renderer::DEFAULT_FOV)]
    pub fov: f64,

    /// Value mixed into every row seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Print the built-in catalog as JSON and exit
    #[arg(long)]
    pub dump_catalog: bool,
}

impl Args {
    /// Samples per sub-pixel: a quarter of the total, at least one.
    pub fn sub_pixel_samples(&self) -> u32 {
        (self.samples / 4).max(1)
    }
}
