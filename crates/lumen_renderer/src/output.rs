//! Writing rendered images to disk.
//!
//! `.ppm` files are written as plain-text P3; `.png` goes through the
//! `image` crate. Both apply the same 2.2 gamma to clamped radiance.

use crate::{material::Color, renderer::ImageBuffer};
use lumen_math::{Interval, Vec3Ext};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("Image is {width}x{height} but holds {len} pixels")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

/// Result type for image output.
pub type OutputResult<T> = Result<T, OutputError>;

/// Gamma-encode one linear channel to 8 bits.
#[inline]
pub fn to_byte(x: f64) -> u8 {
    (Interval::UNIT.clamp(x).powf(1.0 / 2.2) * 255.0 + 0.5) as u8
}

#[inline]
fn to_rgb(color: Color) -> [u8; 3] {
    [0, 1, 2].map(|i| to_byte(color.axis(i)))
}

fn check_size(buffer: &ImageBuffer) -> OutputResult<()> {
    if buffer.pixels.len() != buffer.width as usize * buffer.height as usize {
        return Err(OutputError::SizeMismatch {
            width: buffer.width,
            height: buffer.height,
            len: buffer.pixels.len(),
        });
    }
    Ok(())
}

/// Write the image as plain PPM (P3), top row first.
pub fn write_ppm<W: Write>(buffer: &ImageBuffer, mut writer: W) -> OutputResult<()> {
    check_size(buffer)?;
    write!(writer, "P3\n{} {}\n255\n", buffer.width, buffer.height)?;
    for &color in &buffer.pixels {
        let [r, g, b] = to_rgb(color);
        write!(writer, "{} {} {} ", r, g, b)?;
    }
    writer.flush()?;
    Ok(())
}

/// Convert to an 8-bit RGB image.
pub fn to_rgb_image(buffer: &ImageBuffer) -> OutputResult<image::RgbImage> {
    check_size(buffer)?;
    let bytes = buffer.pixels.iter().flat_map(|&c| to_rgb(c)).collect();
    image::RgbImage::from_raw(buffer.width, buffer.height, bytes).ok_or(OutputError::SizeMismatch {
        width: buffer.width,
        height: buffer.height,
        len: buffer.pixels.len(),
    })
}

/// Save the image, picking the format from the file extension.
pub fn save_image<P: AsRef<Path>>(buffer: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let file = File::create(path)?;
            write_ppm(buffer, BufWriter::new(file))?;
        }
        "png" => {
            to_rgb_image(buffer)?.save_with_format(path, image::ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Saved {}x{} image to {}", buffer.width, buffer.height, path.display());
    Ok(())
}
