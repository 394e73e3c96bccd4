use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use tracing::info;

use crate::error::{MesoError, Result};
use crate::package::CompositeImage;

fn quantize(v: f32, max: f32) -> f32 {
    // NaN (missing pixels) renders black.
    if v.is_nan() {
        0.0
    } else {
        (v.clamp(0.0, 1.0) * max).round()
    }
}

fn rgb8(image: &CompositeImage) -> RgbImage {
    let (h, w) = (image.height(), image.width());
    RgbImage::from_fn(w as u32, h as u32, |col, row| {
        let (r, c) = (row as usize, col as usize);
        Rgb([
            quantize(image.data[[r, c, 0]], 255.0) as u8,
            quantize(image.data[[r, c, 1]], 255.0) as u8,
            quantize(image.data[[r, c, 2]], 255.0) as u8,
        ])
    })
}

/// Save a composite as 16-bit RGB TIFF.
pub fn save_composite_tiff(image: &CompositeImage, path: &Path) -> Result<()> {
    let (h, w) = (image.height(), image.width());
    let pixels: Vec<u16> = image
        .data
        .iter()
        .map(|&v| quantize(v, 65535.0) as u16)
        .collect();

    let img = ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| {
            MesoError::InvalidParameter(format!("composite buffer does not fit {w}x{h} RGB"))
        })?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a composite as 8-bit RGB PNG.
pub fn save_composite_png(image: &CompositeImage, path: &Path) -> Result<()> {
    rgb8(image).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a composite as 8-bit RGB JPEG.
pub fn save_composite_jpeg(image: &CompositeImage, path: &Path) -> Result<()> {
    rgb8(image).save_with_format(path, ImageFormat::Jpeg)?;
    Ok(())
}

/// Save a composite, choosing format from file extension.
pub fn save_composite(image: &CompositeImage, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => save_composite_png(image, path)?,
        Some("jpg" | "jpeg") => save_composite_jpeg(image, path)?,
        _ => save_composite_tiff(image, path)?,
    }
    info!(path = %path.display(), description = %image.description, "Saved composite");
    Ok(())
}
