//! Raster clean-up applied before tracing.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use pictogram_core::raster::DataUri;
use pictogram_core::{PictogramError, Result};

/// Converts the image to greyscale over a white background and stretches
/// its contrast to the full `0..=255` range. Output is always PNG.
pub fn preprocess_for_tracing(image: &DataUri) -> Result<DataUri> {
    let decoded = image::load_from_memory(&image.bytes)
        .map_err(|e| PictogramError::trace(format!("Failed to decode image: {e}")))?;
    let rgba = decoded.to_rgba8();

    let mut gray = GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        let alpha = f32::from(a) / 255.0;
        // Transparent pixels become background (white).
        Luma([(luma * alpha + 255.0 * (1.0 - alpha)).round() as u8])
    });
    stretch_contrast(&mut gray);

    let mut png = Vec::new();
    gray.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PictogramError::trace(format!("Failed to encode PNG: {e}")))?;
    Ok(DataUri::new("image/png", png))
}

fn stretch_contrast(image: &mut GrayImage) {
    let (min, max) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));
    if max <= min {
        return;
    }
    let range = u32::from(max - min);
    for pixel in image.pixels_mut() {
        let value = u32::from(pixel.0[0] - min) * 255 / range;
        pixel.0[0] = value as u8;
    }
}
