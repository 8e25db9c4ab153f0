use std::path::Path;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use thiserror::Error;

use crate::field::ScalarField;

const OPAQUE: u8 = 255;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("field of {width}x{height} does not fit an image")]
    TooLarge { width: usize, height: usize },
}

// Scale a value in [0, 1] to an 8-bit intensity: round(v * 255)
// Out-of-range values are clamped; NaN maps to 0.
#[inline]
pub fn intensity(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// Convert a field into an RGBA byte buffer,
// the same intensity in R, G and B with a fully opaque alpha.
pub fn to_rgba8(field: &ScalarField) -> Vec<u8> {
    let mut buf = Vec::with_capacity(field.len() * 4);
    for &v in field.values() {
        let c = intensity(v);
        buf.extend_from_slice(&[c, c, c, OPAQUE]);
    }
    buf
}

fn image_dims(field: &ScalarField) -> Result<(u32, u32), RenderError> {
    let too_large = || RenderError::TooLarge {
        width: field.width(),
        height: field.height(),
    };
    let w = u32::try_from(field.width()).map_err(|_| too_large())?;
    let h = u32::try_from(field.height()).map_err(|_| too_large())?;
    Ok((w, h))
}

pub fn to_gray_image(field: &ScalarField) -> Result<GrayImage, RenderError> {
    let (w, h) = image_dims(field)?;
    Ok(GrayImage::from_fn(w, h, |x, y| {
        // Dimensions came from the field, so the cell exists
        let v = field.get(x as usize, y as usize).unwrap_or(0.0);
        Luma([intensity(v)])
    }))
}

pub fn to_rgba_image(field: &ScalarField) -> Result<RgbaImage, RenderError> {
    let (w, h) = image_dims(field)?;
    Ok(RgbaImage::from_fn(w, h, |x, y| {
        let c = intensity(field.get(x as usize, y as usize).unwrap_or(0.0));
        Rgba([c, c, c, OPAQUE])
    }))
}

// Write the field as an 8-bit grayscale PNG
pub fn save_png(field: &ScalarField, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    to_gray_image(field)?.save(path)?;
    log::info!("saved {}x{} field to {}", field.width(), field.height(), path.display());
    Ok(())
}
