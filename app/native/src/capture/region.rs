//! Pure image cropping for region captures.
//!
//! No OS access here: pixels in, pixels (or PNG bytes) out.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::geometry::PixelRect;

/// Errors from cropping a captured image.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("Crop rectangle has zero width or height")]
    ZeroDimension,

    #[error(
        "Crop rectangle ({},{},{},{}) exceeds image bounds ({}x{})",
        requested.x, requested.y, requested.width, requested.height,
        image_size.0, image_size.1
    )]
    OutOfBounds {
        requested: PixelRect,
        image_size: (u32, u32),
    },

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Crops `image` to `rect`.
///
/// # Errors
///
/// Returns `ZeroDimension` for an empty rectangle and `OutOfBounds` when the
/// rectangle does not fit inside the image.
pub fn crop_image(image: &RgbaImage, rect: PixelRect) -> Result<RgbaImage, CropError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(CropError::ZeroDimension);
    }

    let (img_width, img_height) = image.dimensions();
    let fits_x = rect.x.checked_add(rect.width).is_some_and(|right| right <= img_width);
    let fits_y = rect.y.checked_add(rect.height).is_some_and(|bottom| bottom <= img_height);

    if !fits_x || !fits_y {
        return Err(CropError::OutOfBounds {
            requested: rect,
            image_size: (img_width, img_height),
        });
    }

    Ok(image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}

/// Crops `image` to `rect` and encodes the result as PNG.
///
/// # Errors
///
/// See [`crop_image`]; also fails if PNG encoding fails.
pub fn crop_to_png_bytes(image: &RgbaImage, rect: PixelRect) -> Result<Vec<u8>, CropError> {
    let cropped = crop_image(image, rect)?;

    let mut png_bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(cropped)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CropError::EncodingFailed(e.to_string()))?;

    Ok(png_bytes)
}
