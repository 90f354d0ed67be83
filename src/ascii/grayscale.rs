//! Image decoding and RGB to grayscale conversion using ITU-R BT.601 luminance.

use std::io::Cursor;

use image::{GrayImage, ImageError, ImageReader, RgbImage};

use super::convert::ConvertError;

/// Decode encoded image bytes into a luminance grid.
///
/// The format is sniffed from the content, so the file extension of a
/// downloaded photo does not matter. Alpha is discarded before conversion.
///
/// # Errors
/// Returns `ConvertError::Decode` for empty, truncated or unsupported input.
pub fn decode_luma(bytes: &[u8]) -> Result<GrayImage, ConvertError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::Decode(ImageError::IoError(e)))?;
    let img = reader.decode()?;

    log::debug!("Decoded {}x{} image", img.width(), img.height());

    Ok(to_grayscale(&img.to_rgb8()))
}

/// Convert an RGB image to grayscale using ITU-R BT.601 luminance formula.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B
///
/// Integer math is used, with the coefficients scaled by 1000:
/// - R: 299/1000
/// - G: 587/1000
/// - B: 114/1000
pub fn to_grayscale(rgb: &RgbImage) -> GrayImage {
    let mut gray = Vec::with_capacity((rgb.width() as usize) * (rgb.height() as usize));

    for px in rgb.as_raw().chunks_exact(3) {
        gray.push(luminance(px[0], px[1], px[2]));
    }

    // Buffer length matches width * height by construction
    GrayImage::from_raw(rgb.width(), rgb.height(), gray)
        .unwrap_or_else(|| GrayImage::new(rgb.width(), rgb.height()))
}

/// BT.601 luminance of a single pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    // 299 + 587 + 114 = 1000, so the result never exceeds 255
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
