//! Image bytes to ASCII art conversion.

use std::path::Path;

use image::imageops::{self, FilterType};

use super::art::AsciiArt;
use super::charset::Palette;
use super::dimensions::{target_dimensions, MAX_CELLS};
use super::grayscale::decode_luma;
use super::mapping::map_to_chars;

/// Resampling filter for the luminance grid (bilinear).
const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Render encoded image bytes as an ASCII grid `width` columns wide.
///
/// Pipeline:
/// 1. Decode and convert to BT.601 luminance
/// 2. Resize to `width x floor(width * h/w * 0.55)` (at least one row)
/// 3. Map each sample to the standard palette
///
/// # Errors
/// Returns `ConvertError::InvalidArgument` if `width` is zero or the grid
/// would exceed [`MAX_CELLS`], and `ConvertError::Decode`
/// if the bytes are not a readable image.
pub fn image_to_ascii(bytes: &[u8], width: u32) -> Result<AsciiArt, ConvertError> {
    image_to_ascii_with_palette(bytes, width, &Palette::STANDARD)
}

/// Same as [`image_to_ascii`] with an explicit palette.
pub fn image_to_ascii_with_palette(
    bytes: &[u8],
    width: u32,
    palette: &Palette,
) -> Result<AsciiArt, ConvertError> {
    if width == 0 {
        return Err(ConvertError::InvalidArgument(
            "target width must be positive".to_string(),
        ));
    }

    if u64::from(width) > MAX_CELLS {
        return Err(ConvertError::InvalidArgument(format!(
            "target width {} exceeds {} cells",
            width, MAX_CELLS
        )));
    }

    let gray = decode_luma(bytes)?;
    let (cols, rows) = target_dimensions(gray.width(), gray.height(), width);
    if u64::from(cols) * u64::from(rows) > MAX_CELLS {
        return Err(ConvertError::InvalidArgument(format!(
            "{}x{} grid for a {}x{} image exceeds {} cells",
            cols,
            rows,
            gray.width(),
            gray.height(),
            MAX_CELLS
        )));
    }

    let resized = imageops::resize(&gray, cols, rows, RESIZE_FILTER);

    log::debug!(
        "Rendering {}x{} image as {}x{} characters",
        gray.width(),
        gray.height(),
        cols,
        rows
    );

    let cells = map_to_chars(resized.as_raw(), palette);
    AsciiArt::from_cells(cols, rows, cells).ok_or_else(|| {
        ConvertError::InvalidArgument(format!("resized grid does not match {}x{}", cols, rows))
    })
}

/// Convert encoded image bytes to newline-joined ASCII text.
///
/// # Example
/// ```no_run
/// use photo_ascii_bot::ascii::{convert, DEFAULT_WIDTH};
///
/// let bytes = std::fs::read("photo.jpg").unwrap();
/// let text = convert(&bytes, DEFAULT_WIDTH).unwrap();
/// println!("{}", text);
/// ```
pub fn convert(bytes: &[u8], width: u32) -> Result<String, ConvertError> {
    Ok(image_to_ascii(bytes, width)?.to_string())
}

/// Read an image file and convert it to ASCII text.
///
/// # Errors
/// Returns `ConvertError::Io` if the file cannot be read, plus everything
/// [`convert`] can return.
pub fn convert_file(path: &Path, width: u32) -> Result<String, ConvertError> {
    let bytes = std::fs::read(path).map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    convert(&bytes, width)
}

/// Errors that can occur while converting an image.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read image '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
