//! Dimension calculation for aspect-ratio-correct ASCII rendering.

/// Output width used when the caller does not choose one.
pub const DEFAULT_WIDTH: u32 = 100;

/// Vertical compression applied to the row count.
/// Monospace cells are roughly twice as tall as they are wide, so the
/// grid needs fewer rows than a pixel-for-pixel mapping would give.
pub const CHAR_ASPECT_CORRECTION: f64 = 0.55;

/// Largest grid (columns * rows) a conversion will produce.
pub const MAX_CELLS: u64 = 1 << 24;

/// Calculate the character grid for an image rendered `target_width` columns wide.
///
/// The row count is `floor(target_width * (img_height / img_width) * 0.55)`,
/// floored to 1 so very wide images still produce a row. Images narrower
/// than `target_width` are upscaled with the same formula.
///
/// Callers must pass non-zero dimensions; zero-sized inputs return `(0, 0)`.
///
/// # Example
/// ```
/// use photo_ascii_bot::ascii::target_dimensions;
///
/// // 640x480 at 100 columns: 100 * 0.75 * 0.55 = 41.25 rows
/// assert_eq!(target_dimensions(640, 480, 100), (100, 41));
/// ```
pub fn target_dimensions(img_width: u32, img_height: u32, target_width: u32) -> (u32, u32) {
    if img_width == 0 || img_height == 0 || target_width == 0 {
        return (0, 0);
    }

    let aspect_ratio = img_height as f64 / img_width as f64;
    let rows = (target_width as f64 * aspect_ratio * CHAR_ASPECT_CORRECTION).floor();

    // `as` saturates; conversions reject grids above MAX_CELLS
    (target_width, (rows as u32).max(1))
}
