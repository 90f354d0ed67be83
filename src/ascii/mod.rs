//! ASCII renderer module for converting photos to ASCII art.
//!
//! This module provides the full conversion pipeline:
//!
//! 1. **Decoding + grayscale** - any supported format to BT.601 luminance
//! 2. **Resizing** - fixed column count, rows compressed for character cells
//! 3. **Character mapping** - luminance buckets to a density-ordered palette
//!
//! Conversion is pure: no I/O beyond [`convert_file`] reading its input,
//! and no shared state, so it can run on any thread.

mod art;
mod charset;
mod convert;
mod dimensions;
mod grayscale;
mod mapping;

pub use art::AsciiArt;
pub use charset::{Palette, STANDARD_PALETTE};
pub use convert::{convert, convert_file, image_to_ascii, image_to_ascii_with_palette, ConvertError};
pub use dimensions::{target_dimensions, CHAR_ASPECT_CORRECTION, DEFAULT_WIDTH, MAX_CELLS};
pub use grayscale::{decode_luma, luminance, to_grayscale};
pub use mapping::map_to_chars;
