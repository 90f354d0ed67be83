//! Brightness to character mapping.

use super::charset::Palette;

/// Map brightness values to palette characters.
///
/// Converts a grid of brightness values (0-255) to characters from the
/// provided palette. Lower brightness maps to earlier characters (denser,
/// darker-appearing glyphs), higher brightness to later ones.
///
/// # Example
/// ```
/// use photo_ascii_bot::ascii::{map_to_chars, Palette};
///
/// let chars = map_to_chars(&[0, 128, 255], &Palette::STANDARD);
/// assert_eq!(chars, vec!['@', '=', ' ']);
/// ```
pub fn map_to_chars(brightness: &[u8], palette: &Palette) -> Vec<char> {
    brightness.iter().map(|&b| palette.char_for(b)).collect()
}
