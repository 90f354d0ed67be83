//! Character palette used for ASCII rendering.

use super::convert::ConvertError;

/// Standard density ramp (10 levels).
/// Characters ordered from darkest-appearing (`@`) to lightest (space),
/// so black pixels render as dense glyphs.
pub const STANDARD_PALETTE: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Number of distinct luminance values a sample can take.
const LUMINANCE_LEVELS: usize = 256;

/// An ordered set of characters, indexed from darkest (0) to lightest (N-1).
///
/// Each character covers a bucket of `256 / N` luminance values. The top
/// index is clamped, so palettes whose length does not divide 256 still map
/// 255 to the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    chars: &'static [char],
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Palette {
    /// The palette used by the converter.
    pub const STANDARD: Palette = Palette {
        chars: STANDARD_PALETTE,
    };

    /// Build a palette from a static character ramp.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidArgument` if the ramp is empty or has
    /// more than 256 entries (a bucket would be narrower than one level).
    pub fn new(chars: &'static [char]) -> Result<Self, ConvertError> {
        if chars.is_empty() || chars.len() > LUMINANCE_LEVELS {
            return Err(ConvertError::InvalidArgument(format!(
                "palette must have between 1 and {} characters, got {}",
                LUMINANCE_LEVELS,
                chars.len()
            )));
        }
        Ok(Self { chars })
    }

    /// The characters in this palette, darkest first.
    pub fn chars(&self) -> &'static [char] {
        self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Width of one luminance bucket.
    pub fn bucket_size(&self) -> usize {
        LUMINANCE_LEVELS / self.chars.len()
    }

    /// Palette index for a luminance sample.
    #[inline]
    pub fn index_for(&self, luminance: u8) -> usize {
        (luminance as usize / self.bucket_size()).min(self.chars.len() - 1)
    }

    /// Palette character for a luminance sample.
    #[inline]
    pub fn char_for(&self, luminance: u8) -> char {
        self.chars[self.index_for(luminance)]
    }

    /// Darkest-appearing character (index 0).
    pub fn darkest(&self) -> char {
        self.chars[0]
    }

    /// Lightest-appearing character (index N-1).
    pub fn lightest(&self) -> char {
        self.chars[self.chars.len() - 1]
    }
}
