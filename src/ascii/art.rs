//! Rendered character grid.

use std::fmt;

/// A rectangular grid of characters in row-major order.
///
/// `Display` joins rows with `\n` and emits no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl AsciiArt {
    /// Build a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Option<Self> {
        if cells.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Character at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Iterate over the rows as character slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks_exact panics on 0; an empty grid has no rows anyway
        self.cells.chunks_exact((self.width as usize).max(1))
    }

    /// Rows rendered as owned strings.
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
