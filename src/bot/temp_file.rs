//! Scoped storage for downloaded photos.

use std::io;
use std::path::Path;

use tempfile::TempPath;

/// A uniquely named file that is removed when dropped.
///
/// Holding one of these across a download and conversion guarantees the
/// photo is deleted on every exit path, including early returns via `?`.
#[derive(Debug)]
pub struct TempImage {
    path: TempPath,
}

impl TempImage {
    /// Create an empty file in `dir`, creating the directory if needed.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let file = tempfile::Builder::new()
            .prefix("photo-")
            .suffix(".img")
            .tempfile_in(dir)?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
