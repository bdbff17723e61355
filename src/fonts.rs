//! Font catalog discovery.
//!
//! The catalog is the flat set of outline fonts found directly inside the
//! configured fonts directory. Subdirectories and hidden files are ignored,
//! and entries are ordered by file name so a seeded random source always
//! picks the same fonts.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Fonts directory not found: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Failed to read fonts directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A scalable outline font on disk.
///
/// The point size is not part of the resource: each render variant applies
/// its own size when the font is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    pub path: PathBuf,
}

impl FontResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name used in manifests and CLI output.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Read-only list of fonts available for rendering.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    fonts: Vec<FontResource>,
}

impl FontCatalog {
    pub fn from_fonts(fonts: Vec<FontResource>) -> Self {
        Self { fonts }
    }

    /// Discover `.ttf` / `.otf` files directly inside `dir`.
    pub fn discover(dir: &Path) -> Result<Self, FontError> {
        if !dir.is_dir() {
            return Err(FontError::NotADirectory(dir.to_path_buf()));
        }

        let mut fonts = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_font_file(entry.path()) {
                fonts.push(FontResource::new(entry.into_path()));
            }
        }
        Ok(Self { fonts })
    }

    pub fn fonts(&self) -> &[FontResource] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn is_font_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'));
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    !hidden && FONT_EXTENSIONS.contains(&ext.as_str())
}
