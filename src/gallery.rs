//! Gallery assembly, persistence, and file export.
//!
//! A gallery is [`GALLERY_SIZE`] signatures of the same name, each in a font
//! drawn uniformly at random (with replacement) from the catalog.
//!
//! ## Output Structure
//!
//! Every request writes into its own namespace directory so concurrent
//! requests never overwrite each other's files:
//!
//! ```text
//! static/signatures/
//! └── k3v9q0xz7m2a/                # Request namespace
//!     ├── gallery.json             # GalleryManifest
//!     ├── index.html               # Gallery page
//!     ├── signature_display_0.png  # 400×100 preview
//!     ├── signature_hd_0.png       # 3840×2160 download
//!     └── ...                      # through index 9
//! ```
//!
//! All pairs are rendered in memory before the first file is written, and a
//! failed write removes the namespace directory, so a request either leaves a
//! complete gallery or nothing.

use crate::config::AppConfig;
use crate::fonts::{FontCatalog, FontError, FontResource};
use crate::naming::{self, DisplayText, NameError};
use crate::render::{RenderError, SignatureBackend, SignatureImagePair};
use crate::site;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Signatures per gallery.
pub const GALLERY_SIZE: usize = 10;

pub const MANIFEST_FILE: &str = "gallery.json";

const NAMESPACE_LEN: usize = 12;
const NAMESPACE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Invalid name: {0}")]
    InvalidInput(#[from] NameError),
    #[error("No fonts available in the font catalog")]
    NoFontsAvailable,
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error("Font catalog error: {0}")]
    Font(#[from] FontError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Path escapes the output directory: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Generated file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// One rendered gallery position.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub index: usize,
    pub font: FontResource,
    pub pair: SignatureImagePair,
}

/// Record of a persisted gallery, written as `gallery.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryManifest {
    /// Normalized display text.
    pub name: String,
    pub namespace: String,
    pub signatures: Vec<SignatureRecord>,
}

/// Paths are relative to the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub index: usize,
    pub font: String,
    pub display: String,
    pub download: String,
}

/// Draw a fresh request namespace from `rng`.
pub fn new_namespace<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NAMESPACE_LEN)
        .map(|_| NAMESPACE_ALPHABET[rng.random_range(0..NAMESPACE_ALPHABET.len())] as char)
        .collect()
}

/// Render `count` signatures, each with a randomly chosen font.
///
/// Fails with [`GalleryError::NoFontsAvailable`] before rendering anything
/// if the catalog is empty.
pub fn assemble<R: Rng + ?Sized>(
    backend: &impl SignatureBackend,
    catalog: &FontCatalog,
    text: &DisplayText,
    count: usize,
    rng: &mut R,
) -> Result<Vec<GalleryEntry>, GalleryError> {
    if catalog.is_empty() {
        return Err(GalleryError::NoFontsAvailable);
    }

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let font = catalog
            .fonts()
            .choose(rng)
            .ok_or(GalleryError::NoFontsAvailable)?;
        let pair = backend.render(text, font)?;
        entries.push(GalleryEntry {
            index,
            font: font.clone(),
            pair,
        });
    }
    Ok(entries)
}

/// Write rendered entries, the manifest, and the gallery page into
/// `output_dir/namespace`.
///
/// The namespace directory must not exist yet.
pub fn persist(
    entries: &[GalleryEntry],
    text: &DisplayText,
    output_dir: &Path,
    namespace: &str,
) -> Result<GalleryManifest, GalleryError> {
    fs::create_dir_all(output_dir)?;
    let dir = output_dir.join(namespace);
    fs::create_dir(&dir)?;

    write_gallery(entries, text, &dir, namespace).inspect_err(|_| {
        fs::remove_dir_all(&dir).ok();
    })
}

fn write_gallery(
    entries: &[GalleryEntry],
    text: &DisplayText,
    dir: &Path,
    namespace: &str,
) -> Result<GalleryManifest, GalleryError> {
    let mut signatures = Vec::with_capacity(entries.len());
    for entry in entries {
        let display_name = naming::display_file_name(entry.index);
        let download_name = naming::download_file_name(entry.index);
        fs::write(dir.join(&display_name), &entry.pair.display.png)?;
        fs::write(dir.join(&download_name), &entry.pair.download.png)?;

        signatures.push(SignatureRecord {
            index: entry.index,
            font: entry.font.name(),
            display: format!("{namespace}/{display_name}"),
            download: format!("{namespace}/{download_name}"),
        });
    }

    let manifest = GalleryManifest {
        name: text.to_string(),
        namespace: namespace.to_string(),
        signatures,
    };
    fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    site::write_gallery_page(dir, &manifest)?;
    Ok(manifest)
}

/// Full request: normalize, discover fonts, render, persist.
///
/// A fonts directory that does not exist is a [`GalleryError::Font`] error;
/// [`GalleryError::NoFontsAvailable`] means the directory exists but holds
/// no fonts.
pub fn generate_gallery<R: Rng + ?Sized>(
    backend: &impl SignatureBackend,
    config: &AppConfig,
    raw_name: &str,
    rng: &mut R,
) -> Result<GalleryManifest, GalleryError> {
    let text = DisplayText::new(raw_name)?;
    let catalog = FontCatalog::discover(&config.fonts_dir)?;
    let entries = assemble(backend, &catalog, &text, GALLERY_SIZE, rng)?;
    let namespace = new_namespace(rng);
    persist(&entries, &text, &config.output_dir, &namespace)
}

/// Copy a generated file out of `output_dir`.
///
/// `relative` must stay inside `output_dir`: absolute paths and `..` are
/// refused. When `destination` is a directory the file keeps its name.
/// Exporting a file onto itself leaves it untouched.
pub fn export(
    output_dir: &Path,
    relative: &Path,
    destination: &Path,
) -> Result<PathBuf, GalleryError> {
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.as_os_str().is_empty() || !contained {
        return Err(GalleryError::InvalidPath(relative.to_path_buf()));
    }

    let source = output_dir.join(relative);
    if !source.is_file() {
        return Err(GalleryError::NotFound(source));
    }

    let target = if destination.is_dir() {
        let file_name = relative
            .file_name()
            .ok_or_else(|| GalleryError::InvalidPath(relative.to_path_buf()))?;
        destination.join(file_name)
    } else {
        destination.to_path_buf()
    };
    if target.exists() && fs::canonicalize(&target)? == fs::canonicalize(&source)? {
        return Ok(target);
    }
    fs::copy(&source, &target)?;
    Ok(target)
}
