//! Signature rendering backend trait and shared types.
//!
//! The [`SignatureBackend`] trait is the single operation gallery assembly
//! needs: turn one (text, font) pair into a [`SignatureImagePair`]. The
//! production implementation is
//! [`SignatureRenderer`](super::renderer::SignatureRenderer); tests use a
//! recording mock so orchestration can be checked without rasterizing.

use crate::fonts::FontResource;
use crate::naming::DisplayText;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load font {}: {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] image::ImageError),
}

/// A PNG-encoded canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Both variants of one signature, same text and font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImagePair {
    pub display: EncodedImage,
    pub download: EncodedImage,
}

/// Trait for signature rendering backends.
pub trait SignatureBackend {
    /// Render `text` in `font` at both output sizes.
    fn render(
        &self,
        text: &DisplayText,
        font: &FontResource,
    ) -> Result<SignatureImagePair, RenderError>;
}
