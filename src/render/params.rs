//! Fixed output variants.
//!
//! Downstream consumers expect these exact canvas sizes, so they are
//! constants rather than configuration.

use image::Rgba;

/// Canvas size and font size for one output image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    pub width: u32,
    pub height: u32,
    /// Em size in pixels.
    pub font_size: f32,
}

impl Variant {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// High-resolution image offered for download.
pub const DOWNLOAD: Variant = Variant {
    width: 3840,
    height: 2160,
    font_size: 250.0,
};

/// Small preview shown in the gallery.
pub const DISPLAY: Variant = Variant {
    width: 400,
    height: 100,
    font_size: 40.0,
};

/// Glyph color. Alpha is replaced by glyph coverage.
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
