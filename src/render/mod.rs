//! Signature rendering — pure Rust, no system font libraries.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Load font** | `rusttype::Font` from the file bytes |
//! | **Measure** | union of glyph pixel boxes at the variant size |
//! | **Center** | integer offset from [`calculations`] |
//! | **Draw → PNG** | coverage raster onto `image::RgbaImage`, `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: pure placement math (unit testable)
//! - **Parameters**: the two fixed output variants
//! - **Backend**: [`SignatureBackend`] trait + [`SignatureRenderer`]

pub mod backend;
pub(crate) mod calculations;
mod params;
pub mod renderer;

pub use backend::{EncodedImage, RenderError, SignatureBackend, SignatureImagePair};
pub use params::{DISPLAY, DOWNLOAD, INK, Variant};
pub use renderer::{SignatureRenderer, load_font};
