//! # Signature Gal
//!
//! Turns a name into a gallery of signature images, each rendered in a font
//! picked at random from a font directory, plus a small contact form.
//!
//! # Pipeline
//!
//! ```text
//! 1. Normalize   "sachin kumar"   →  "Sachin Kumar"
//! 2. Discover    fonts_dir/       →  font catalog
//! 3. Render      text × font      →  400×100 + 3840×2160 PNG pair (×10)
//! 4. Persist     pairs            →  output_dir/<namespace>/ + gallery.json + index.html
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Name normalization and output file names |
//! | [`fonts`] | Font catalog discovery |
//! | [`render`] | Text measurement, centering, rasterization, PNG encoding |
//! | [`gallery`] | Random font selection, persistence, file export |
//! | [`site`] | Gallery `index.html` rendered with Maud |
//! | [`contact`] | Contact form validation, captcha, notifications |
//! | [`config`] | TOML config loading, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Measure What Is Drawn
//!
//! Centering uses the union of the glyphs' pixel boxes at the target size,
//! not the font's nominal ascent/descent. Script fonts overshoot their
//! metrics heavily, and nominal centering visibly drifts them off-center.
//!
//! ## Fixed Canvas Sizes
//!
//! The 400×100 preview and 3840×2160 download are constants
//! ([`render::DISPLAY`], [`render::DOWNLOAD`]). Consumers of the images
//! depend on these exact sizes.
//!
//! ## One Directory Per Request
//!
//! Generated files are named by gallery position, so two requests would
//! collide on the same names. Each request writes into a fresh random
//! namespace directory instead, and a request leaves either a complete
//! gallery or nothing.
//!
//! ## Injected Randomness
//!
//! Font selection, namespaces, and captchas draw from a caller-supplied
//! `rand::Rng`. The CLI seeds it from the OS unless `--seed` is given, which
//! makes whole runs reproducible.

pub mod config;
pub mod contact;
pub mod fonts;
pub mod gallery;
pub mod naming;
pub mod output;
pub mod render;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
