//! Shared test utilities: fixture fonts, seeded randomness, file counting,
//! and pixel inspection.

use crate::fonts::{FontCatalog, FontResource};
use crate::render::calculations::TextBounds;
use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

/// A font from `fixtures/fonts/`.
pub fn fixture_font(name: &str) -> FontResource {
    FontResource::new(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures/fonts")
            .join(name),
    )
}

/// Catalog of paths that need not exist (for mock-backed tests).
pub fn fake_catalog(names: &[&str]) -> FontCatalog {
    FontCatalog::from_fonts(
        names
            .iter()
            .map(|n| FontResource::new(format!("/fonts/{n}")))
            .collect(),
    )
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Number of regular files under `dir`, recursively. 0 if `dir` is missing.
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .map(|e| e.unwrap().path())
        .map(|p| if p.is_dir() { count_files(&p) } else { 1 })
        .sum()
}

/// Box around every pixel with non-zero alpha. `max_*` are exclusive.
pub fn ink_bounds(canvas: &RgbaImage) -> Option<TextBounds> {
    canvas
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] > 0)
        .map(|(x, y, _)| TextBounds {
            min_x: x as i32,
            min_y: y as i32,
            max_x: x as i32 + 1,
            max_y: y as i32 + 1,
        })
        .reduce(TextBounds::union)
}
