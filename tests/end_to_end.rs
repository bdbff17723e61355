//! End-to-end gallery generation with the real renderer and fixture fonts.
//!
//! Run with: cargo test --test end_to_end

use image::GenericImageView;
use rand::SeedableRng;
use rand::rngs::StdRng;
use signature_gal::config::AppConfig;
use signature_gal::gallery::{self, GALLERY_SIZE, GalleryError, GalleryManifest};
use signature_gal::render::SignatureRenderer;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_fonts() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/fonts")
}

/// Check a decoded signature: transparent corners, black ink, and ink
/// margins that differ by at most one pixel on each axis.
fn assert_centered_black_on_transparent(image: &image::DynamicImage, label: &str) {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(rgba.get_pixel(x, y).0[3], 0, "{label}: corner ({x}, {y}) not transparent");
    }

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0, 0);
    for (x, y, p) in rgba.enumerate_pixels().filter(|(_, _, p)| p.0[3] > 0) {
        assert_eq!(p.0[..3], [0, 0, 0], "{label}: ink at ({x}, {y}) is not black");
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x + 1);
        max_y = max_y.max(y + 1);
    }
    assert!(max_x > 0, "{label}: no glyphs drawn");

    let (left, right) = (min_x as i64, (w - max_x) as i64);
    let (top, bottom) = (min_y as i64, (h - max_y) as i64);
    assert!((left - right).abs() <= 1, "{label}: left {left}, right {right}");
    assert!((top - bottom).abs() <= 1, "{label}: top {top}, bottom {bottom}");
}

fn config(tmp: &TempDir, fonts_dir: PathBuf) -> AppConfig {
    AppConfig {
        fonts_dir,
        output_dir: tmp.path().join("signatures"),
        ..AppConfig::default()
    }
}

#[test]
fn sachin_kumar_gallery() {
    let tmp = TempDir::new().unwrap();
    let config = config(&tmp, fixture_fonts());
    let mut rng = StdRng::seed_from_u64(2003);

    let manifest = gallery::generate_gallery(
        &SignatureRenderer::new(),
        &config,
        "sachin kumar",
        &mut rng,
    )
    .unwrap();

    assert_eq!(manifest.name, "Sachin Kumar");
    assert_eq!(manifest.signatures.len(), GALLERY_SIZE);

    let mut hd_checked = HashSet::new();
    for (i, record) in manifest.signatures.iter().enumerate() {
        assert_eq!(record.index, i);
        assert!(
            ["DejaVuSansMono.ttf", "DejaVuSerif-Italic.ttf"].contains(&record.font.as_str()),
            "unexpected font {}",
            record.font
        );

        let display = image::open(config.output_dir.join(&record.display)).unwrap();
        assert_eq!(display.dimensions(), (400, 100));
        assert_eq!(display.color(), image::ColorType::Rgba8);
        assert_centered_black_on_transparent(&display, &format!("display {i}"));

        let hd_path = config.output_dir.join(&record.download);
        if hd_checked.insert(record.font.clone()) {
            let hd = image::open(&hd_path).unwrap();
            assert_eq!(hd.dimensions(), (3840, 2160));
            assert_eq!(hd.color(), image::ColorType::Rgba8);
            assert_centered_black_on_transparent(&hd, &format!("download {i}"));
        } else {
            assert_eq!(image::image_dimensions(&hd_path).unwrap(), (3840, 2160));
        }
    }

    let gallery_dir = config.output_dir.join(&manifest.namespace);
    let stored: GalleryManifest =
        serde_json::from_str(&fs::read_to_string(gallery_dir.join("gallery.json")).unwrap())
            .unwrap();
    assert_eq!(stored, manifest);

    let page = fs::read_to_string(gallery_dir.join("index.html")).unwrap();
    assert!(page.contains("Sachin Kumar"));
    assert!(page.contains(r#"href="signature_hd_9.png""#));

    let downloads = tmp.path().join("downloads");
    fs::create_dir(&downloads).unwrap();
    let target = gallery::export(
        &config.output_dir,
        Path::new(&manifest.signatures[3].download),
        &downloads,
    )
    .unwrap();
    assert_eq!(target, downloads.join("signature_hd_3.png"));
    assert_eq!(image::image_dimensions(&target).unwrap(), (3840, 2160));
}

#[test]
fn empty_font_catalog_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let fonts = tmp.path().join("fonts");
    fs::create_dir(&fonts).unwrap();
    fs::write(fonts.join("notes.txt"), "no fonts here").unwrap();
    let config = config(&tmp, fonts);

    let result = gallery::generate_gallery(
        &SignatureRenderer::new(),
        &config,
        "sachin kumar",
        &mut StdRng::seed_from_u64(1),
    );

    assert!(matches!(result, Err(GalleryError::NoFontsAvailable)));
    assert!(!config.output_dir.exists() || fs::read_dir(&config.output_dir).unwrap().count() == 0);
}

#[test]
fn corrupt_font_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let fonts = tmp.path().join("fonts");
    fs::create_dir(&fonts).unwrap();
    fs::write(fonts.join("broken.ttf"), "not a font").unwrap();
    let config = config(&tmp, fonts);

    let result = gallery::generate_gallery(
        &SignatureRenderer::new(),
        &config,
        "sachin kumar",
        &mut StdRng::seed_from_u64(1),
    );

    assert!(matches!(result, Err(GalleryError::Render(_))));
    assert!(!config.output_dir.exists() || fs::read_dir(&config.output_dir).unwrap().count() == 0);
}
