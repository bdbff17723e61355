//! Pure Rust signature renderer.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Font parsing | `rusttype::Font::try_from_vec` |
//! | Layout + kerning | `rusttype::Font::layout` |
//! | Ink bounds | `PositionedGlyph::pixel_bounding_box` + `draw` |
//! | Coverage raster | `PositionedGlyph::draw` |
//! | Canvas | `image::RgbaImage` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |

use super::backend::{EncodedImage, RenderError, SignatureBackend, SignatureImagePair};
use super::calculations::{TextBounds, centered_offset, em_to_extent_scale, union_bounds};
use super::params::{DISPLAY, DOWNLOAD, INK, Variant};
use crate::fonts::FontResource;
use crate::naming::DisplayText;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use rusttype::{Font, PositionedGlyph, Scale, point};
use std::path::Path;

/// Renders signatures with `rusttype` onto `image` canvases.
pub struct SignatureRenderer;

impl SignatureRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SignatureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse an outline font.
pub fn load_font(path: &Path) -> Result<Font<'static>, RenderError> {
    let bytes = std::fs::read(path).map_err(|e| RenderError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| RenderError::FontLoad {
        path: path.to_path_buf(),
        reason: "not a TrueType/OpenType font".into(),
    })
}

/// Scale at which the font's em square is `em_px` pixels tall.
fn scale_for(font: &Font<'_>, em_px: f32) -> Scale {
    let v = font.v_metrics_unscaled();
    Scale::uniform(em_to_extent_scale(
        em_px,
        f32::from(font.units_per_em()),
        v.ascent,
        v.descent,
    ))
}

/// Laid-out text and where it lands on the canvas.
pub(crate) struct Placement {
    glyphs: Vec<PositionedGlyph<'static>>,
    /// Box of the inked pixels in canvas coordinates.
    pub bounds: Option<TextBounds>,
    offset: (i32, i32),
}

/// Lay out `text` and compute the offset that centers its drawn pixels.
pub(crate) fn place(font: &Font<'static>, text: &str, variant: &Variant) -> Placement {
    let scale = scale_for(font, variant.font_size);
    let ascent = font.v_metrics(scale).ascent;
    let glyphs: Vec<PositionedGlyph<'static>> =
        font.layout(text, scale, point(0.0, ascent)).collect();

    let ink = union_bounds(glyphs.iter().filter_map(glyph_ink));

    let offset = ink
        .map(|b| centered_offset(variant.dimensions(), &b))
        .unwrap_or((0, 0));

    Placement {
        glyphs,
        bounds: ink.map(|b| b.translate(offset)),
        offset,
    }
}

/// Coverage as the alpha actually written to the canvas.
fn coverage_alpha(coverage: f32) -> u8 {
    (coverage.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Box of the pixels a glyph inks, in layout coordinates.
///
/// `pixel_bounding_box` is conservative and may include empty rows and
/// columns, so the coverage is walked once to find what really gets drawn.
fn glyph_ink(glyph: &PositionedGlyph<'static>) -> Option<TextBounds> {
    let bb = glyph.pixel_bounding_box()?;
    let mut ink: Option<TextBounds> = None;
    glyph.draw(|gx, gy, coverage| {
        if coverage_alpha(coverage) == 0 {
            return;
        }
        let x = bb.min.x + gx as i32;
        let y = bb.min.y + gy as i32;
        let px = TextBounds {
            min_x: x,
            min_y: y,
            max_x: x + 1,
            max_y: y + 1,
        };
        ink = Some(ink.map_or(px, |b| b.union(px)));
    });
    ink
}

/// Rasterize one variant onto a transparent canvas.
pub(crate) fn rasterize(font: &Font<'static>, text: &str, variant: &Variant) -> RgbaImage {
    let mut canvas = RgbaImage::new(variant.width, variant.height);
    let placement = place(font, text, variant);
    let (dx, dy) = placement.offset;
    let (w, h) = (variant.width as i32, variant.height as i32);

    for glyph in &placement.glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32 + dx;
            let y = bb.min.y + gy as i32 + dy;
            if x < 0 || y < 0 || x >= w || y >= h {
                return;
            }
            let alpha = coverage_alpha(coverage);
            if alpha > 0 {
                blend_ink(canvas.get_pixel_mut(x as u32, y as u32), alpha);
            }
        });
    }
    canvas
}

/// Composite ink with the given coverage over an existing pixel.
fn blend_ink(dst: &mut Rgba<u8>, alpha: u8) {
    let src = u32::from(alpha);
    let dst_a = u32::from(dst.0[3]);
    let out = src + (dst_a * (255 - src) + 127) / 255;
    *dst = Rgba([INK.0[0], INK.0[1], INK.0[2], out.min(255) as u8]);
}

fn encode_png(canvas: &RgbaImage) -> Result<EncodedImage, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new_with_quality(&mut png, CompressionType::Fast, FilterType::Adaptive)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )?;
    Ok(EncodedImage {
        width: canvas.width(),
        height: canvas.height(),
        png,
    })
}

fn render_variant(
    font: &Font<'static>,
    text: &DisplayText,
    variant: &Variant,
) -> Result<EncodedImage, RenderError> {
    encode_png(&rasterize(font, text.as_str(), variant))
}

impl SignatureBackend for SignatureRenderer {
    fn render(
        &self,
        text: &DisplayText,
        font: &FontResource,
    ) -> Result<SignatureImagePair, RenderError> {
        let loaded = load_font(&font.path)?;
        let download = render_variant(&loaded, text, &DOWNLOAD)?;
        let display = render_variant(&loaded, text, &DISPLAY)?;
        Ok(SignatureImagePair { display, download })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::calculations::margins;
    use crate::test_helpers::{fixture_font, ink_bounds};

    fn mono() -> Font<'static> {
        load_font(&fixture_font("DejaVuSansMono.ttf").path).unwrap()
    }

    #[test]
    fn missing_font_is_load_error() {
        let result = load_font(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(RenderError::FontLoad { .. })));
    }

    #[test]
    fn corrupt_font_is_load_error() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/broken.ttf");
        let result = SignatureRenderer::new().render(
            &DisplayText::new("sachin").unwrap(),
            &FontResource::new(path),
        );
        assert!(matches!(result, Err(RenderError::FontLoad { .. })));
    }

    #[test]
    fn blend_accumulates_alpha() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend_ink(&mut px, 128);
        assert_eq!(px.0[3], 128);
        blend_ink(&mut px, 128);
        assert_eq!(px.0[3], 192);
        blend_ink(&mut px, 255);
        assert_eq!(px.0[3], 255);
    }

    #[test]
    fn placement_centered_for_both_variants() {
        let font = mono();
        for variant in [DISPLAY, DOWNLOAD] {
            let placement = place(&font, "Sachin Kumar", &variant);
            let bounds = placement.bounds.unwrap();
            let m = margins(variant.dimensions(), &bounds);
            assert!((m.left - m.right).abs() <= 1, "{variant:?}: {m:?}");
            assert!((m.top - m.bottom).abs() <= 1, "{variant:?}: {m:?}");
            assert!(m.left > 0 && m.top > 0, "{variant:?} should fit: {m:?}");
        }
    }

    #[test]
    fn download_text_is_larger_than_display_text() {
        let font = mono();
        let small = place(&font, "Sachin Kumar", &DISPLAY).bounds.unwrap();
        let large = place(&font, "Sachin Kumar", &DOWNLOAD).bounds.unwrap();
        let ratio = large.width() as f32 / small.width() as f32;
        assert!((5.5..7.0).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn display_raster_is_transparent_with_black_ink_inside_bounds() {
        let font = mono();
        let canvas = rasterize(&font, "Sachin Kumar", &DISPLAY);
        assert_eq!(canvas.dimensions(), (400, 100));
        assert_eq!(canvas.get_pixel(0, 0).0[3], 0);
        assert_eq!(canvas.get_pixel(399, 99).0[3], 0);

        let placed = place(&font, "Sachin Kumar", &DISPLAY).bounds.unwrap();
        let ink = ink_bounds(&canvas).expect("some pixels drawn");
        assert!(ink.min_x >= placed.min_x && ink.max_x <= placed.max_x);
        assert!(ink.min_y >= placed.min_y && ink.max_y <= placed.max_y);

        for px in canvas.pixels().filter(|p| p.0[3] > 0) {
            assert_eq!(&px.0[..3], &[0, 0, 0]);
        }
    }

    #[test]
    fn drawn_ink_is_centered_within_a_pixel() {
        let names = ["Ada Lovelace", "Grace Hopper", "Sachin Kumar"];
        for file in ["DejaVuSansMono.ttf", "DejaVuSerif-Italic.ttf"] {
            let font = load_font(&fixture_font(file).path).unwrap();
            for name in names {
                for variant in [DISPLAY, DOWNLOAD] {
                    let canvas = rasterize(&font, name, &variant);
                    let ink = ink_bounds(&canvas).unwrap();
                    assert_eq!(Some(ink), place(&font, name, &variant).bounds);

                    let m = margins(variant.dimensions(), &ink);
                    assert!((m.left - m.right).abs() <= 1, "{file} {name} {variant:?}: {m:?}");
                    assert!((m.top - m.bottom).abs() <= 1, "{file} {name} {variant:?}: {m:?}");
                }
            }
        }
    }

    #[test]
    fn blank_text_places_nothing() {
        let placement = place(&mono(), "   ", &DISPLAY);
        assert_eq!(placement.bounds, None);
        assert!(ink_bounds(&rasterize(&mono(), "   ", &DISPLAY)).is_none());
    }

    #[test]
    fn oversized_text_is_clipped_not_rejected() {
        let font = mono();
        let long = "Wolfeschlegelsteinhausenbergerdorff Senior The Third";
        let placement = place(&font, long, &DISPLAY);
        let m = margins((400, 100), &placement.bounds.unwrap());
        assert!(m.left < 0);
        assert!((m.left - m.right).abs() <= 1);

        let canvas = rasterize(&font, long, &DISPLAY);
        assert_eq!(canvas.dimensions(), (400, 100));
    }

    #[test]
    fn render_pair_has_fixed_dimensions_and_is_deterministic() {
        let renderer = SignatureRenderer::new();
        let text = DisplayText::new("sachin kumar").unwrap();
        let font = fixture_font("DejaVuSerif-Italic.ttf");

        let first = renderer.render(&text, &font).unwrap();
        assert_eq!((first.display.width, first.display.height), (400, 100));
        assert_eq!((first.download.width, first.download.height), (3840, 2160));

        let display = image::load_from_memory(&first.display.png).unwrap();
        assert_eq!((display.width(), display.height()), (400, 100));
        assert_eq!(display.color(), image::ColorType::Rgba8);
        assert_eq!(
            image::load_from_memory(&first.download.png)
                .unwrap()
                .to_rgba8()
                .dimensions(),
            (3840, 2160)
        );

        let second = renderer.render(&text, &font).unwrap();
        assert_eq!(first, second);
    }
}
