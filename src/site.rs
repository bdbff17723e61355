//! Gallery page generation.
//!
//! Each gallery directory gets an `index.html` that shows the display
//! variants in a grid, each linking to its high-resolution download.
//! Links are relative to the page, so a gallery directory can be served
//! or copied anywhere as-is.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::gallery::{GalleryManifest, SignatureRecord};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;

const CSS: &str = r#"
:root { color-scheme: light dark; }
body { font-family: system-ui, sans-serif; margin: 0; padding: 2rem; }
h1 { font-weight: 400; margin: 0 0 1.5rem; }
.signature-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(400px, 1fr));
    gap: 1rem;
}
.signature-card {
    border: 1px solid #e0e0e0;
    padding: 1rem;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    background: #ffffff;
}
.signature-card img { width: 400px; height: 100px; }
.signature-font { color: #666666; font-size: 0.85rem; }
"#;

/// File name component of a manifest path (`ns/file.png` → `file.png`).
fn page_relative(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn signature_card(record: &SignatureRecord, name: &str) -> Markup {
    let download = page_relative(&record.download);
    html! {
        figure.signature-card {
            img src=(page_relative(&record.display))
                alt={ (name) " in " (record.font) }
                width="400" height="100";
            figcaption {
                span.signature-font { (record.font) }
                " "
                a href=(download) download=(download) { "Download HD" }
            }
        }
    }
}

/// Render the gallery page for a persisted manifest.
pub fn render_gallery_page(manifest: &GalleryManifest) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Signatures for " (manifest.name) }
                style { (CSS) }
            }
            body {
                h1 { (manifest.name) }
                main.signature-grid {
                    @for record in &manifest.signatures {
                        (signature_card(record, &manifest.name))
                    }
                }
            }
        }
    }
}

/// Write `index.html` for `manifest` into `dir`.
pub fn write_gallery_page(dir: &Path, manifest: &GalleryManifest) -> std::io::Result<()> {
    fs::write(
        dir.join("index.html"),
        render_gallery_page(manifest).into_string(),
    )
}
