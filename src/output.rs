//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Sachin Kumar (10 signatures)
//!     Gallery: static/signatures/k3v9q0xz7m2a/index.html
//!     001 DejaVuSerif-Italic.ttf
//!         Display: k3v9q0xz7m2a/signature_display_0.png
//!         Download: k3v9q0xz7m2a/signature_hd_0.png
//! ```
//!
//! ## Fonts
//!
//! ```text
//! Fonts in static/fonts (2)
//! 001 DejaVuSansMono.ttf
//! 002 DejaVuSerif-Italic.ttf
//! ```

use crate::contact::Notification;
use crate::fonts::FontCatalog;
use crate::gallery::GalleryManifest;
use std::path::Path;

/// Format a 0-based position as a 1-based, 3-digit zero-padded index.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_generate_output(manifest: &GalleryManifest, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} signatures)",
        manifest.name,
        manifest.signatures.len()
    )];
    lines.push(format!(
        "{}Gallery: {}",
        indent(1),
        output_dir
            .join(&manifest.namespace)
            .join("index.html")
            .display()
    ));
    for record in &manifest.signatures {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(record.index),
            record.font
        ));
        lines.push(format!("{}Display: {}", indent(2), record.display));
        lines.push(format!("{}Download: {}", indent(2), record.download));
    }
    lines
}

pub fn print_generate_output(manifest: &GalleryManifest, output_dir: &Path) {
    for line in format_generate_output(manifest, output_dir) {
        println!("{}", line);
    }
}

pub fn format_font_catalog(catalog: &FontCatalog, fonts_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Fonts in {} ({})",
        fonts_dir.display(),
        catalog.len()
    )];
    if catalog.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (pos, font) in catalog.fonts().iter().enumerate() {
        lines.push(format!("{} {}", format_index(pos), font.name()));
    }
    lines
}

pub fn print_font_catalog(catalog: &FontCatalog, fonts_dir: &Path) {
    for line in format_font_catalog(catalog, fonts_dir) {
        println!("{}", line);
    }
}

pub fn format_contact_output(notification: &Notification, outbox_dir: &Path) -> Vec<String> {
    vec![
        "Your message has been sent!".to_string(),
        format!("{}To: {}", indent(1), notification.recipients.join(", ")),
        format!("{}Outbox: {}", indent(1), outbox_dir.display()),
    ]
}

pub fn print_contact_output(notification: &Notification, outbox_dir: &Path) {
    for line in format_contact_output(notification, outbox_dir) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontResource;
    use crate::gallery::SignatureRecord;

    #[test]
    fn generate_output_lists_each_signature() {
        let manifest = GalleryManifest {
            name: "Sachin Kumar".into(),
            namespace: "ns".into(),
            signatures: vec![SignatureRecord {
                index: 0,
                font: "Script.ttf".into(),
                display: "ns/signature_display_0.png".into(),
                download: "ns/signature_hd_0.png".into(),
            }],
        };
        let lines = format_generate_output(&manifest, Path::new("out"));
        assert_eq!(
            lines,
            vec![
                "Sachin Kumar (1 signatures)",
                "    Gallery: out/ns/index.html",
                "    001 Script.ttf",
                "        Display: ns/signature_display_0.png",
                "        Download: ns/signature_hd_0.png",
            ]
        );
    }

    #[test]
    fn font_catalog_output() {
        let catalog = FontCatalog::from_fonts(vec![
            FontResource::new("fonts/a.ttf"),
            FontResource::new("fonts/b.otf"),
        ]);
        let lines = format_font_catalog(&catalog, Path::new("fonts"));
        assert_eq!(lines, vec!["Fonts in fonts (2)", "001 a.ttf", "002 b.otf"]);
    }

    #[test]
    fn empty_font_catalog_output() {
        let lines = format_font_catalog(&FontCatalog::default(), Path::new("fonts"));
        assert_eq!(lines, vec!["Fonts in fonts (0)", "    (none)"]);
    }

    #[test]
    fn contact_output() {
        let n = Notification {
            subject: "s".into(),
            sender: "a@b.co".into(),
            recipients: vec!["x@y.co".into(), "z@y.co".into()],
            body: String::new(),
        };
        let lines = format_contact_output(&n, Path::new("outbox"));
        assert_eq!(lines[1], "    To: x@y.co, z@y.co");
        assert_eq!(lines[2], "    Outbox: outbox");
    }
}
