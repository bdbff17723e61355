//! Name normalization and output file naming.
//!
//! ## Display Text
//!
//! Raw user input is split on whitespace and the first character of every
//! word is upper-cased. The rest of each word is left exactly as typed, so
//! deliberate capitals survive:
//! - `"sachin kumar"` → "Sachin Kumar"
//! - `"john mcDONALD"` → "John McDONALD"
//! - `"  ada   lovelace "` → "Ada Lovelace"
//!
//! ## Output Files
//!
//! Every gallery entry produces two files named by its 0-based position:
//! `signature_display_<index>.png` and `signature_hd_<index>.png`.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("name must contain at least one non-whitespace character")]
    Blank,
}

/// Normalized, non-empty text ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText(String);

impl DisplayText {
    /// Normalize raw input. Blank input is rejected.
    pub fn new(raw: &str) -> Result<Self, NameError> {
        let normalized = capitalize_words(raw);
        if normalized.is_empty() {
            return Err(NameError::Blank);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-case the first character of each whitespace-separated word and
/// rejoin with single spaces.
pub fn capitalize_words(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File name of the small preview image for a gallery position.
pub fn display_file_name(index: usize) -> String {
    format!("signature_display_{index}.png")
}

/// File name of the high-resolution image for a gallery position.
pub fn download_file_name(index: usize) -> String {
    format!("signature_hd_{index}.png")
}
