mod encoding;
pub mod header_footer;

pub use encoding::{TextEncoding, REPLACEMENT_BYTE};
pub use header_footer::{HeaderFooter, HeaderFooterOptions, HeaderFooterPosition};

use crate::error::{PdfError, Result};
use crate::fonts::FontEntry;
use std::str::FromStr;

/// Horizontal placement of text inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch word spacing to fill the line (multi-line cells only)
    Justified,
}

impl FromStr for TextAlign {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "" | "L" => Ok(TextAlign::Left),
            "C" => Ok(TextAlign::Center),
            "R" => Ok(TextAlign::Right),
            "J" => Ok(TextAlign::Justified),
            _ => Err(PdfError::Configuration(format!("Incorrect alignment: {s}"))),
        }
    }
}

/// Escape bytes for a PDF literal string
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'\\' => escaped.extend_from_slice(b"\\\\"),
            b'(' => escaped.extend_from_slice(b"\\("),
            b')' => escaped.extend_from_slice(b"\\)"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            b'\n' => escaped.extend_from_slice(b"\\n"),
            b'\t' => escaped.extend_from_slice(b"\\t"),
            _ => escaped.push(byte),
        }
    }
    escaped
}

/// Width of `text` in `font` at `font_size` (in whatever unit the size is given)
pub fn string_width(font: &FontEntry, text: &str, font_size: f64) -> f64 {
    let units: u64 = text.chars().map(|ch| u64::from(font.char_width(ch))).sum();
    units as f64 * font_size / 1000.0
}
