mod color;

pub use color::Color;

use crate::error::{PdfError, Result};
use std::str::FromStr;

/// Painting mode of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectStyle {
    #[default]
    Draw,
    Fill,
    DrawFill,
}

impl RectStyle {
    pub fn operator(self) -> &'static str {
        match self {
            RectStyle::Draw => "S",
            RectStyle::Fill => "f",
            RectStyle::DrawFill => "B",
        }
    }
}

impl FromStr for RectStyle {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "" | "D" => Ok(RectStyle::Draw),
            "F" => Ok(RectStyle::Fill),
            "FD" | "DF" => Ok(RectStyle::DrawFill),
            _ => Err(PdfError::Configuration(format!("Incorrect rectangle style: {s}"))),
        }
    }
}

/// Maps user coordinates (top-left origin, user units) to PDF space
/// (bottom-left origin, points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpace {
    /// Scale factor, points per user unit
    pub k: f64,
    /// Page height in user units
    pub height: f64,
}

impl PageSpace {
    pub fn new(k: f64, height: f64) -> Self {
        Self { k, height }
    }

    pub fn x(&self, x: f64) -> f64 {
        x * self.k
    }

    pub fn y(&self, y: f64) -> f64 {
        (self.height - y) * self.k
    }

    /// `x y m x y l S`
    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> String {
        format!(
            "{:.2} {:.2} m {:.2} {:.2} l S",
            self.x(x1),
            self.y(y1),
            self.x(x2),
            self.y(y2)
        )
    }

    /// `x y w h re <op>` with the height negated so the rectangle grows downwards
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, operator: &str) -> String {
        format!(
            "{:.2} {:.2} {:.2} {:.2} re {operator}",
            self.x(x),
            self.y(y),
            w * self.k,
            -h * self.k
        )
    }

    /// `BT x y Td (text) Tj ET` around already escaped bytes
    pub fn show_text(&self, x: f64, y: f64, escaped: &[u8]) -> Vec<u8> {
        let mut op = format!("BT {:.2} {:.2} Td (", self.x(x), self.y(y)).into_bytes();
        op.extend_from_slice(escaped);
        op.extend_from_slice(b") Tj ET");
        op
    }
}
