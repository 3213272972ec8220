//! Units, orientations and page sizes

use crate::error::{PdfError, Result};
use std::fmt;
use std::str::FromStr;

/// User unit in which every coordinate and length is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Point,
    Millimeter,
    Centimeter,
    Inch,
}

impl Unit {
    /// Number of PDF points in one user unit
    pub fn scale_factor(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => 72.0 / 25.4,
            Unit::Centimeter => 72.0 / 2.54,
            Unit::Inch => 72.0,
        }
    }
}

impl FromStr for Unit {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pt" => Ok(Unit::Point),
            "mm" => Ok(Unit::Millimeter),
            "cm" => Ok(Unit::Centimeter),
            "in" => Ok(Unit::Inch),
            other => Err(PdfError::Configuration(format!("Incorrect unit: {other}"))),
        }
    }
}

/// Resolve a unit name to its scale factor
pub fn resolve_unit(unit: &str) -> Result<f64> {
    unit.parse::<Unit>().map(Unit::scale_factor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Single-letter code ("P" or "L")
    pub fn code(self) -> &'static str {
        match self {
            Orientation::Portrait => "P",
            Orientation::Landscape => "L",
        }
    }

    /// Arrange a canonical (short, long) pair for this orientation
    pub fn apply(self, (short, long): (f64, f64)) -> (f64, f64) {
        match self {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl FromStr for Orientation {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            "l" | "landscape" => Ok(Orientation::Landscape),
            _ => Err(PdfError::Configuration(format!(
                "Incorrect orientation: {s}"
            ))),
        }
    }
}

/// Named page formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl StandardSize {
    pub const ALL: [StandardSize; 5] = [
        StandardSize::A3,
        StandardSize::A4,
        StandardSize::A5,
        StandardSize::Letter,
        StandardSize::Legal,
    ];

    /// Width and height in points, portrait
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            StandardSize::A3 => (841.89, 1190.55),
            StandardSize::A4 => (595.28, 841.89),
            StandardSize::A5 => (420.94, 595.28),
            StandardSize::Letter => (612.0, 792.0),
            StandardSize::Legal => (612.0, 1008.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StandardSize::A3 => "a3",
            StandardSize::A4 => "a4",
            StandardSize::A5 => "a5",
            StandardSize::Letter => "letter",
            StandardSize::Legal => "legal",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|size| size.name() == lower)
    }
}

/// A page size request: either a format name or explicit dimensions in user units
#[derive(Debug, Clone, PartialEq)]
pub enum PageSize {
    Named(String),
    Explicit(f64, f64),
}

impl PageSize {
    pub fn named(name: impl Into<String>) -> Self {
        PageSize::Named(name.into())
    }

    pub fn explicit(width: f64, height: f64) -> Self {
        PageSize::Explicit(width, height)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        StandardSize::A4.into()
    }
}

impl From<StandardSize> for PageSize {
    fn from(size: StandardSize) -> Self {
        PageSize::Named(size.name().to_string())
    }
}

impl From<(f64, f64)> for PageSize {
    fn from((width, height): (f64, f64)) -> Self {
        PageSize::Explicit(width, height)
    }
}

impl From<&str> for PageSize {
    fn from(name: &str) -> Self {
        PageSize::Named(name.to_string())
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Named(name) => write!(f, "{name}"),
            PageSize::Explicit(w, h) => write!(f, "{w}x{h}"),
        }
    }
}

/// Resolve a page size to a (short, long) pair in user units.
///
/// Named formats are converted from points with the scale factor `k`;
/// explicit sizes are taken as-is. Orientation is applied by the caller.
pub fn resolve_page_size(size: &PageSize, k: f64) -> Result<(f64, f64)> {
    let (a, b) = match size {
        PageSize::Named(name) => {
            let standard = StandardSize::from_name(name)
                .ok_or_else(|| PdfError::UnknownPageSize(name.clone()))?;
            let (w, h) = standard.dimensions_pt();
            (w / k, h / k)
        }
        PageSize::Explicit(w, h) => (*w, *h),
    };
    Ok(if a > b { (b, a) } else { (a, b) })
}

/// Check that a page rotation is a multiple of 90 degrees
pub fn validate_rotation(rotation: i32) -> Result<i32> {
    if rotation % 90 != 0 {
        return Err(PdfError::InvalidRotation(rotation));
    }
    Ok(rotation)
}
