//! How a viewer should present the document when it is opened.

use crate::error::{PdfError, Result};
use std::str::FromStr;

/// Initial zoom level
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Zoom {
    /// Viewer default, no open action is written
    #[default]
    Default,
    /// Whole page visible
    FullPage,
    /// Page width fills the window
    FullWidth,
    /// Actual size
    Real,
    /// Zoom factor in percent
    Percent(f64),
}

impl FromStr for Zoom {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Zoom::Default),
            "fullpage" => Ok(Zoom::FullPage),
            "fullwidth" => Ok(Zoom::FullWidth),
            "real" => Ok(Zoom::Real),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|z| z.is_finite() && *z > 0.0)
                .map(Zoom::Percent)
                .ok_or_else(|| PdfError::Configuration(format!("Incorrect zoom display mode: {s}"))),
        }
    }
}

/// Page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Default,
    /// One page at a time
    Single,
    /// Pages in one continuous column
    Continuous,
    /// Two columns, odd pages on the left
    Two,
}

impl Layout {
    /// Value of the catalog's `/PageLayout`, if one is written
    pub fn page_layout(&self) -> Option<&'static str> {
        match self {
            Layout::Default => None,
            Layout::Single => Some("SinglePage"),
            Layout::Continuous => Some("OneColumn"),
            Layout::Two => Some("TwoColumnLeft"),
        }
    }
}

impl FromStr for Layout {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Layout::Default),
            "single" => Ok(Layout::Single),
            "continuous" => Ok(Layout::Continuous),
            "two" => Ok(Layout::Two),
            _ => Err(PdfError::Configuration(format!(
                "Incorrect layout display mode: {s}"
            ))),
        }
    }
}

/// Zoom and layout together
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMode {
    pub zoom: Zoom,
    pub layout: Layout,
}
