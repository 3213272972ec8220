use crate::geometry::{Orientation, PageSize, Unit};
use crate::writer::WriterConfig;

/// Construction settings of a [`Document`](super::Document).
///
/// # Example
///
/// ```rust
/// use quill_pdf::{DocumentOptions, Orientation, StandardSize, Unit};
///
/// let options = DocumentOptions::default()
///     .with_orientation(Orientation::Landscape)
///     .with_unit(Unit::Point)
///     .with_page_size(StandardSize::Letter);
/// assert_eq!(options.unit, Unit::Point);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    /// Default orientation of every page
    pub orientation: Orientation,
    /// User unit for all coordinates
    pub unit: Unit,
    /// Default page size
    pub page_size: PageSize,
    pub writer: WriterConfig,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            unit: Unit::Millimeter,
            page_size: PageSize::default(),
            writer: WriterConfig::default(),
        }
    }
}

impl DocumentOptions {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_page_size(mut self, size: impl Into<PageSize>) -> Self {
        self.page_size = size.into();
        self
    }

    pub fn with_pdf_version(mut self, version: impl Into<String>) -> Self {
        self.writer.pdf_version = version.into();
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.writer.compress_streams = compress;
        self
    }
}
