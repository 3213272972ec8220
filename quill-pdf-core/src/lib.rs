//! # quill-pdf
//!
//! A PDF writer driven by simple layout calls: add a page, pick a font and
//! colors, place text cells, lines and rectangles. Every call appends to the
//! current page, and closing the document serializes a complete file with
//! its cross-reference table.
//!
//! ## Features
//!
//! - **Units and page sizes**: points, millimeters, centimeters or inches;
//!   A3, A4, A5, Letter, Legal or any explicit size, per page if needed
//! - **Standard fonts**: the 14 Type 1 fonts every viewer provides, with
//!   exact widths and ToUnicode CMaps so text stays extractable
//! - **Cells**: bordered, filled and aligned text, automatic line wrapping
//!   with justification, and automatic page breaks
//! - **Headers and footers**: per-page callbacks, including a ready-made
//!   decorator with page-number placeholders
//! - **Compression**: optional `/FlateDecode` streams (`compression` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_pdf::{Advance, Border, Cell, Document, Result, TextAlign};
//!
//! # fn main() -> Result<()> {
//! let mut doc = Document::new("P", "mm", "A4")?;
//! doc.set_title("Invoice")?;
//! doc.set_alias_nb_pages("{nb}")?;
//! doc.add_page()?;
//!
//! doc.set_font("helvetica", "B", 16.0)?;
//! doc.cell(Cell::new(0.0, 10.0).text("Invoice").align(TextAlign::Center).advance(Advance::NextLine))?;
//!
//! doc.set_font("times", "", 12.0)?;
//! doc.set_fill_color((230, 230, 230))?;
//! doc.cell(Cell::new(60.0, 8.0).text("Item").border(Border::Frame).fill(true))?;
//! doc.cell(Cell::new(30.0, 8.0).text("12.50").border(Border::Frame).align(TextAlign::Right))?;
//! doc.ln(None)?;
//! doc.multi_cell(0.0, 5.0, "Payment is due within 30 days.", Border::None, TextAlign::Justified, false)?;
//!
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "compression")]
pub mod compression;
pub mod document;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod text;
pub mod writer;

// Re-export generation types
pub use document::{
    Advance, Border, Cell, DisplayMode, Document, DocumentMetadata, DocumentOptions,
    DocumentState, Edges, Layout, MetadataKey, PageDecorator, Zoom,
};
pub use error::{PdfError, Result};
pub use fonts::{CoreFontMetrics, FontMetrics, FontMetricsProvider};
pub use geometry::{Orientation, PageSize, StandardSize, Unit};
pub use graphics::{Color, RectStyle};
pub use page::{Margins, Page};
pub use text::{HeaderFooter, HeaderFooterOptions, HeaderFooterPosition, TextAlign};
pub use writer::WriterConfig;

/// Current version of quill-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
