//! The document being built.
//!
//! A [`Document`] is driven by a sequence of calls: pages are added, fonts
//! and colors selected, and cells, lines and rectangles placed on the current
//! page. [`Document::close`] serializes everything into a complete PDF file.
//!
//! # Example
//!
//! ```rust
//! use quill_pdf::{Cell, Document};
//!
//! # fn main() -> quill_pdf::Result<()> {
//! let mut doc = Document::new("P", "mm", "A4")?;
//! doc.add_page()?;
//! doc.set_font("helvetica", "B", 16.0)?;
//! doc.cell(Cell::new(40.0, 10.0).text("Hello World!"))?;
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"%PDF-1.3"));
//! # Ok(())
//! # }
//! ```

mod cell;
mod display;
mod drawing;
mod fonts;
mod hooks;
mod lifecycle;
mod metadata;
mod options;

pub use cell::{Advance, Border, Cell, Edges};
pub use display::{DisplayMode, Layout, Zoom};
pub use hooks::PageDecorator;
pub use lifecycle::DocumentState;
pub use metadata::{DocumentMetadata, MetadataKey};
pub use options::DocumentOptions;

use crate::error::{PdfError, Result};
use crate::fonts::{FontMetricsProvider, FontRegistry};
use crate::geometry::{resolve_page_size, Orientation, PageSize, StandardSize};
use crate::page::{Margins, Page};
use crate::writer::{DocumentFinalizer, WriterConfig};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// A PDF document under construction
pub struct Document {
    state: DocumentState,
    /// Points per user unit
    k: f64,
    def_orientation: Orientation,
    cur_orientation: Orientation,
    /// Default page size as a (short, long) pair in user units
    def_page_size: (f64, f64),
    cur_page_size: (f64, f64),
    cur_rotation: i32,
    w_pt: f64,
    h_pt: f64,
    w: f64,
    h: f64,
    margins: Margins,
    x: f64,
    y: f64,
    /// Height of the last printed cell
    lasth: f64,
    line_width: f64,

    fonts: FontRegistry,
    /// Selected family, empty when none
    font_family: String,
    font_style: String,
    underline: bool,
    current_font: Option<usize>,
    font_size_pt: f64,
    /// Font size in user units
    font_size: f64,

    draw_color: String,
    fill_color: String,
    text_color: String,
    /// Fill and text colors differ
    color_flag: bool,
    ws: f64,

    auto_page_break: bool,
    page_break_trigger: f64,
    in_header: bool,
    in_footer: bool,
    alias_nb_pages: Option<String>,
    display: DisplayMode,
    metadata: DocumentMetadata,
    creation_date: Option<DateTime<Utc>>,
    config: WriterConfig,

    pages: Vec<Page>,
    decorator: Option<Box<dyn PageDecorator>>,
    buffer: Vec<u8>,
}

/// Where [`Document::output`] sends the file
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    File(PathBuf),
    Bytes,
}

impl Document {
    /// Create a document from an orientation (`P`/`L`), a unit
    /// (`pt`, `mm`, `cm`, `in`) and a default page size.
    pub fn new(orientation: &str, unit: &str, size: impl Into<PageSize>) -> Result<Self> {
        let options = DocumentOptions {
            orientation: orientation.parse()?,
            unit: unit.parse()?,
            page_size: size.into(),
            writer: WriterConfig::default(),
        };
        Self::with_options(options)
    }

    pub fn with_options(options: DocumentOptions) -> Result<Self> {
        Self::with_metrics_provider(options, Box::new(crate::fonts::CoreFontMetrics))
    }

    /// Create a document whose fonts come from `provider`
    pub fn with_metrics_provider(
        options: DocumentOptions,
        provider: Box<dyn FontMetricsProvider>,
    ) -> Result<Self> {
        let k = options.unit.scale_factor();
        let size = resolve_page_size(&options.page_size, k)?;
        Ok(Self::build(options, size, FontRegistry::with_provider(provider)))
    }

    fn build(options: DocumentOptions, size: (f64, f64), fonts: FontRegistry) -> Self {
        let k = options.unit.scale_factor();
        let (w, h) = options.orientation.apply(size);
        let margins = Margins::for_scale(k);
        let page_break_trigger = h - margins.bottom;

        tracing::debug!(
            unit = ?options.unit,
            orientation = options.orientation.code(),
            width = w,
            height = h,
            "created document"
        );

        Self {
            state: DocumentState::Initial,
            k,
            def_orientation: options.orientation,
            cur_orientation: options.orientation,
            def_page_size: size,
            cur_page_size: size,
            cur_rotation: 0,
            w_pt: w * k,
            h_pt: h * k,
            w,
            h,
            margins,
            x: 0.0,
            y: 0.0,
            lasth: 0.0,
            line_width: 0.567 / k,
            fonts,
            font_family: String::new(),
            font_style: String::new(),
            underline: false,
            current_font: None,
            font_size_pt: 12.0,
            font_size: 12.0 / k,
            draw_color: "0 G".to_string(),
            fill_color: "0 g".to_string(),
            text_color: "0 g".to_string(),
            color_flag: false,
            ws: 0.0,
            auto_page_break: true,
            page_break_trigger,
            in_header: false,
            in_footer: false,
            alias_nb_pages: None,
            display: DisplayMode::default(),
            metadata: DocumentMetadata::new(),
            creation_date: None,
            config: options.writer,
            pages: Vec::new(),
            decorator: None,
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Points per user unit
    pub fn scale_factor(&self) -> f64 {
        self.k
    }

    /// Current page number, 0 before the first page
    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_width(&self) -> f64 {
        self.w
    }

    pub fn page_height(&self) -> f64 {
        self.h
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    /// Set the abscissa; negative values count from the right edge
    pub fn set_x(&mut self, x: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.x = if x >= 0.0 { x } else { self.w + x };
        Ok(())
    }

    /// Set the ordinate and move the abscissa back to the left margin;
    /// negative values count from the bottom edge
    pub fn set_y(&mut self, y: f64) -> Result<()> {
        self.set_y_with(y, true)
    }

    pub fn set_y_with(&mut self, y: f64, reset_x: bool) -> Result<()> {
        self.ensure_not_closed()?;
        self.y = if y >= 0.0 { y } else { self.h + y };
        if reset_x {
            self.x = self.margins.left;
        }
        Ok(())
    }

    pub fn set_xy(&mut self, x: f64, y: f64) -> Result<()> {
        self.set_x(x)?;
        self.set_y_with(y, false)
    }

    /// Left, top and right margins; the right one defaults to the left one
    pub fn set_margins(&mut self, left: f64, top: f64, right: Option<f64>) -> Result<()> {
        self.ensure_not_closed()?;
        self.margins.left = left;
        self.margins.top = top;
        self.margins.right = right.unwrap_or(left);
        Ok(())
    }

    pub fn set_left_margin(&mut self, margin: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.margins.left = margin;
        if self.page_no() > 0 && self.x < margin {
            self.x = margin;
        }
        Ok(())
    }

    pub fn set_top_margin(&mut self, margin: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.margins.top = margin;
        Ok(())
    }

    pub fn set_right_margin(&mut self, margin: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.margins.right = margin;
        Ok(())
    }

    /// Padding between a cell border and its text
    pub fn set_cell_margin(&mut self, margin: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.margins.cell = margin;
        Ok(())
    }

    /// Enable or disable automatic page breaks, triggered `margin` above the
    /// bottom edge
    pub fn set_auto_page_break(&mut self, enabled: bool, margin: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.auto_page_break = enabled;
        self.margins.bottom = margin;
        self.page_break_trigger = self.h - margin;
        Ok(())
    }

    pub fn auto_page_break(&self) -> bool {
        self.auto_page_break
    }

    pub fn set_display_mode(&mut self, zoom: Zoom, layout: Layout) -> Result<()> {
        self.ensure_not_closed()?;
        self.display = DisplayMode { zoom, layout };
        Ok(())
    }

    pub fn set_compression(&mut self, compress: bool) -> Result<()> {
        self.ensure_not_closed()?;
        self.config.compress_streams = compress;
        Ok(())
    }

    fn set_metadata(&mut self, key: MetadataKey, value: impl Into<String>) -> Result<()> {
        self.ensure_not_closed()?;
        self.metadata.set(key, value);
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.set_metadata(MetadataKey::Title, title)
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> Result<()> {
        self.set_metadata(MetadataKey::Author, author)
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<()> {
        self.set_metadata(MetadataKey::Subject, subject)
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) -> Result<()> {
        self.set_metadata(MetadataKey::Keywords, keywords)
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) -> Result<()> {
        self.set_metadata(MetadataKey::Creator, creator)
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Fix the creation date written in the info dictionary
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) -> Result<()> {
        self.ensure_not_closed()?;
        self.creation_date = Some(date);
        Ok(())
    }

    /// Token replaced by the total page count when the document is closed
    pub fn set_alias_nb_pages(&mut self, alias: impl Into<String>) -> Result<()> {
        self.ensure_not_closed()?;
        self.alias_nb_pages = Some(alias.into());
        Ok(())
    }

    pub fn alias_nb_pages(&self) -> Option<&str> {
        self.alias_nb_pages.as_deref()
    }

    /// Finish the document. Closing an already closed document does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.state == DocumentState::Closed {
            return Ok(());
        }
        if self.page_no() == 0 {
            self.add_page()?;
        }
        self.run_hook(hooks::Hook::Footer)?;
        self.end_page();
        self.end_doc()
    }

    fn end_doc(&mut self) -> Result<()> {
        let (def_w, def_h) = self.def_orientation.apply(self.def_page_size);
        let finalizer = DocumentFinalizer {
            pages: &self.pages,
            fonts: &self.fonts,
            metadata: &self.metadata,
            display: self.display,
            default_size: (def_w * self.k, def_h * self.k),
            config: &self.config,
            alias: self.alias_nb_pages.as_deref(),
            creation_date: self.creation_date.unwrap_or_else(Utc::now),
        };
        self.buffer = finalizer.finalize()?;
        self.state = DocumentState::Closed;
        Ok(())
    }

    /// Close the document and send it to `dest`: `F` writes a file called
    /// `name` (default `doc.pdf`) and returns `None`, `S` returns the bytes.
    ///
    /// Arguments given in the opposite order are accepted.
    pub fn output(&mut self, dest: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let destination = parse_destination(dest, name)?;
        self.close()?;
        match destination {
            Destination::File(path) => {
                self.write_file(&path)?;
                Ok(None)
            }
            Destination::Bytes => Ok(Some(self.buffer.clone())),
        }
    }

    /// Close the document and write it to `path`
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.close()?;
        self.write_file(path.as_ref())
    }

    /// Close the document and return the file contents
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.close()?;
        Ok(self.buffer.clone())
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.buffer).map_err(|source| PdfError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = self.buffer.len(), "wrote document");
        Ok(())
    }
}

impl Default for Document {
    /// Portrait A4 in millimeters
    fn default() -> Self {
        let options = DocumentOptions::default();
        let k = options.unit.scale_factor();
        let (w, h) = StandardSize::A4.dimensions_pt();
        Self::build(options, (w / k, h / k), FontRegistry::new())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("state", &self.state)
            .field("pages", &self.pages.len())
            .field("fonts", &self.fonts)
            .field("x", &self.x)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}

fn parse_destination(dest: &str, name: &str) -> Result<Destination> {
    let (mut dest, mut name) = (dest, name);
    if name.chars().count() == 1 && dest.chars().count() != 1 {
        std::mem::swap(&mut dest, &mut name);
    }
    let name = if name.is_empty() { "doc.pdf" } else { name };
    match dest.to_uppercase().as_str() {
        "F" => Ok(Destination::File(PathBuf::from(name))),
        "S" => Ok(Destination::Bytes),
        other => Err(PdfError::Configuration(format!(
            "Incorrect output destination: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Unit;

    #[test]
    fn test_new_in_millimeters() {
        let doc = Document::new("P", "mm", "A4").unwrap();
        assert_eq!(doc.state(), DocumentState::Initial);
        assert_eq!(doc.page_no(), 0);
        assert!((doc.page_width() - 210.0).abs() < 0.01);
        assert!((doc.page_height() - 297.0).abs() < 0.01);
        assert!((doc.margins().left - 10.0).abs() < 0.01);
        assert!((doc.margins().bottom - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_new_landscape() {
        let doc = Document::new("L", "pt", "letter").unwrap();
        assert_eq!(doc.page_width(), 792.0);
        assert_eq!(doc.page_height(), 612.0);
    }

    #[test]
    fn test_new_rejects_bad_arguments() {
        assert!(matches!(
            Document::new("P", "furlong", "A4"),
            Err(PdfError::Configuration(_))
        ));
        assert!(matches!(
            Document::new("X", "mm", "A4"),
            Err(PdfError::Configuration(_))
        ));
        assert!(matches!(
            Document::new("P", "mm", "B52"),
            Err(PdfError::UnknownPageSize(_))
        ));
    }

    #[test]
    fn test_default_matches_new() {
        let a = Document::default();
        let b = Document::with_options(DocumentOptions::default().with_unit(Unit::Millimeter)).unwrap();
        assert_eq!(a.page_width(), b.page_width());
        assert_eq!(a.page_height(), b.page_height());
    }

    #[test]
    fn test_set_x_and_y() {
        let mut doc = Document::new("P", "pt", (200.0, 400.0)).unwrap();
        doc.set_x(50.0).unwrap();
        assert_eq!(doc.get_x(), 50.0);
        doc.set_x(-30.0).unwrap();
        assert_eq!(doc.get_x(), 170.0);

        doc.set_y(-100.0).unwrap();
        assert_eq!(doc.get_y(), 300.0);
        assert_eq!(doc.get_x(), doc.margins().left);

        doc.set_xy(20.0, 40.0).unwrap();
        assert_eq!((doc.get_x(), doc.get_y()), (20.0, 40.0));
    }

    #[test]
    fn test_margins() {
        let mut doc = Document::default();
        doc.set_margins(15.0, 20.0, None).unwrap();
        assert_eq!(doc.margins().right, 15.0);
        doc.set_right_margin(5.0).unwrap();
        doc.set_top_margin(7.0).unwrap();
        doc.set_cell_margin(1.5).unwrap();
        assert_eq!(doc.margins().right, 5.0);
        assert_eq!(doc.margins().top, 7.0);
        assert_eq!(doc.margins().cell, 1.5);
    }

    #[test]
    fn test_left_margin_moves_cursor() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_left_margin(30.0).unwrap();
        assert_eq!(doc.get_x(), 30.0);
    }

    #[test]
    fn test_parse_destination() {
        assert_eq!(parse_destination("S", "").unwrap(), Destination::Bytes);
        assert_eq!(
            parse_destination("f", "").unwrap(),
            Destination::File(PathBuf::from("doc.pdf"))
        );
        // Swapped arguments
        assert_eq!(
            parse_destination("report.pdf", "F").unwrap(),
            Destination::File(PathBuf::from("report.pdf"))
        );
        assert!(matches!(
            parse_destination("D", "x.pdf"),
            Err(PdfError::Configuration(_))
        ));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut doc = Document::default();
        doc.close().unwrap();
        assert_eq!(doc.state(), DocumentState::Closed);
        assert_eq!(doc.page_no(), 1);
        let first = doc.to_bytes().unwrap();
        doc.close().unwrap();
        assert_eq!(doc.to_bytes().unwrap(), first);
    }

    #[test]
    fn test_bad_destination_leaves_document_open() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        assert!(doc.output("I", "x.pdf").is_err());
        assert_eq!(doc.state(), DocumentState::PageOpen);
    }

    #[test]
    fn test_output_bytes() {
        let mut doc = Document::default();
        let bytes = doc.output("S", "").unwrap().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.3\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_output_write_error() {
        let mut doc = Document::default();
        let missing = std::env::temp_dir()
            .join("quill-pdf-missing-dir")
            .join("nested")
            .join("out.pdf");
        match doc.save(&missing) {
            Err(PdfError::OutputWrite { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_metadata_setters() {
        let mut doc = Document::default();
        doc.set_title("T").unwrap();
        doc.set_author("A").unwrap();
        doc.set_subject("S").unwrap();
        doc.set_keywords("K").unwrap();
        doc.set_creator("C").unwrap();
        assert_eq!(doc.metadata().len(), 5);
        assert_eq!(doc.metadata().get(MetadataKey::Author), Some("A"));
    }
}
