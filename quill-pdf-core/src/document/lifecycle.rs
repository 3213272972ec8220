//! Page lifecycle: beginning and ending pages, and where content may go.

use super::hooks::Hook;
use super::Document;
use crate::error::{PdfError, Result};
use crate::geometry::{resolve_page_size, validate_rotation, Orientation, PageSize};
use crate::page::Page;

/// Lifecycle state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No page has been added yet
    Initial = 0,
    /// The last page has ended and no new one has begun
    PageClosed = 1,
    /// A page is receiving content
    PageOpen = 2,
    /// The file has been serialized
    Closed = 3,
}

/// Graphics state carried over from one page to the next
struct CarriedState {
    family: String,
    style: String,
    size: f64,
    line_width: f64,
    draw_color: String,
    fill_color: String,
    text_color: String,
    color_flag: bool,
}

impl Document {
    /// Start a new page with the default orientation and size
    pub fn add_page(&mut self) -> Result<()> {
        self.add_page_with(None, None, 0)
    }

    /// Start a new page, optionally overriding orientation, size and rotation.
    ///
    /// The current page is finished first (footer included). Font, line width
    /// and colors selected on the previous page stay in effect.
    pub fn add_page_with(
        &mut self,
        orientation: Option<Orientation>,
        size: Option<PageSize>,
        rotation: i32,
    ) -> Result<()> {
        self.ensure_not_closed()?;
        let rotation = validate_rotation(rotation)?;
        let size = match size {
            Some(size) => resolve_page_size(&size, self.k)?,
            None => self.def_page_size,
        };
        let orientation = orientation.unwrap_or(self.def_orientation);
        self.open_new_page(orientation, size, rotation)
    }

    pub(crate) fn open_new_page(
        &mut self,
        orientation: Orientation,
        size: (f64, f64),
        rotation: i32,
    ) -> Result<()> {
        let carried = CarriedState {
            family: self.font_family.clone(),
            style: format!("{}{}", self.font_style, if self.underline { "U" } else { "" }),
            size: self.font_size_pt,
            line_width: self.line_width,
            draw_color: self.draw_color.clone(),
            fill_color: self.fill_color.clone(),
            text_color: self.text_color.clone(),
            color_flag: self.color_flag,
        };

        if self.page_no() > 0 {
            self.run_hook(Hook::Footer)?;
            self.end_page();
        }
        self.begin_page(orientation, size, rotation);

        self.out("2 J")?;
        self.line_width = carried.line_width;
        self.out(format!("{:.2} w", carried.line_width * self.k))?;
        if !carried.family.is_empty() {
            self.set_font(&carried.family, &carried.style, carried.size)?;
        }
        self.draw_color = carried.draw_color.clone();
        if carried.draw_color != "0 G" {
            self.out(&carried.draw_color)?;
        }
        self.fill_color = carried.fill_color.clone();
        if carried.fill_color != "0 g" {
            self.out(&carried.fill_color)?;
        }
        self.text_color = carried.text_color.clone();
        self.color_flag = carried.color_flag;

        self.run_hook(Hook::Header)?;

        // Undo whatever the header changed
        if self.line_width != carried.line_width {
            self.line_width = carried.line_width;
            self.out(format!("{:.2} w", carried.line_width * self.k))?;
        }
        if !carried.family.is_empty() {
            self.set_font(&carried.family, &carried.style, carried.size)?;
        }
        if self.draw_color != carried.draw_color {
            self.out(&carried.draw_color)?;
            self.draw_color = carried.draw_color;
        }
        if self.fill_color != carried.fill_color {
            self.out(&carried.fill_color)?;
            self.fill_color = carried.fill_color;
        }
        self.text_color = carried.text_color;
        self.color_flag = carried.color_flag;
        Ok(())
    }

    fn begin_page(&mut self, orientation: Orientation, size: (f64, f64), rotation: i32) {
        let mut page = Page::new(self.page_no() + 1);
        self.state = DocumentState::PageOpen;
        self.x = self.margins.left;
        self.y = self.margins.top;
        self.font_family.clear();

        if orientation != self.cur_orientation || size != self.cur_page_size {
            let (w, h) = orientation.apply(size);
            self.w = w;
            self.h = h;
            self.w_pt = w * self.k;
            self.h_pt = h * self.k;
            self.page_break_trigger = h - self.margins.bottom;
            self.cur_orientation = orientation;
            self.cur_page_size = size;
        }
        if orientation != self.def_orientation || size != self.def_page_size {
            page.set_size(self.w_pt, self.h_pt);
        }
        if rotation != 0 {
            page.set_rotation(rotation);
        }
        self.cur_rotation = rotation;

        tracing::debug!(
            page = page.number(),
            orientation = orientation.code(),
            width = self.w,
            height = self.h,
            rotation,
            "began page"
        );
        self.pages.push(page);
    }

    pub(crate) fn end_page(&mut self) {
        tracing::debug!(page = self.page_no(), "ended page");
        self.state = DocumentState::PageClosed;
    }

    /// Whether the automatic page break applies to content of height `h`
    /// placed at the current position
    pub(crate) fn accepts_page_break(&self, h: f64) -> bool {
        self.y + h > self.page_break_trigger
            && !self.in_header
            && !self.in_footer
            && self.auto_page_break
    }

    /// Break to a new page with the current orientation, size and rotation,
    /// suspending word spacing across the break
    pub(crate) fn break_page(&mut self) -> Result<()> {
        let x = self.x;
        let ws = self.ws;
        if ws > 0.0 {
            self.ws = 0.0;
            self.out("0 Tw")?;
        }
        self.open_new_page(self.cur_orientation, self.cur_page_size, self.cur_rotation)?;
        self.x = x;
        if ws > 0.0 {
            self.ws = ws;
            self.out(format!("{:.3} Tw", ws * self.k))?;
        }
        Ok(())
    }

    pub(crate) fn ensure_not_closed(&self) -> Result<()> {
        match self.state {
            DocumentState::Closed => Err(PdfError::DocumentClosed),
            _ => Ok(()),
        }
    }

    pub(crate) fn ensure_page_open(&self) -> Result<()> {
        match self.state {
            DocumentState::PageOpen => Ok(()),
            DocumentState::Closed => Err(PdfError::DocumentClosed),
            DocumentState::Initial | DocumentState::PageClosed => Err(PdfError::NoPage),
        }
    }

    /// Append one operator line to the current page
    pub(crate) fn out(&mut self, line: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_page_open()?;
        let page = self.pages.last_mut().ok_or(PdfError::NoPage)?;
        page.append_line(line.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Cell, Layout, Zoom};
    use crate::geometry::StandardSize;

    fn content(doc: &Document, page: usize) -> String {
        String::from_utf8_lossy(doc.pages()[page - 1].content()).into_owned()
    }

    #[test]
    fn test_first_page_prologue() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        assert_eq!(doc.state(), DocumentState::PageOpen);
        assert_eq!(doc.page_no(), 1);
        assert_eq!(content(&doc, 1), "2 J\n0.57 w\n");
        assert_eq!(doc.get_x(), doc.margins().left);
        assert_eq!(doc.get_y(), doc.margins().top);
    }

    #[test]
    fn test_content_before_first_page() {
        let mut doc = Document::default();
        assert!(matches!(doc.line(0.0, 0.0, 1.0, 1.0), Err(PdfError::NoPage)));
        assert!(matches!(
            doc.cell(Cell::new(10.0, 5.0)),
            Err(PdfError::NoPage)
        ));
    }

    #[test]
    fn test_calls_after_close() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.close().unwrap();
        assert_eq!(doc.state(), DocumentState::Closed);
        assert!(matches!(doc.add_page(), Err(PdfError::DocumentClosed)));
        assert!(matches!(
            doc.set_font("helvetica", "", 10.0),
            Err(PdfError::DocumentClosed)
        ));
        assert!(matches!(
            doc.rect(0.0, 0.0, 1.0, 1.0, Default::default()),
            Err(PdfError::DocumentClosed)
        ));

        let closed = |result: Result<()>| matches!(result, Err(PdfError::DocumentClosed));
        assert!(closed(doc.set_title("late")));
        assert!(closed(doc.set_author("late")));
        assert!(closed(doc.set_subject("late")));
        assert!(closed(doc.set_keywords("late")));
        assert!(closed(doc.set_creator("late")));
        assert!(closed(doc.set_alias_nb_pages("{nb}")));
        assert!(closed(doc.set_display_mode(Zoom::FullPage, Layout::Single)));
        assert!(closed(doc.set_compression(true)));
        assert!(closed(doc.set_margins(5.0, 5.0, None)));
        assert!(closed(doc.set_left_margin(5.0)));
        assert!(closed(doc.set_top_margin(5.0)));
        assert!(closed(doc.set_right_margin(5.0)));
        assert!(closed(doc.set_cell_margin(1.0)));
        assert!(closed(doc.set_auto_page_break(false, 0.0)));
        assert!(closed(doc.set_creation_date(chrono::Utc::now())));
        assert!(closed(doc.set_x(1.0)));
        assert!(closed(doc.set_y(1.0)));
        assert!(closed(doc.set_xy(1.0, 1.0)));
        assert!(closed(doc.ln(None)));
    }

    #[test]
    fn test_late_metadata_is_rejected_not_dropped() {
        let mut doc = Document::default();
        doc.set_title("early").unwrap();
        doc.close().unwrap();
        let before = doc.to_bytes().unwrap();

        assert!(doc.set_title("late").is_err());
        let after = doc.to_bytes().unwrap();
        assert_eq!(before, after);
        assert!(String::from_utf8_lossy(&after).contains("/Title (early)"));
    }

    #[test]
    fn test_state_carries_over() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_font("times", "BU", 14.0).unwrap();
        doc.set_line_width(1.0).unwrap();
        doc.set_draw_color((255, 0, 0)).unwrap();
        doc.set_fill_color(200u8).unwrap();
        doc.add_page().unwrap();

        let second = content(&doc, 2);
        assert_eq!(
            second,
            "2 J\n2.83 w\nBT /F1 14.00 Tf ET\n1.000 0.000 0.000 RG\n0.784 g\n"
        );
    }

    #[test]
    fn test_invalid_rotation_keeps_current_page() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        assert!(matches!(
            doc.add_page_with(None, None, 45),
            Err(PdfError::InvalidRotation(45))
        ));
        assert_eq!(doc.page_no(), 1);
        assert_eq!(doc.state(), DocumentState::PageOpen);
    }

    #[test]
    fn test_page_overrides() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.add_page_with(Some(Orientation::Landscape), None, 90).unwrap();
        doc.add_page_with(None, Some(StandardSize::A5.into()), 0).unwrap();

        let pages = doc.pages();
        assert_eq!(pages[0].size(), None);
        assert_eq!(pages[0].rotation(), None);

        let (w, h) = pages[1].size().unwrap();
        assert!((w - 841.89).abs() < 1e-6 && (h - 595.28).abs() < 1e-6);
        assert_eq!(pages[1].rotation(), Some(90));

        let (w, h) = pages[2].size().unwrap();
        assert!((w - 420.94).abs() < 1e-6 && (h - 595.28).abs() < 1e-6);
        assert!((doc.page_width() - 148.5).abs() < 0.01);
    }

    #[test]
    fn test_unknown_size_keeps_current_page() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        assert!(matches!(
            doc.add_page_with(None, Some(PageSize::named("b52")), 0),
            Err(PdfError::UnknownPageSize(_))
        ));
        assert_eq!(doc.page_no(), 1);
    }

    #[test]
    fn test_automatic_break_preserves_layout() {
        let mut doc = Document::default();
        doc.add_page_with(Some(Orientation::Landscape), None, 180).unwrap();
        doc.set_font("courier", "", 10.0).unwrap();
        doc.set_y(doc.page_height() - 25.0).unwrap();
        doc.set_x(50.0).unwrap();
        doc.cell(Cell::new(20.0, 10.0).text("next")).unwrap();

        assert_eq!(doc.page_no(), 2);
        assert_eq!(doc.pages()[1].rotation(), Some(180));
        assert!(doc.page_width() > doc.page_height());
        // Horizontal position survives the break
        assert!((doc.get_x() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_break_disabled() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_auto_page_break(false, 0.0).unwrap();
        doc.set_font("courier", "", 10.0).unwrap();
        doc.set_y(doc.page_height() - 5.0).unwrap();
        doc.cell(Cell::new(20.0, 10.0).text("clipped")).unwrap();
        assert_eq!(doc.page_no(), 1);
    }
}
