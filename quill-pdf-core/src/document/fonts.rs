use super::Document;
use crate::error::{PdfError, Result};
use crate::fonts::{normalize_style, FontEntry};
use crate::text::{string_width, REPLACEMENT_BYTE};

/// Text in the current font's byte encoding with the advance width of every
/// byte in 1/1000 of the font size
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EncodedText {
    pub bytes: Vec<u8>,
    pub widths: Vec<u16>,
}

impl Document {
    /// Select the font used for subsequent text.
    ///
    /// An empty `family` keeps the current family and a `size` of 0 keeps the
    /// current size. A `U` in `style` turns underlining on.
    pub fn set_font(&mut self, family: &str, style: &str, size: f64) -> Result<()> {
        self.ensure_not_closed()?;
        let family = if family.is_empty() {
            self.font_family.clone()
        } else {
            family.to_lowercase()
        };
        let (style, underline) = normalize_style(style);
        self.underline = underline;
        let size = if size == 0.0 { self.font_size_pt } else { size };

        if self.font_family == family && self.font_style == style && self.font_size_pt == size {
            return Ok(());
        }

        let resolved = self.fonts.resolve(&family, &style)?;
        self.font_family = family;
        self.font_style = style;
        self.font_size_pt = size;
        self.font_size = size / self.k;
        self.current_font = Some(resolved.index);
        if self.page_no() > 0 {
            self.out(format!("BT /F{} {:.2} Tf ET", resolved.index, size))?;
        }
        Ok(())
    }

    /// Register a font without selecting it
    pub fn add_font(&mut self, family: &str, style: &str) -> Result<()> {
        self.ensure_not_closed()?;
        let (style, _) = normalize_style(style);
        self.fonts.resolve(&family.to_lowercase(), &style)?;
        Ok(())
    }

    /// Change the size of the current font, in points
    pub fn set_font_size(&mut self, size: f64) -> Result<()> {
        self.ensure_not_closed()?;
        if self.font_size_pt == size {
            return Ok(());
        }
        self.font_size_pt = size;
        self.font_size = size / self.k;
        if let Some(index) = self.current_font {
            if self.page_no() > 0 {
                self.out(format!("BT /F{index} {size:.2} Tf ET"))?;
            }
        }
        Ok(())
    }

    /// Current font size in points
    pub fn font_size_pt(&self) -> f64 {
        self.font_size_pt
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn fonts(&self) -> &crate::fonts::FontRegistry {
        &self.fonts
    }

    /// The selected font
    pub fn current_font(&self) -> Option<&FontEntry> {
        self.current_font.and_then(|index| self.fonts.by_index(index))
    }

    pub(crate) fn require_font(&self) -> Result<&FontEntry> {
        self.current_font().ok_or(PdfError::NoFontSelected)
    }

    /// Width of `text` in the current font, in user units
    pub fn get_string_width(&self, text: &str) -> Result<f64> {
        let font = self.require_font()?;
        Ok(string_width(font, text, self.font_size))
    }

    /// Encode text for the current font, keeping each byte's advance width.
    /// Characters replaced by `?` keep a width of 0, as in `get_string_width`.
    pub(crate) fn encode_text(&self, text: &str) -> Result<EncodedText> {
        let font = self.require_font()?;
        let encoding = font.text_encoding();
        let (bytes, widths) = text
            .chars()
            .map(|ch| match encoding.encode_char(ch) {
                Some(code) => (code, font.metrics().char_width(code)),
                None => (REPLACEMENT_BYTE, 0),
            })
            .unzip();
        Ok(EncodedText { bytes, widths })
    }

    /// Total of per-byte widths in the current font size, in user units
    pub(crate) fn units_width(&self, widths: &[u16]) -> f64 {
        let units: u64 = widths.iter().map(|w| u64::from(*w)).sum();
        units as f64 * self.font_size / 1000.0
    }

    /// Underline rectangle for encoded text whose baseline starts at (x, y)
    pub(crate) fn underline_operator(
        &self,
        x: f64,
        y: f64,
        bytes: &[u8],
        widths: &[u16],
    ) -> Result<String> {
        let metrics = self.require_font()?.metrics();
        let up = metrics.underline_position as f64;
        let ut = metrics.underline_thickness as f64;
        let spaces = bytes.iter().filter(|b| **b == b' ').count() as f64;
        let w = self.units_width(widths) + self.ws * spaces;
        Ok(format!(
            "{:.2} {:.2} {:.2} {:.2} re f",
            x * self.k,
            (self.h - (y - up / 1000.0 * self.font_size)) * self.k,
            w * self.k,
            -ut / 1000.0 * self.font_size_pt
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_content(doc: &Document) -> String {
        String::from_utf8_lossy(doc.pages().last().unwrap().content()).into_owned()
    }

    #[test]
    fn test_set_font_emits_selection() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_font("Helvetica", "I", 50.0).unwrap();
        assert!(page_content(&doc).ends_with("BT /F1 50.00 Tf ET\n"));
        assert_eq!(doc.current_font().unwrap().display_name(), "Helvetica-Oblique");
    }

    #[test]
    fn test_repeated_selection_is_noop() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_font("times", "", 12.0).unwrap();
        let before = page_content(&doc);
        doc.set_font("times", "", 12.0).unwrap();
        doc.set_font("", "", 0.0).unwrap();
        assert_eq!(page_content(&doc), before);
        assert_eq!(doc.fonts().len(), 1);
    }

    #[test]
    fn test_font_before_page_is_silent() {
        let mut doc = Document::default();
        doc.set_font("courier", "B", 9.0).unwrap();
        assert_eq!(doc.page_no(), 0);
        doc.add_page().unwrap();
        // Re-selected on the new page
        assert!(page_content(&doc).contains("BT /F1 9.00 Tf ET"));
    }

    #[test]
    fn test_arial_and_helvetica_share_index() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_font("Arial", "", 10.0).unwrap();
        doc.set_font("helvetica", "", 11.0).unwrap();
        assert_eq!(doc.fonts().len(), 1);
        assert!(page_content(&doc).contains("BT /F1 11.00 Tf ET"));
    }

    #[test]
    fn test_undefined_font() {
        let mut doc = Document::default();
        match doc.set_font("Comic", "B", 10.0) {
            Err(PdfError::UndefinedFont { family, .. }) => assert_eq!(family, "comic"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_underline_flag() {
        let mut doc = Document::default();
        doc.set_font("helvetica", "UB", 10.0).unwrap();
        assert!(doc.underline());
        assert_eq!(doc.current_font().unwrap().style(), "B");
        doc.set_font("helvetica", "B", 10.0).unwrap();
        assert!(!doc.underline());
    }

    #[test]
    fn test_add_font_registers_without_selecting() {
        let mut doc = Document::default();
        doc.add_font("times", "bi").unwrap();
        assert!(doc.current_font().is_none());
        assert!(doc.fonts().get("timesbi").is_some());
    }

    #[test]
    fn test_set_font_size() {
        let mut doc = Document::default();
        doc.add_page().unwrap();
        doc.set_font("courier", "", 10.0).unwrap();
        doc.set_font_size(14.0).unwrap();
        assert!(page_content(&doc).ends_with("BT /F1 14.00 Tf ET\n"));
        assert_eq!(doc.font_size_pt(), 14.0);
    }

    #[test]
    fn test_string_width_in_user_units() {
        let mut doc = Document::new("P", "pt", "A4").unwrap();
        assert!(matches!(
            doc.get_string_width("x"),
            Err(PdfError::NoFontSelected)
        ));
        doc.set_font("courier", "", 10.0).unwrap();
        assert!((doc.get_string_width("abcd").unwrap() - 24.0).abs() < 1e-9);
    }
}
