//! Cells: rectangular areas with optional border, background and one line
//! of aligned text.

use super::fonts::EncodedText;
use super::Document;
use crate::error::{PdfError, Result};
use crate::text::{escape, TextAlign};
use bitflags::bitflags;
use std::str::FromStr;

bitflags! {
    /// Individual cell edges
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

/// Border drawn around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    None,
    /// Full rectangle
    Frame,
    /// Some edges, each drawn as its own line
    Edges(Edges),
}

impl FromStr for Border {
    type Err = PdfError;

    /// `0` or empty for none, `1` for a frame, otherwise any of `L`, `T`, `R`, `B`
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "0" => return Ok(Border::None),
            "1" => return Ok(Border::Frame),
            _ => {}
        }
        let mut edges = Edges::empty();
        for ch in s.chars() {
            edges |= match ch.to_ascii_uppercase() {
                'L' => Edges::LEFT,
                'T' => Edges::TOP,
                'R' => Edges::RIGHT,
                'B' => Edges::BOTTOM,
                _ => return Err(PdfError::Configuration(format!("Incorrect border: {s}"))),
            };
        }
        Ok(Border::Edges(edges))
    }
}

/// Where the cursor goes after a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Advance {
    /// To the right of the cell
    #[default]
    Right,
    /// To the start of the next line
    NextLine,
    /// Below the cell, same abscissa
    Below,
}

/// A cell to place with [`Document::cell`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Width; 0 extends the cell to the right margin
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub border: Border,
    pub advance: Advance,
    pub align: TextAlign,
    pub fill: bool,
}

impl Cell {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn advance(mut self, advance: Advance) -> Self {
        self.advance = advance;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }
}

impl Document {
    /// Place a cell at the current position.
    ///
    /// A page break happens first when the cell would cross the break
    /// trigger and automatic breaking is on.
    pub fn cell(&mut self, cell: Cell) -> Result<()> {
        self.ensure_page_open()?;
        let encoded = if cell.text.is_empty() {
            EncodedText::default()
        } else {
            self.encode_text(&cell.text)?
        };
        self.place_cell(
            cell.width,
            cell.height,
            &encoded.bytes,
            &encoded.widths,
            cell.border,
            cell.advance,
            cell.align,
            cell.fill,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn place_cell(
        &mut self,
        width: f64,
        h: f64,
        text: &[u8],
        widths: &[u16],
        border: Border,
        advance: Advance,
        align: TextAlign,
        fill: bool,
    ) -> Result<()> {
        if self.accepts_page_break(h) {
            self.break_page()?;
        }
        let w = if width == 0.0 {
            self.w - self.margins.right - self.x
        } else {
            width
        };
        let space = self.page_space();
        let (x, y) = (self.x, self.y);

        let mut s = String::new();
        if fill || border == Border::Frame {
            let op = match (fill, border == Border::Frame) {
                (true, true) => "B",
                (true, false) => "f",
                _ => "S",
            };
            s.push_str(&space.rect(x, y, w, h, op));
            s.push(' ');
        }
        if let Border::Edges(edges) = border {
            if edges.contains(Edges::LEFT) {
                s.push_str(&space.line(x, y, x, y + h));
                s.push(' ');
            }
            if edges.contains(Edges::TOP) {
                s.push_str(&space.line(x, y, x + w, y));
                s.push(' ');
            }
            if edges.contains(Edges::RIGHT) {
                s.push_str(&space.line(x + w, y, x + w, y + h));
                s.push(' ');
            }
            if edges.contains(Edges::BOTTOM) {
                s.push_str(&space.line(x, y + h, x + w, y + h));
                s.push(' ');
            }
        }

        let mut op = s.into_bytes();
        if !text.is_empty() {
            let text_width = self.units_width(widths);
            let dx = match align {
                TextAlign::Right => w - self.margins.cell - text_width,
                TextAlign::Center => (w - text_width) / 2.0,
                TextAlign::Left | TextAlign::Justified => self.margins.cell,
            };
            let baseline = y + 0.5 * h + 0.3 * self.font_size;
            if self.color_flag {
                op.extend_from_slice(format!("q {} ", self.text_color).as_bytes());
            }
            op.extend(space.show_text(x + dx, baseline, &escape(text)));
            if self.underline {
                op.push(b' ');
                op.extend(self.underline_operator(x + dx, baseline, text, widths)?.into_bytes());
            }
            if self.color_flag {
                op.extend_from_slice(b" Q");
            }
        }
        if !op.is_empty() {
            self.out(op)?;
        }

        self.lasth = h;
        match advance {
            Advance::Right => self.x += w,
            Advance::NextLine => {
                self.y += h;
                self.x = self.margins.left;
            }
            Advance::Below => self.y += h,
        }
        Ok(())
    }

    /// Print text with line breaks, either explicit (`\n`) or automatic at
    /// the cell width. Each line is a cell; the cursor ends up below the last
    /// one. Justified text stretches word spacing on wrapped lines.
    pub fn multi_cell(
        &mut self,
        width: f64,
        h: f64,
        text: &str,
        border: Border,
        align: TextAlign,
        fill: bool,
    ) -> Result<()> {
        self.ensure_page_open()?;
        let EncodedText { bytes: s, widths: cw } = self.encode_text(&text.replace('\r', ""))?;
        let w = if width == 0.0 {
            self.w - self.margins.right - self.x
        } else {
            width
        };
        let wmax = (w - 2.0 * self.margins.cell) * 1000.0 / self.font_size;

        let mut nb = s.len();
        if nb > 0 && s[nb - 1] == b'\n' {
            nb -= 1;
        }

        let (mut b, b2, bottom) = match border {
            Border::None => (Edges::empty(), Edges::empty(), false),
            Border::Frame => (
                Edges::LEFT | Edges::RIGHT | Edges::TOP,
                Edges::LEFT | Edges::RIGHT,
                true,
            ),
            Border::Edges(edges) => {
                let sides = edges & (Edges::LEFT | Edges::RIGHT);
                (sides | (edges & Edges::TOP), sides, edges.contains(Edges::BOTTOM))
            }
        };
        let bordered = border != Border::None;

        let mut sep: Option<usize> = None;
        let mut i = 0;
        let mut j = 0;
        let mut l = 0.0;
        let mut ls = 0.0;
        let mut ns = 0;
        let mut nl = 1;
        while i < nb {
            let c = s[i];
            if c == b'\n' {
                self.suspend_word_spacing()?;
                self.place_cell(w, h, &s[j..i], &cw[j..i], Border::Edges(b), Advance::Below, align, fill)?;
                i += 1;
                sep = None;
                j = i;
                l = 0.0;
                ns = 0;
                nl += 1;
                if bordered && nl == 2 {
                    b = b2;
                }
                continue;
            }
            if c == b' ' {
                sep = Some(i);
                ls = l;
                ns += 1;
            }
            l += cw[i] as f64;
            if l > wmax {
                match sep {
                    None => {
                        if i == j {
                            i += 1;
                        }
                        self.suspend_word_spacing()?;
                        self.place_cell(w, h, &s[j..i], &cw[j..i], Border::Edges(b), Advance::Below, align, fill)?;
                    }
                    Some(sep) => {
                        if align == TextAlign::Justified {
                            self.ws = if ns > 1 {
                                (wmax - ls) / 1000.0 * self.font_size / (ns - 1) as f64
                            } else {
                                0.0
                            };
                            self.out(format!("{:.3} Tw", self.ws * self.k))?;
                        }
                        self.place_cell(w, h, &s[j..sep], &cw[j..sep], Border::Edges(b), Advance::Below, align, fill)?;
                        i = sep + 1;
                    }
                }
                sep = None;
                j = i;
                l = 0.0;
                ns = 0;
                nl += 1;
                if bordered && nl == 2 {
                    b = b2;
                }
            } else {
                i += 1;
            }
        }

        self.suspend_word_spacing()?;
        if bottom {
            b |= Edges::BOTTOM;
        }
        self.place_cell(w, h, &s[j..i], &cw[j..i], Border::Edges(b), Advance::Below, align, fill)?;
        self.x = self.margins.left;
        Ok(())
    }

    fn suspend_word_spacing(&mut self) -> Result<()> {
        if self.ws > 0.0 {
            self.ws = 0.0;
            self.out("0 Tw")?;
        }
        Ok(())
    }

    /// Print a string with its baseline origin at (x, y)
    pub fn text(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        self.ensure_page_open()?;
        let encoded = self.encode_text(text)?;
        let mut op = self.page_space().show_text(x, y, &escape(&encoded.bytes));
        if self.underline && !encoded.bytes.is_empty() {
            op.push(b' ');
            op.extend(
                self.underline_operator(x, y, &encoded.bytes, &encoded.widths)?
                    .into_bytes(),
            );
        }
        if self.color_flag {
            let mut wrapped = format!("q {} ", self.text_color).into_bytes();
            wrapped.extend(op);
            wrapped.extend_from_slice(b" Q");
            op = wrapped;
        }
        self.out(op)
    }

    /// Line break: back to the left margin and down by `h`, or by the height
    /// of the last cell
    pub fn ln(&mut self, h: Option<f64>) -> Result<()> {
        self.ensure_not_closed()?;
        self.x = self.margins.left;
        self.y += h.unwrap_or(self.lasth);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Color;

    fn doc_in_points() -> Document {
        // 100 x 200 pt page with 28.35 pt margins
        let mut doc = Document::new("P", "pt", (100.0, 200.0)).unwrap();
        doc.add_page().unwrap();
        doc.set_cell_margin(2.0).unwrap();
        doc.set_font("courier", "", 10.0).unwrap();
        doc
    }

    fn content(doc: &Document) -> String {
        String::from_utf8_lossy(doc.pages().last().unwrap().content()).into_owned()
    }

    fn last_line(doc: &Document) -> String {
        content(doc).lines().last().unwrap_or_default().to_string()
    }

    #[test]
    fn test_border_parsing() {
        assert_eq!("".parse::<Border>().unwrap(), Border::None);
        assert_eq!("0".parse::<Border>().unwrap(), Border::None);
        assert_eq!("1".parse::<Border>().unwrap(), Border::Frame);
        assert_eq!(
            "LTb".parse::<Border>().unwrap(),
            Border::Edges(Edges::LEFT | Edges::TOP | Edges::BOTTOM)
        );
        assert!(matches!(
            "LX".parse::<Border>(),
            Err(PdfError::Configuration(_))
        ));
    }

    #[test]
    fn test_plain_text_cell() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(50.0, 10.0).text("Hi")).unwrap();

        // baseline = 20 + 5 + 3 = 28 -> 172 from the bottom
        assert_eq!(last_line(&doc), "BT 12.00 172.00 Td (Hi) Tj ET");
        assert_eq!(doc.get_x(), 60.0);
        assert_eq!(doc.get_y(), 20.0);
    }

    #[test]
    fn test_unencodable_text_aligns_with_zero_width() {
        let mut doc = doc_in_points();
        doc.set_cell_margin(0.0).unwrap();
        assert_eq!(doc.get_string_width("Ω").unwrap(), 0.0);

        doc.set_xy(0.0, 20.0).unwrap();
        doc.cell(Cell::new(100.0, 10.0).text("Ω").align(TextAlign::Right))
            .unwrap();
        assert_eq!(last_line(&doc), "BT 100.00 172.00 Td (?) Tj ET");

        doc.set_xy(0.0, 20.0).unwrap();
        doc.cell(Cell::new(100.0, 10.0).text("aΩ").align(TextAlign::Center))
            .unwrap();
        // only "a" counts: (100 - 6) / 2
        assert_eq!(last_line(&doc), "BT 47.00 172.00 Td (a?) Tj ET");
    }

    #[test]
    fn test_alignment_offsets() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        // "abcd" is 24 pt wide in 10 pt Courier
        doc.cell(Cell::new(50.0, 10.0).text("abcd").align(TextAlign::Right))
            .unwrap();
        assert!(last_line(&doc).starts_with("BT 34.00 "));

        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(50.0, 10.0).text("abcd").align(TextAlign::Center))
            .unwrap();
        assert!(last_line(&doc).starts_with("BT 23.00 "));
    }

    #[test]
    fn test_frame_and_fill() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(30.0, 10.0).border(Border::Frame).fill(true))
            .unwrap();
        assert_eq!(last_line(&doc), "10.00 180.00 30.00 -10.00 re B ");

        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(30.0, 10.0).fill(true)).unwrap();
        assert_eq!(last_line(&doc), "10.00 180.00 30.00 -10.00 re f ");

        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(30.0, 10.0).border(Border::Frame)).unwrap();
        assert_eq!(last_line(&doc), "10.00 180.00 30.00 -10.00 re S ");
    }

    #[test]
    fn test_partial_edges() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(30.0, 10.0).border("LB".parse().unwrap()))
            .unwrap();
        assert_eq!(
            last_line(&doc),
            "10.00 180.00 m 10.00 170.00 l S 10.00 170.00 m 40.00 170.00 l S "
        );
    }

    #[test]
    fn test_zero_width_extends_to_margin() {
        let mut doc = doc_in_points();
        doc.set_x(30.0).unwrap();
        doc.cell(Cell::new(0.0, 10.0)).unwrap();
        assert!((doc.get_x() - (100.0 - 28.35)).abs() < 1e-9);
    }

    #[test]
    fn test_advance_modes() {
        let mut doc = doc_in_points();
        doc.set_xy(40.0, 50.0).unwrap();
        doc.cell(Cell::new(10.0, 5.0).advance(Advance::Below)).unwrap();
        assert_eq!((doc.get_x(), doc.get_y()), (40.0, 55.0));
        doc.cell(Cell::new(10.0, 5.0).advance(Advance::NextLine)).unwrap();
        assert_eq!((doc.get_x(), doc.get_y()), (28.35, 60.0));
    }

    #[test]
    fn test_escaping_in_cell() {
        let mut doc = doc_in_points();
        doc.cell(Cell::new(50.0, 10.0).text("a(b)\\c")).unwrap();
        assert!(last_line(&doc).contains("(a\\(b\\)\\\\c) Tj"));
    }

    #[test]
    fn test_text_without_font() {
        let mut doc = Document::new("P", "pt", "A4").unwrap();
        doc.add_page().unwrap();
        assert!(matches!(
            doc.cell(Cell::new(10.0, 10.0).text("x")),
            Err(PdfError::NoFontSelected)
        ));
        // An empty cell needs no font
        doc.cell(Cell::new(10.0, 10.0).border(Border::Frame)).unwrap();
    }

    #[test]
    fn test_color_wrapping_and_underline() {
        let mut doc = doc_in_points();
        doc.set_text_color((255, 0, 0)).unwrap();
        doc.set_font("courier", "U", 10.0).unwrap();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.cell(Cell::new(50.0, 10.0).text("ab")).unwrap();
        assert_eq!(
            last_line(&doc),
            "q 1.000 0.000 0.000 rg BT 12.00 172.00 Td (ab) Tj ET 12.00 171.00 12.00 -0.50 re f Q"
        );
    }

    #[test]
    fn test_unencodable_text_is_replaced() {
        let mut doc = doc_in_points();
        doc.cell(Cell::new(50.0, 10.0).text("Ωx")).unwrap();
        assert!(last_line(&doc).contains("(?x) Tj"));
    }

    #[test]
    fn test_text_at_position() {
        let mut doc = doc_in_points();
        doc.text(10.0, 20.0, "Hey").unwrap();
        assert_eq!(last_line(&doc), "BT 10.00 180.00 Td (Hey) Tj ET");

        doc.set_text_color(Color::gray(128)).unwrap();
        doc.text(10.0, 20.0, "Hey").unwrap();
        assert_eq!(last_line(&doc), "q 0.502 g BT 10.00 180.00 Td (Hey) Tj ET Q");
    }

    #[test]
    fn test_ln() {
        let mut doc = doc_in_points();
        doc.set_xy(50.0, 30.0).unwrap();
        doc.cell(Cell::new(10.0, 7.0)).unwrap();
        doc.ln(None).unwrap();
        assert_eq!((doc.get_x(), doc.get_y()), (28.35, 37.0));
        doc.ln(Some(3.0)).unwrap();
        assert_eq!(doc.get_y(), 40.0);
    }

    #[test]
    fn test_multi_cell_explicit_breaks() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.multi_cell(60.0, 10.0, "one\ntwo\n", Border::None, TextAlign::Left, false)
            .unwrap();
        let content = content(&doc);
        assert!(content.contains("(one) Tj"));
        assert!(content.contains("(two) Tj"));
        assert_eq!(doc.get_y(), 40.0);
        assert_eq!(doc.get_x(), 28.35);
    }

    #[test]
    fn test_multi_cell_wraps_at_spaces() {
        let mut doc = doc_in_points();
        doc.set_cell_margin(0.0).unwrap();
        doc.set_xy(0.0, 0.0).unwrap();
        // 6 pt per character: 5 characters per 30 pt line
        doc.multi_cell(30.0, 10.0, "aa bb cc", Border::None, TextAlign::Left, false)
            .unwrap();
        let content = content(&doc);
        assert!(content.contains("(aa bb) Tj"));
        assert!(content.contains("(cc) Tj"));
        assert_eq!(doc.get_y(), 20.0);
    }

    #[test]
    fn test_multi_cell_breaks_long_words() {
        let mut doc = doc_in_points();
        doc.set_cell_margin(0.0).unwrap();
        doc.set_xy(0.0, 0.0).unwrap();
        doc.multi_cell(30.0, 10.0, "abcdefghij", Border::None, TextAlign::Left, false)
            .unwrap();
        let content = content(&doc);
        assert!(content.contains("(abcde) Tj"));
        assert!(content.contains("(fghij) Tj"));
    }

    #[test]
    fn test_multi_cell_justified_spacing() {
        let mut doc = doc_in_points();
        doc.set_cell_margin(0.0).unwrap();
        doc.set_xy(0.0, 0.0).unwrap();
        doc.multi_cell(42.0, 10.0, "a b c dd ee", Border::None, TextAlign::Justified, false)
            .unwrap();
        let content = content(&doc);
        // First line "a b c" is 30 pt, leaving 12 pt over 2 gaps
        assert!(content.contains("6.000 Tw\n"));
        assert!(content.contains("(a b c) Tj"));
        assert!(content.contains("\n0 Tw\n"));
        assert_eq!(doc.ws, 0.0);
    }

    #[test]
    fn test_multi_cell_frame_borders() {
        let mut doc = doc_in_points();
        doc.set_xy(10.0, 20.0).unwrap();
        doc.multi_cell(40.0, 10.0, "x\ny", Border::Frame, TextAlign::Left, false)
            .unwrap();
        let content = content(&doc);
        let lines: Vec<&str> = content.lines().collect();
        let n = lines.len();
        // First line: left, top, right
        assert!(lines[n - 2].starts_with(
            "10.00 180.00 m 10.00 170.00 l S 10.00 180.00 m 50.00 180.00 l S 50.00 180.00 m 50.00 170.00 l S "
        ));
        // Last line: left, right, bottom
        assert!(lines[n - 1].starts_with(
            "10.00 170.00 m 10.00 160.00 l S 50.00 170.00 m 50.00 160.00 l S 10.00 160.00 m 50.00 160.00 l S "
        ));
    }
}
