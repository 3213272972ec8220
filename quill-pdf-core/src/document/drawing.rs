use super::Document;
use crate::error::Result;
use crate::graphics::{Color, PageSpace, RectStyle};

impl Document {
    pub(crate) fn page_space(&self) -> PageSpace {
        PageSpace::new(self.k, self.h)
    }

    /// Color for lines and borders
    pub fn set_draw_color(&mut self, color: impl Into<Color>) -> Result<()> {
        self.ensure_not_closed()?;
        self.draw_color = color.into().stroke_operator();
        if self.page_no() > 0 {
            self.out(self.draw_color.clone())?;
        }
        Ok(())
    }

    /// Color for filled areas
    pub fn set_fill_color(&mut self, color: impl Into<Color>) -> Result<()> {
        self.ensure_not_closed()?;
        self.fill_color = color.into().fill_operator();
        self.color_flag = self.fill_color != self.text_color;
        if self.page_no() > 0 {
            self.out(self.fill_color.clone())?;
        }
        Ok(())
    }

    /// Color for text. Takes effect at the next text operation.
    pub fn set_text_color(&mut self, color: impl Into<Color>) -> Result<()> {
        self.ensure_not_closed()?;
        self.text_color = color.into().fill_operator();
        self.color_flag = self.fill_color != self.text_color;
        Ok(())
    }

    pub fn set_line_width(&mut self, width: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.line_width = width;
        if self.page_no() > 0 {
            self.out(format!("{:.2} w", width * self.k))?;
        }
        Ok(())
    }

    /// Extra space added to every space character, in user units
    pub fn set_word_spacing(&mut self, spacing: f64) -> Result<()> {
        self.ensure_not_closed()?;
        self.ws = spacing;
        if self.page_no() > 0 {
            self.out(format!("{:.3} Tw", spacing * self.k))?;
        }
        Ok(())
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ensure_page_open()?;
        let op = self.page_space().line(x1, y1, x2, y2);
        self.out(op)
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) -> Result<()> {
        self.ensure_page_open()?;
        let op = self.page_space().rect(x, y, w, h, style.operator());
        self.out(op)
    }
}
