//! A ready-made [`PageDecorator`] printing one templated line at the top or
//! bottom of every page.

use crate::document::{Advance, Cell, Document, PageDecorator};
use crate::error::Result;
use crate::text::TextAlign;
use chrono::Local;
use std::collections::HashMap;

/// Which page edge the line is printed at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderFooterPosition {
    Header,
    Footer,
}

/// Font, alignment and placement of a [`HeaderFooter`] line
#[derive(Debug, Clone)]
pub struct HeaderFooterOptions {
    /// Font family
    pub family: String,
    /// Font style (`B`, `I`, `U` or a combination)
    pub style: String,
    /// Font size in points
    pub font_size: f64,
    pub alignment: TextAlign,
    /// Distance of the text line from the page edge in points
    pub margin: f64,
    /// `strftime` pattern for `{{date}}`, `%Y-%m-%d` when unset
    pub date_format: Option<String>,
}

impl Default for HeaderFooterOptions {
    fn default() -> Self {
        Self {
            family: "helvetica".to_string(),
            style: String::new(),
            font_size: 10.0,
            alignment: TextAlign::Center,
            margin: 36.0, // 0.5 inch
            date_format: None,
        }
    }
}

/// Templated page header or footer.
///
/// Install it with [`Document::set_page_decorator`]; pair a header and a
/// footer with a tuple.
#[derive(Debug, Clone)]
pub struct HeaderFooter {
    position: HeaderFooterPosition,
    content: String,
    options: HeaderFooterOptions,
    custom_values: HashMap<String, String>,
}

impl HeaderFooter {
    /// Header printed from the `header` hook.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quill_pdf::text::HeaderFooter;
    ///
    /// let header = HeaderFooter::new_header("Annual Report {{year}}");
    /// ```
    pub fn new_header(content: impl Into<String>) -> Self {
        Self::new(HeaderFooterPosition::Header, content)
    }

    /// Footer printed from the `footer` hook.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quill_pdf::text::HeaderFooter;
    ///
    /// let footer = HeaderFooter::new_footer("Page {{page_number}} of {{total_pages}}");
    /// ```
    pub fn new_footer(content: impl Into<String>) -> Self {
        Self::new(HeaderFooterPosition::Footer, content)
    }

    fn new(position: HeaderFooterPosition, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            options: HeaderFooterOptions::default(),
            custom_values: HashMap::new(),
        }
    }

    pub fn with_options(mut self, options: HeaderFooterOptions) -> Self {
        self.options = options;
        self
    }

    /// Font used for the line. The document font is restored by the hook caller.
    pub fn with_font(mut self, family: impl Into<String>, style: impl Into<String>, size: f64) -> Self {
        self.options.family = family.into();
        self.options.style = style.into();
        self.options.font_size = size;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.options.alignment = alignment;
        self
    }

    /// Distance from the page edge, in points
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.options.margin = margin;
        self
    }

    /// Adds a `{{key}}` placeholder with a fixed value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_values.insert(key.into(), value.into());
        self
    }

    pub fn position(&self) -> HeaderFooterPosition {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &HeaderFooterOptions {
        &self.options
    }

    /// Expand the template for one page.
    ///
    /// Placeholders:
    /// - `{{page_number}}`
    /// - `{{total_pages}}`: `total_pages` as given, usually the page-count alias
    /// - `{{date}}`, `{{time}}`, `{{year}}`: local clock
    /// - any key added with [`with_value`](Self::with_value)
    pub fn render(&self, page_number: usize, total_pages: &str) -> String {
        let now = Local::now();
        let date_format = self.options.date_format.as_deref().unwrap_or("%Y-%m-%d");
        let builtin = [
            ("page_number", page_number.to_string()),
            ("total_pages", total_pages.to_string()),
            ("year", now.format("%Y").to_string()),
            ("date", now.format(date_format).to_string()),
            ("time", now.format("%H:%M:%S").to_string()),
        ];

        let custom = self.custom_values.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        builtin
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(custom)
            .fold(self.content.clone(), |text, (key, value)| {
                text.replace(&format!("{{{{{key}}}}}"), value)
            })
    }

    fn draw(&self, doc: &mut Document) -> Result<()> {
        // The page-count alias is resolved once the document is closed
        let total = match doc.alias_nb_pages() {
            Some(alias) => alias.to_string(),
            None => doc.page_no().to_string(),
        };
        let text = self.render(doc.page_no(), &total);

        let k = doc.scale_factor();
        let margin = self.options.margin / k;
        let height = self.options.font_size * 1.5 / k;
        doc.set_font(&self.options.family, &self.options.style, self.options.font_size)?;
        let y = match self.position {
            HeaderFooterPosition::Header => margin - height / 2.0,
            HeaderFooterPosition::Footer => -margin - height / 2.0,
        };
        doc.set_y(y)?;
        doc.cell(
            Cell::new(0.0, height)
                .text(text)
                .align(self.options.alignment)
                .advance(Advance::NextLine),
        )
    }
}

impl PageDecorator for HeaderFooter {
    fn header(&mut self, doc: &mut Document) -> Result<()> {
        match self.position {
            HeaderFooterPosition::Header => self.draw(doc),
            HeaderFooterPosition::Footer => Ok(()),
        }
    }

    fn footer(&mut self, doc: &mut Document) -> Result<()> {
        match self.position {
            HeaderFooterPosition::Footer => self.draw(doc),
            HeaderFooterPosition::Header => Ok(()),
        }
    }
}
