//! Per-page header and footer callbacks.

use super::Document;
use crate::error::Result;

/// Draws content at page boundaries.
///
/// `header` runs right after a page begins and `footer` right before it
/// ends. Both default to doing nothing. Automatic page breaks are suppressed
/// while either one runs.
pub trait PageDecorator {
    fn header(&mut self, _doc: &mut Document) -> Result<()> {
        Ok(())
    }

    fn footer(&mut self, _doc: &mut Document) -> Result<()> {
        Ok(())
    }
}

/// A header decorator combined with a footer decorator
impl<H: PageDecorator, F: PageDecorator> PageDecorator for (H, F) {
    fn header(&mut self, doc: &mut Document) -> Result<()> {
        self.0.header(doc)?;
        self.1.header(doc)
    }

    fn footer(&mut self, doc: &mut Document) -> Result<()> {
        self.0.footer(doc)?;
        self.1.footer(doc)
    }
}

/// Which hook is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    Header,
    Footer,
}

impl Document {
    /// Install the header/footer callbacks, replacing any previous ones
    pub fn set_page_decorator(&mut self, decorator: impl PageDecorator + 'static) {
        self.decorator = Some(Box::new(decorator));
    }

    pub(crate) fn run_hook(&mut self, hook: Hook) -> Result<()> {
        // The decorator is taken out while it borrows the document
        let Some(mut decorator) = self.decorator.take() else {
            return Ok(());
        };
        let result = match hook {
            Hook::Header => {
                self.in_header = true;
                let result = decorator.header(self);
                self.in_header = false;
                result
            }
            Hook::Footer => {
                self.in_footer = true;
                let result = decorator.footer(self);
                self.in_footer = false;
                result
            }
        };
        if self.decorator.is_none() {
            self.decorator = Some(decorator);
        }
        result
    }
}
