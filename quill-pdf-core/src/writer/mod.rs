//! PDF writing functionality

mod finalizer;
mod pdf_writer;
mod xref;

pub use finalizer::DocumentFinalizer;
pub use pdf_writer::{encode_text_string, format_pdf_date, PdfWriter, WriterConfig};
pub use xref::{ObjectAllocator, PAGES_ROOT, RESOURCES};
