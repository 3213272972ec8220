//! Serialization of a finished document.
//!
//! Objects are written in a fixed order: pages with their content streams,
//! the pages root (object 1), fonts and their ToUnicode CMaps, the resource
//! dictionary (object 2), the info dictionary and the catalog. Object numbers
//! of later objects are only known once the earlier ones are written.

use super::pdf_writer::{format_pdf_date, PdfWriter, WriterConfig};
use super::xref::{PAGES_ROOT, RESOURCES};
use crate::document::{DisplayMode, DocumentMetadata, MetadataKey, Zoom};
use crate::error::{PdfError, Result};
use crate::fonts::{to_unicode_cmap, FontObjectTable, FontRegistry};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::page::Page;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Everything the finalizer reads from a document
pub struct DocumentFinalizer<'a> {
    pub pages: &'a [Page],
    pub fonts: &'a FontRegistry,
    pub metadata: &'a DocumentMetadata,
    pub display: DisplayMode,
    /// Default media box in points
    pub default_size: (f64, f64),
    pub config: &'a WriterConfig,
    /// Page-count alias token, if one was configured
    pub alias: Option<&'a str>,
    pub creation_date: DateTime<Utc>,
}

impl DocumentFinalizer<'_> {
    /// Serialize the complete file
    pub fn finalize(&self) -> Result<Vec<u8>> {
        let mut writer = PdfWriter::new_with_writer(Vec::new());
        writer.write_header(&self.config.pdf_version)?;

        let page_ids = self.write_pages(&mut writer)?;
        self.write_pages_root(&mut writer, &page_ids)?;
        let font_objects = self.write_fonts(&mut writer)?;
        self.write_resources(&mut writer, &font_objects)?;
        let info_id = self.write_info(&mut writer)?;
        let catalog_id = self.write_catalog(&mut writer, page_ids.first().copied())?;

        let xref_position = writer.write_xref()?;
        writer.write_trailer(catalog_id, info_id, xref_position)?;

        tracing::debug!(
            pages = self.pages.len(),
            fonts = self.fonts.len(),
            objects = writer.allocator().max_object_number(),
            "document finalized"
        );
        writer.into_inner()
    }

    fn write_pages(&self, writer: &mut PdfWriter<Vec<u8>>) -> Result<Vec<ObjectId>> {
        let first = writer.allocator().current() + 1;
        let page_count = self.pages.len().to_string();
        let mut page_ids = Vec::with_capacity(self.pages.len());

        for (i, page) in self.pages.iter().enumerate() {
            // Each page takes two numbers: itself and its content stream
            let expected = first + 2 * i as u32;
            let content_id = ObjectId::from(expected + 1);

            let mut dict = Dictionary::new();
            dict.set("Type", Object::name("Page"));
            dict.set("Parent", ObjectId::from(PAGES_ROOT));
            if let Some((w, h)) = page.size() {
                dict.set("MediaBox", media_box(w, h));
            }
            if let Some(rotation) = page.rotation() {
                dict.set("Rotate", rotation);
            }
            dict.set("Resources", ObjectId::from(RESOURCES));
            dict.set("Contents", content_id);

            let page_id = writer.write_object(&Object::Dictionary(dict))?;
            if page_id.number() != expected {
                return Err(PdfError::InvalidStructure(format!(
                    "page {} was written as object {}, expected {expected}",
                    page.number(),
                    page_id.number()
                )));
            }

            let content = match self.alias {
                Some(alias) => page.content_with_alias(alias, &page_count),
                None => page.content().to_vec(),
            };
            let stream_id = writer.write_stream(content, self.config.compress_streams)?;
            if stream_id != content_id {
                return Err(PdfError::InvalidStructure(format!(
                    "content of page {} was written as object {}",
                    page.number(),
                    stream_id.number()
                )));
            }

            tracing::trace!(page = page.number(), object = expected, "wrote page");
            page_ids.push(page_id);
        }
        Ok(page_ids)
    }

    fn write_pages_root(&self, writer: &mut PdfWriter<Vec<u8>>, page_ids: &[ObjectId]) -> Result<()> {
        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let (w, h) = self.default_size;

        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Pages"));
        dict.set("Kids", kids);
        dict.set("Count", page_ids.len());
        dict.set("MediaBox", media_box(w, h));

        writer.write_reserved_object(PAGES_ROOT, &Object::Dictionary(dict))?;
        Ok(())
    }

    fn write_fonts(&self, writer: &mut PdfWriter<Vec<u8>>) -> Result<FontObjectTable> {
        let mut cmaps: HashMap<String, ObjectId> = HashMap::new();
        let mut objects = Vec::with_capacity(self.fonts.len());

        for font in self.fonts.iter() {
            let metrics = font.metrics();

            let to_unicode = if metrics.unicode_map.is_empty() {
                None
            } else if let Some(id) = cmaps.get(font.cmap_key()) {
                Some(*id)
            } else {
                let cmap = to_unicode_cmap(&metrics.unicode_map);
                let id = writer.write_stream(cmap.into_bytes(), self.config.compress_streams)?;
                cmaps.insert(font.cmap_key().to_string(), id);
                Some(id)
            };

            let mut dict = Dictionary::new();
            dict.set("Type", Object::name("Font"));
            dict.set("BaseFont", Object::name(font.display_name()));
            dict.set("Subtype", Object::name("Type1"));
            if metrics.encoding.is_some() {
                dict.set("Encoding", Object::name("WinAnsiEncoding"));
            }
            if let Some(id) = to_unicode {
                dict.set("ToUnicode", id);
            }

            let id = writer.write_object(&Object::Dictionary(dict))?;
            tracing::trace!(font = font.key(), index = font.index(), object = id.number(), "wrote font");
            objects.push((font.index(), id));
        }
        Ok(FontObjectTable::from_pairs(objects))
    }

    fn write_resources(&self, writer: &mut PdfWriter<Vec<u8>>, fonts: &FontObjectTable) -> Result<()> {
        let proc_set: Vec<Object> = ["PDF", "Text", "ImageB", "ImageC", "ImageI"]
            .into_iter()
            .map(Object::name)
            .collect();

        let mut font_dict = Dictionary::new();
        for (index, id) in fonts.iter() {
            font_dict.set(format!("F{index}"), *id);
        }

        let mut dict = Dictionary::new();
        dict.set("ProcSet", proc_set);
        dict.set("Font", font_dict);

        writer.write_reserved_object(RESOURCES, &Object::Dictionary(dict))?;
        Ok(())
    }

    fn write_info(&self, writer: &mut PdfWriter<Vec<u8>>) -> Result<ObjectId> {
        let mut metadata = self.metadata.clone();
        if !metadata.contains(MetadataKey::Producer) {
            metadata.set(MetadataKey::Producer, format!("quill-pdf {}", crate::VERSION));
        }
        if !metadata.contains(MetadataKey::CreationDate) {
            metadata.set(MetadataKey::CreationDate, format_pdf_date(self.creation_date));
        }

        let info: Dictionary = metadata
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), Object::from(value)))
            .collect();
        writer.write_object(&Object::Dictionary(info))
    }

    fn write_catalog(
        &self,
        writer: &mut PdfWriter<Vec<u8>>,
        first_page: Option<ObjectId>,
    ) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Catalog"));
        dict.set("Pages", ObjectId::from(PAGES_ROOT));

        if let Some(page) = first_page {
            let destination = match self.display.zoom {
                Zoom::Default => None,
                Zoom::FullPage => Some(vec![page.into(), Object::name("Fit")]),
                Zoom::FullWidth => Some(vec![page.into(), Object::name("FitH"), Object::Null]),
                Zoom::Real => Some(vec![
                    page.into(),
                    Object::name("XYZ"),
                    Object::Null,
                    Object::Null,
                    1.into(),
                ]),
                Zoom::Percent(percent) => Some(vec![
                    page.into(),
                    Object::name("XYZ"),
                    Object::Null,
                    Object::Null,
                    (percent / 100.0).into(),
                ]),
            };
            if let Some(destination) = destination {
                dict.set("OpenAction", destination);
            }
        }
        if let Some(layout) = self.display.layout.page_layout() {
            dict.set("PageLayout", Object::name(layout));
        }

        writer.write_object(&Object::Dictionary(dict))
    }
}

fn media_box(width: f64, height: f64) -> Vec<Object> {
    vec![0.into(), 0.into(), round2(width).into(), round2(height).into()]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
