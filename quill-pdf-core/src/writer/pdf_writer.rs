use super::xref::ObjectAllocator;
use crate::error::Result;
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::text::escape;
use chrono::{DateTime, Utc};
use std::io::Write;

/// Serialization settings
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Version written in the `%PDF-` header
    pub pdf_version: String,
    /// Flate-compress page content and CMap streams
    pub compress_streams: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            pdf_version: "1.3".to_string(),
            compress_streams: false,
        }
    }
}

/// Writes PDF objects to `W`, tracking byte positions for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    allocator: ObjectAllocator,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            allocator: ObjectAllocator::new(),
            current_position: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.current_position
    }

    pub fn allocator(&self) -> &ObjectAllocator {
        &self.allocator
    }

    pub fn write_header(&mut self, version: &str) -> Result<()> {
        self.write_bytes(format!("%PDF-{version}\n").as_bytes())?;
        // Binary comment to ensure file is treated as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write `object` under the next free object number
    pub fn write_object(&mut self, object: &Object) -> Result<ObjectId> {
        let id = self.allocator.allocate_object_number();
        self.write_object_with_id(id, object)?;
        Ok(id)
    }

    /// Write `object` under a reserved number (pages root, resources)
    pub fn write_reserved_object(&mut self, number: u32, object: &Object) -> Result<ObjectId> {
        let id = ObjectId::from(number);
        self.write_object_with_id(id, object)?;
        Ok(id)
    }

    /// Write a stream object, compressing it first when asked to
    pub fn write_stream(&mut self, data: Vec<u8>, compress: bool) -> Result<ObjectId> {
        let mut stream = Stream::new(data);
        if compress {
            stream.compress_flate()?;
        }
        self.write_object(&stream.into_object())
    }

    fn write_object_with_id(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        self.allocator.record_offset(id, self.current_position);
        tracing::trace!(object = id.number(), offset = self.current_position, "writing object");

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { &b"true"[..] } else { &b"false"[..] })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                self.write_bytes(&escape(&encode_text_string(s)))?;
                self.write_bytes(b")")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => self.write_dictionary(dict)?,
            Object::Stream(dict, data) => {
                self.write_dictionary(dict)?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => self.write_bytes(id.to_string().as_bytes())?,
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &Dictionary) -> Result<()> {
        self.write_bytes(b"<<")?;
        for (key, value) in dict.entries() {
            self.write_bytes(b"\n/")?;
            self.write_bytes(key.as_bytes())?;
            self.write_bytes(b" ")?;
            self.write_object_value(value)?;
        }
        self.write_bytes(b"\n>>")?;
        Ok(())
    }

    /// Write the xref section and return the offset of the `xref` keyword
    pub fn write_xref(&mut self) -> Result<u64> {
        let xref_position = self.current_position;
        let table = self.allocator.xref_table()?;
        self.write_bytes(table.as_bytes())?;
        Ok(xref_position)
    }

    pub fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", (self.allocator.max_object_number() + 1) as i64);
        trailer.set("Root", catalog_id);
        trailer.set("Info", info_id);

        self.write_bytes(b"trailer\n")?;
        self.write_dictionary(&trailer)?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Shortest decimal form with at most 6 fractional digits
fn format_real(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Text strings are written as-is when ASCII, otherwise as UTF-16BE with a BOM
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Format a DateTime as a PDF date string (D:YYYYMMDDHHmmSSOHH'mm)
pub fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");

    // For UTC, the offset is always +00'00
    format!("{formatted}+00'00")
}
