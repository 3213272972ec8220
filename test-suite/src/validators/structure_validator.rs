//! File Structure Validator
//!
//! Reads back the object layout of a generated file: header, objects,
//! cross-reference table and trailer. Only the subset of the format the
//! writer produces is understood.

use anyhow::{anyhow, bail, Context, Result};
use regex::bytes::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid pattern"))
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\A%PDF-(\d\.\d)\n")
}

fn startxref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"startxref\n(\d+)\n%%EOF\n\z")
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(\d+) 0 R")
}

fn integer_entry(dict: &str, key: &str) -> Option<u64> {
    let pattern = format!(r"/{key} (\d+)");
    let re = regex::Regex::new(&pattern).ok()?;
    re.captures(dict)?.get(1)?.as_str().parse().ok()
}

fn reference_entry(dict: &str, key: &str) -> Option<u32> {
    let pattern = format!(r"/{key} (\d+) 0 R");
    let re = regex::Regex::new(&pattern).ok()?;
    re.captures(dict)?.get(1)?.as_str().parse().ok()
}

/// One indirect object
#[derive(Debug, Clone)]
pub struct PdfObject {
    pub number: u32,
    pub offset: usize,
    /// Dictionary (or other direct value) text, lossily decoded
    pub dict: String,
    /// Raw stream data, still encoded
    pub stream: Option<Vec<u8>>,
}

impl PdfObject {
    pub fn is_compressed(&self) -> bool {
        self.dict.contains("/Filter /FlateDecode")
    }

    /// Stream data with filters removed
    pub fn decoded_stream(&self) -> Result<Option<Vec<u8>>> {
        match &self.stream {
            Some(data) if self.is_compressed() => {
                let decoded = quill_pdf::compression::decompress(data)
                    .with_context(|| format!("Failed to inflate object {}", self.number))?;
                Ok(Some(decoded))
            }
            Some(data) => Ok(Some(data.clone())),
            None => Ok(None),
        }
    }
}

/// A generated file split into its parts
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    pub version: String,
    pub xref_offset: usize,
    /// Objects in number order, starting at 1
    pub objects: Vec<PdfObject>,
    pub trailer: String,
    pub root: u32,
    pub info: Option<u32>,
    pub size: u64,
}

impl ParsedPdf {
    pub fn parse(pdf: &[u8]) -> Result<Self> {
        let version = header_re()
            .captures(pdf)
            .and_then(|c| c.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .ok_or_else(|| anyhow!("Missing %PDF header"))?;

        let xref_offset: usize = startxref_re()
            .captures(pdf)
            .and_then(|c| c.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .ok_or_else(|| anyhow!("Missing startxref or %%EOF"))?
            .parse()?;
        if xref_offset >= pdf.len() {
            bail!("startxref {xref_offset} is past the end of the file");
        }

        let tail = String::from_utf8_lossy(&pdf[xref_offset..]).into_owned();
        let mut lines = tail.split('\n');
        if lines.next() != Some("xref") {
            bail!("startxref does not point at an xref table");
        }
        let subsection = lines.next().unwrap_or_default();
        let count: usize = subsection
            .strip_prefix("0 ")
            .ok_or_else(|| anyhow!("Unexpected xref subsection {subsection:?}"))?
            .parse()?;
        if lines.next() != Some("0000000000 65535 f ") {
            bail!("First xref entry is not the free-list head");
        }

        let mut objects = Vec::with_capacity(count.saturating_sub(1));
        for number in 1..count {
            let entry = lines
                .next()
                .ok_or_else(|| anyhow!("xref table ends before object {number}"))?;
            if entry.len() != 19 || !entry.ends_with(" 00000 n ") {
                bail!("Malformed xref entry for object {number}: {entry:?}");
            }
            let offset: usize = entry[..10].parse()?;
            objects.push(read_object(pdf, number as u32, offset)?);
        }

        if lines.next() != Some("trailer") {
            bail!("Missing trailer after the xref table");
        }
        let trailer: String = lines.take_while(|l| *l != "startxref").collect::<Vec<_>>().join("\n");
        let size = integer_entry(&trailer, "Size").ok_or_else(|| anyhow!("Trailer has no /Size"))?;
        let root = reference_entry(&trailer, "Root").ok_or_else(|| anyhow!("Trailer has no /Root"))?;
        let info = reference_entry(&trailer, "Info");

        Ok(Self {
            version,
            xref_offset,
            objects,
            trailer,
            root,
            info,
            size,
        })
    }

    pub fn object(&self, number: u32) -> Option<&PdfObject> {
        number
            .checked_sub(1)
            .and_then(|index| self.objects.get(index as usize))
    }

    /// Page object numbers, in the order of the pages root's `/Kids`
    pub fn page_numbers(&self) -> Vec<u32> {
        let Some(root) = self.object(1) else {
            return Vec::new();
        };
        let Some(start) = root.dict.find("/Kids [") else {
            return Vec::new();
        };
        let kids = &root.dict[start + 7..];
        let kids = &kids[..kids.find(']').unwrap_or(kids.len())];
        reference_re()
            .captures_iter(kids.as_bytes())
            .filter_map(|c| String::from_utf8_lossy(&c[1]).parse().ok())
            .collect()
    }

    /// Decoded content stream of every page
    pub fn page_contents(&self) -> Result<Vec<Vec<u8>>> {
        self.page_numbers()
            .into_iter()
            .map(|page| {
                let dict = &self
                    .object(page)
                    .ok_or_else(|| anyhow!("Missing page object {page}"))?
                    .dict;
                let contents = reference_entry(dict, "Contents")
                    .ok_or_else(|| anyhow!("Page {page} has no /Contents"))?;
                self.object(contents)
                    .ok_or_else(|| anyhow!("Missing content object {contents}"))?
                    .decoded_stream()?
                    .ok_or_else(|| anyhow!("Object {contents} is not a stream"))
            })
            .collect()
    }

    /// Value of an info dictionary entry, undecoded
    pub fn info_entry(&self, key: &str) -> Option<String> {
        let info = self.object(self.info?)?;
        let marker = format!("/{key} (");
        let start = info.dict.find(&marker)? + marker.len();
        let rest = &info.dict[start..];
        let end = rest.find(")\n")?;
        Some(rest[..end].to_string())
    }
}

fn read_object(pdf: &[u8], number: u32, offset: usize) -> Result<PdfObject> {
    let header = format!("{number} 0 obj\n");
    let body = pdf
        .get(offset..)
        .filter(|rest| rest.starts_with(header.as_bytes()))
        .ok_or_else(|| anyhow!("xref offset {offset} does not point at object {number}"))?;
    let body = &body[header.len()..];

    let end = find(body, b"\nendobj")
        .ok_or_else(|| anyhow!("Object {number} has no endobj"))?;
    let (dict_part, stream) = match find(body, b">>\nstream\n") {
        Some(pos) if pos < end => {
            let dict = String::from_utf8_lossy(&body[..pos + 2]).into_owned();
            let length = integer_entry(&dict, "Length")
                .ok_or_else(|| anyhow!("Stream {number} has no /Length"))? as usize;
            let data_start = pos + ">>\nstream\n".len();
            let data = body
                .get(data_start..data_start + length)
                .ok_or_else(|| anyhow!("Stream {number} is shorter than its /Length"))?;
            if !body[data_start + length..].starts_with(b"\nendstream\nendobj") {
                bail!("Stream {number} does not end at its /Length");
            }
            (dict, Some(data.to_vec()))
        }
        _ => (String::from_utf8_lossy(&body[..end]).into_owned(), None),
    };

    Ok(PdfObject {
        number,
        offset,
        dict: dict_part,
        stream,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Validator for the object layout of a generated file
#[derive(Debug, Default)]
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, pdf: &[u8]) -> Result<StructureReport> {
        let parsed = ParsedPdf::parse(pdf).context("Failed to read file structure")?;
        let mut report = StructureReport {
            version: parsed.version.clone(),
            object_count: parsed.objects.len(),
            page_count: 0,
            errors: Vec::new(),
        };

        if parsed.size != parsed.objects.len() as u64 + 1 {
            report.add_error(format!(
                "/Size {} does not match {} xref entries",
                parsed.size,
                parsed.objects.len() + 1
            ));
        }

        match parsed.object(parsed.root) {
            Some(catalog) => {
                if !catalog.dict.contains("/Type /Catalog") {
                    report.add_error("Root object is not a catalog");
                }
                if !catalog.dict.contains("/Pages 1 0 R") {
                    report.add_error("Catalog does not reference the pages root");
                }
            }
            None => report.add_error(format!("Root object {} does not exist", parsed.root)),
        }

        let pages = parsed.page_numbers();
        report.page_count = pages.len();
        if let Some(root) = parsed.object(1) {
            if !root.dict.contains("/Type /Pages") {
                report.add_error("Object 1 is not the pages root");
            }
            if integer_entry(&root.dict, "Count") != Some(pages.len() as u64) {
                report.add_error("/Count does not match the number of kids");
            }
        }

        let resources = parsed.object(2).map(|o| o.dict.clone()).unwrap_or_default();
        let mut fonts_used = BTreeSet::new();
        for page in &pages {
            let Some(object) = parsed.object(*page) else {
                report.add_error(format!("Page object {page} does not exist"));
                continue;
            };
            if !object.dict.contains("/Type /Page\n") {
                report.add_error(format!("Object {page} is not a page"));
            }
            if !object.dict.contains("/Parent 1 0 R") || !object.dict.contains("/Resources 2 0 R") {
                report.add_error(format!("Page {page} is not linked to the shared tree"));
            }
        }
        for content in parsed.page_contents()? {
            let ops = super::content_validator::tokenize(&content)?;
            for op in ops {
                if let super::ContentOperation::SetFont(name, _) = op {
                    fonts_used.insert(name);
                }
            }
        }
        for font in fonts_used {
            if !resources.contains(&format!("/{font} ")) {
                report.add_error(format!("Font {font} is used but not in the resources"));
            }
        }

        Ok(report)
    }
}

/// Structure validation report
#[derive(Debug)]
pub struct StructureReport {
    pub version: String,
    pub object_count: usize,
    pub page_count: usize,
    pub errors: Vec<String>,
}

impl StructureReport {
    fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
