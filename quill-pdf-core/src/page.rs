//! Pages and page margins.

/// Page margins in user units
#[derive(Debug, Clone, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    /// Horizontal padding between a cell border and its text
    pub cell: f64,
}

impl Margins {
    /// Margins of 1 cm, cell padding of 1 mm, expressed for scale factor `k`
    pub fn for_scale(k: f64) -> Self {
        let margin = 28.35 / k;
        Self {
            left: margin,
            top: margin,
            right: margin,
            bottom: 2.0 * margin,
            cell: margin / 10.0,
        }
    }
}

/// One page of the document.
///
/// Content is appended while the page is the current one; once the next page
/// starts, the page is never touched again until finalize.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    number: usize,
    content: Vec<u8>,
    size: Option<(f64, f64)>,
    rotation: Option<i32>,
}

impl Page {
    pub(crate) fn new(number: usize) -> Self {
        Self {
            number,
            content: Vec::new(),
            size: None,
            rotation: None,
        }
    }

    /// 1-based page number
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Media box in points when it differs from the document default
    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    pub fn rotation(&self) -> Option<i32> {
        self.rotation
    }

    pub(crate) fn set_size(&mut self, width_pt: f64, height_pt: f64) {
        self.size = Some((width_pt, height_pt));
    }

    pub(crate) fn set_rotation(&mut self, rotation: i32) {
        self.rotation = Some(rotation);
    }

    /// Append one operator line
    pub(crate) fn append_line(&mut self, operators: &[u8]) {
        self.content.extend_from_slice(operators);
        self.content.push(b'\n');
    }

    /// Content with every occurrence of `alias` replaced
    pub(crate) fn content_with_alias(&self, alias: &str, replacement: &str) -> Vec<u8> {
        replace_all(&self.content, alias.as_bytes(), replacement.as_bytes())
    }
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}
