//! Per-document font resources.
//!
//! Each distinct (family, style) pair gets one [`FontEntry`] with a 1-based
//! resource index in order of first use. The PDF object numbers behind those
//! indexes are only known at finalize time and are kept in a separate
//! [`FontObjectTable`].

use super::font_metrics::{CoreFontMetrics, FontMetrics, FontMetricsProvider};
use crate::error::{PdfError, Result};
use crate::objects::ObjectId;
use crate::text::TextEncoding;
use std::collections::HashMap;
use std::fmt;

/// Families every viewer provides without embedding
pub const CORE_FAMILIES: [&str; 5] = ["courier", "helvetica", "times", "symbol", "zapfdingbats"];

/// Normalized style: uppercase, `U` removed, `IB` reordered to `BI`.
/// Returns the style and whether underlining was requested.
pub fn normalize_style(style: &str) -> (String, bool) {
    let upper = style.to_uppercase();
    let underline = upper.contains('U');
    let mut style: String = upper.chars().filter(|c| *c != 'U').collect();
    if style == "IB" {
        style = "BI".to_string();
    }
    (style, underline)
}

pub fn font_key(family: &str, style: &str) -> String {
    format!("{family}{style}").to_lowercase()
}

/// A registered font
pub struct FontEntry {
    key: String,
    family: String,
    style: String,
    index: usize,
    metrics: FontMetrics,
    encoding: TextEncoding,
}

impl FontEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Resource index, referenced as `/F<index>` in content streams
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display_name(&self) -> &str {
        &self.metrics.display_name
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn text_encoding(&self) -> &TextEncoding {
        &self.encoding
    }

    /// Key under which this font's ToUnicode CMap is shared
    pub fn cmap_key(&self) -> &str {
        self.metrics
            .encoding
            .as_deref()
            .unwrap_or(&self.metrics.display_name)
    }

    /// Advance width of a character in 1/1000 of the font size.
    /// Characters the font cannot encode have no width.
    pub fn char_width(&self, ch: char) -> u16 {
        self.encoding
            .encode_char(ch)
            .map(|code| self.metrics.char_width(code))
            .unwrap_or(0)
    }
}

impl fmt::Debug for FontEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontEntry")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("name", &self.metrics.display_name)
            .finish()
    }
}

/// Outcome of resolving a font request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub family: String,
    pub style: String,
    pub index: usize,
}

pub struct FontRegistry {
    entries: Vec<FontEntry>,
    by_key: HashMap<String, usize>,
    provider: Box<dyn FontMetricsProvider>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::with_provider(Box::new(CoreFontMetrics))
    }

    pub fn with_provider(provider: Box<dyn FontMetricsProvider>) -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
            provider,
        }
    }

    /// Find or register the font for a normalized family and style.
    ///
    /// `arial` is an alias of `helvetica`; Symbol and ZapfDingbats have no
    /// styled variants, so their style is dropped.
    pub fn resolve(&mut self, family: &str, style: &str) -> Result<ResolvedFont> {
        let key = font_key(family, style);
        if let Some(&position) = self.by_key.get(&key) {
            return Ok(self.resolved_at(position));
        }

        let mut family = family.to_lowercase();
        let mut style = style.to_string();
        if family == "arial" {
            family = "helvetica".to_string();
        }
        if !CORE_FAMILIES.contains(&family.as_str()) {
            return Err(PdfError::UndefinedFont { family, style });
        }
        if family == "symbol" || family == "zapfdingbats" {
            style.clear();
        }

        let key = font_key(&family, &style);
        if let Some(&position) = self.by_key.get(&key) {
            return Ok(self.resolved_at(position));
        }
        let position = self.register(&key, &family, &style)?;
        Ok(self.resolved_at(position))
    }

    fn register(&mut self, key: &str, family: &str, style: &str) -> Result<usize> {
        let metrics = self
            .provider
            .get_font(key)
            .ok_or_else(|| PdfError::UndefinedFont {
                family: family.to_string(),
                style: style.to_string(),
            })?;
        let encoding = TextEncoding::from_mapping(&metrics.unicode_map, metrics.encoding.is_none());
        let position = self.entries.len();
        let index = position + 1;

        tracing::debug!(key, index, name = %metrics.display_name, "registered font");

        self.entries.push(FontEntry {
            key: key.to_string(),
            family: family.to_string(),
            style: style.to_string(),
            index,
            metrics,
            encoding,
        });
        self.by_key.insert(key.to_string(), position);
        Ok(position)
    }

    fn resolved_at(&self, position: usize) -> ResolvedFont {
        let entry = &self.entries[position];
        ResolvedFont {
            family: entry.family.clone(),
            style: entry.style.clone(),
            index: entry.index,
        }
    }

    pub fn get(&self, key: &str) -> Option<&FontEntry> {
        self.by_key.get(key).map(|&position| &self.entries[position])
    }

    pub fn by_index(&self, index: usize) -> Option<&FontEntry> {
        index.checked_sub(1).and_then(|position| self.entries.get(position))
    }

    /// Entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &FontEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

/// Font index to object number, produced once while the font objects are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontObjectTable {
    objects: Vec<(usize, ObjectId)>,
}

impl FontObjectTable {
    pub(crate) fn from_pairs(objects: Vec<(usize, ObjectId)>) -> Self {
        Self { objects }
    }

    pub fn object_for(&self, index: usize) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, ObjectId)> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_style() {
        assert_eq!(normalize_style(""), (String::new(), false));
        assert_eq!(normalize_style("b"), ("B".to_string(), false));
        assert_eq!(normalize_style("IB"), ("BI".to_string(), false));
        assert_eq!(normalize_style("ibu"), ("BI".to_string(), true));
        assert_eq!(normalize_style("U"), (String::new(), true));
        assert_eq!(normalize_style("BI"), ("BI".to_string(), false));
    }

    #[test]
    fn test_font_key() {
        assert_eq!(font_key("helvetica", "I"), "helveticai");
        assert_eq!(font_key("times", ""), "times");
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut registry = FontRegistry::new();
        let first = registry.resolve("helvetica", "B").unwrap();
        let second = registry.resolve("helvetica", "B").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.index, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_indexes_follow_first_use() {
        let mut registry = FontRegistry::new();
        assert_eq!(registry.resolve("times", "").unwrap().index, 1);
        assert_eq!(registry.resolve("courier", "").unwrap().index, 2);
        assert_eq!(registry.resolve("times", "").unwrap().index, 1);
        assert_eq!(registry.resolve("helvetica", "I").unwrap().index, 3);

        let keys: Vec<&str> = registry.iter().map(FontEntry::key).collect();
        assert_eq!(keys, vec!["times", "courier", "helveticai"]);
    }

    #[test]
    fn test_arial_is_helvetica() {
        let mut registry = FontRegistry::new();
        let helvetica = registry.resolve("helvetica", "").unwrap();
        let arial = registry.resolve("arial", "").unwrap();

        assert_eq!(arial.family, "helvetica");
        assert_eq!(arial.index, helvetica.index);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("arial").is_none());
    }

    #[test]
    fn test_symbol_ignores_style() {
        let mut registry = FontRegistry::new();
        let symbol = registry.resolve("symbol", "B").unwrap();
        assert_eq!(symbol.style, "");
        assert_eq!(registry.get("symbol").unwrap().display_name(), "Symbol");
        let plain = registry.resolve("symbol", "").unwrap();
        assert_eq!(plain.index, symbol.index);
    }

    #[test]
    fn test_unknown_family() {
        let mut registry = FontRegistry::new();
        match registry.resolve("comic", "B") {
            Err(PdfError::UndefinedFont { family, style }) => {
                assert_eq!(family, "comic");
                assert_eq!(style, "B");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_provider_without_font_is_undefined() {
        struct Empty;
        impl FontMetricsProvider for Empty {
            fn get_font(&self, _font_key: &str) -> Option<FontMetrics> {
                None
            }
        }

        let mut registry = FontRegistry::with_provider(Box::new(Empty));
        assert!(matches!(
            registry.resolve("times", ""),
            Err(PdfError::UndefinedFont { .. })
        ));
    }

    #[test]
    fn test_entry_widths() {
        let mut registry = FontRegistry::new();
        let resolved = registry.resolve("helvetica", "").unwrap();
        let entry = registry.by_index(resolved.index).unwrap();

        assert_eq!(entry.char_width('A'), 667);
        assert_eq!(entry.char_width('€'), 556);
        // Not representable in cp1252
        assert_eq!(entry.char_width('Ω'), 0);
        assert_eq!(entry.cmap_key(), "cp1252");
    }

    #[test]
    fn test_cmap_key_of_builtin_fonts() {
        let mut registry = FontRegistry::new();
        registry.resolve("zapfdingbats", "").unwrap();
        let entry = registry.get("zapfdingbats").unwrap();
        assert_eq!(entry.cmap_key(), "ZapfDingbats");
    }

    #[test]
    fn test_by_index_bounds() {
        let mut registry = FontRegistry::new();
        registry.resolve("courier", "").unwrap();
        assert!(registry.by_index(0).is_none());
        assert!(registry.by_index(1).is_some());
        assert!(registry.by_index(2).is_none());
    }

    #[test]
    fn test_font_object_table() {
        let table = FontObjectTable::from_pairs(vec![(1, ObjectId::from(7)), (2, ObjectId::from(9))]);
        assert_eq!(table.object_for(2), Some(ObjectId::from(9)));
        assert_eq!(table.object_for(3), None);
    }
}
