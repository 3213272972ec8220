//! Metrics for the standard 14 Type 1 fonts, looked up by font key.

use super::cmap::UnicodeMapping;
use super::core_widths;
use std::collections::HashMap;

/// Encoding tag of the text fonts
pub const CP1252: &str = "cp1252";

/// Byte code to Unicode table shared by every cp1252 font
pub static CP1252_UNICODE_MAP: &[(u8, UnicodeMapping)] = &[
    (0x00, UnicodeMapping::Range { start: 0x0000, count: 128 }),
    (0x80, UnicodeMapping::Single(0x20AC)),
    (0x82, UnicodeMapping::Single(0x201A)),
    (0x83, UnicodeMapping::Single(0x0192)),
    (0x84, UnicodeMapping::Single(0x201E)),
    (0x85, UnicodeMapping::Single(0x2026)),
    (0x86, UnicodeMapping::Range { start: 0x2020, count: 2 }),
    (0x88, UnicodeMapping::Single(0x02C6)),
    (0x89, UnicodeMapping::Single(0x2030)),
    (0x8A, UnicodeMapping::Single(0x0160)),
    (0x8B, UnicodeMapping::Single(0x2039)),
    (0x8C, UnicodeMapping::Single(0x0152)),
    (0x8E, UnicodeMapping::Single(0x017D)),
    (0x91, UnicodeMapping::Range { start: 0x2018, count: 2 }),
    (0x93, UnicodeMapping::Range { start: 0x201C, count: 2 }),
    (0x95, UnicodeMapping::Single(0x2022)),
    (0x96, UnicodeMapping::Range { start: 0x2013, count: 2 }),
    (0x98, UnicodeMapping::Single(0x02DC)),
    (0x99, UnicodeMapping::Single(0x2122)),
    (0x9A, UnicodeMapping::Single(0x0161)),
    (0x9B, UnicodeMapping::Single(0x203A)),
    (0x9C, UnicodeMapping::Single(0x0153)),
    (0x9E, UnicodeMapping::Single(0x017E)),
    (0x9F, UnicodeMapping::Single(0x0178)),
    (0xA0, UnicodeMapping::Range { start: 0x00A0, count: 96 }),
];

/// Symbol's built-in encoding, printable ASCII positions
pub static SYMBOL_UNICODE_MAP: &[(u8, UnicodeMapping)] = &[
    (0x20, UnicodeMapping::Range { start: 0x0020, count: 2 }),
    (0x22, UnicodeMapping::Single(0x2200)),
    (0x23, UnicodeMapping::Single(0x0023)),
    (0x24, UnicodeMapping::Single(0x2203)),
    (0x25, UnicodeMapping::Range { start: 0x0025, count: 2 }),
    (0x27, UnicodeMapping::Single(0x220B)),
    (0x28, UnicodeMapping::Range { start: 0x0028, count: 2 }),
    (0x2A, UnicodeMapping::Single(0x2217)),
    (0x2B, UnicodeMapping::Range { start: 0x002B, count: 2 }),
    (0x2D, UnicodeMapping::Single(0x2212)),
    (0x2E, UnicodeMapping::Range { start: 0x002E, count: 18 }),
    (0x40, UnicodeMapping::Single(0x2245)),
    (0x41, UnicodeMapping::Range { start: 0x0391, count: 2 }),
    (0x43, UnicodeMapping::Single(0x03A7)),
    (0x44, UnicodeMapping::Range { start: 0x0394, count: 2 }),
    (0x46, UnicodeMapping::Single(0x03A6)),
    (0x47, UnicodeMapping::Single(0x0393)),
    (0x48, UnicodeMapping::Single(0x0397)),
    (0x49, UnicodeMapping::Single(0x0399)),
    (0x4A, UnicodeMapping::Single(0x03D1)),
    (0x4B, UnicodeMapping::Range { start: 0x039A, count: 4 }),
    (0x4F, UnicodeMapping::Range { start: 0x039F, count: 2 }),
    (0x51, UnicodeMapping::Single(0x0398)),
    (0x52, UnicodeMapping::Single(0x03A1)),
    (0x53, UnicodeMapping::Range { start: 0x03A3, count: 3 }),
    (0x56, UnicodeMapping::Single(0x03C2)),
    (0x57, UnicodeMapping::Single(0x03A9)),
    (0x58, UnicodeMapping::Single(0x039E)),
    (0x59, UnicodeMapping::Single(0x03A8)),
    (0x5A, UnicodeMapping::Single(0x0396)),
    (0x5B, UnicodeMapping::Single(0x005B)),
    (0x5C, UnicodeMapping::Single(0x2234)),
    (0x5D, UnicodeMapping::Single(0x005D)),
    (0x5E, UnicodeMapping::Single(0x22A5)),
    (0x5F, UnicodeMapping::Single(0x005F)),
    (0x60, UnicodeMapping::Single(0xF8E5)),
    (0x61, UnicodeMapping::Range { start: 0x03B1, count: 2 }),
    (0x63, UnicodeMapping::Single(0x03C7)),
    (0x64, UnicodeMapping::Range { start: 0x03B4, count: 2 }),
    (0x66, UnicodeMapping::Single(0x03C6)),
    (0x67, UnicodeMapping::Single(0x03B3)),
    (0x68, UnicodeMapping::Single(0x03B7)),
    (0x69, UnicodeMapping::Single(0x03B9)),
    (0x6A, UnicodeMapping::Single(0x03D5)),
    (0x6B, UnicodeMapping::Range { start: 0x03BA, count: 4 }),
    (0x6F, UnicodeMapping::Range { start: 0x03BF, count: 2 }),
    (0x71, UnicodeMapping::Single(0x03B8)),
    (0x72, UnicodeMapping::Single(0x03C1)),
    (0x73, UnicodeMapping::Range { start: 0x03C3, count: 3 }),
    (0x76, UnicodeMapping::Single(0x03D6)),
    (0x77, UnicodeMapping::Single(0x03C9)),
    (0x78, UnicodeMapping::Single(0x03BE)),
    (0x79, UnicodeMapping::Single(0x03C8)),
    (0x7A, UnicodeMapping::Single(0x03B6)),
    (0x7B, UnicodeMapping::Range { start: 0x007B, count: 3 }),
    (0x7E, UnicodeMapping::Single(0x223C)),
];

/// ZapfDingbats' built-in encoding, printable ASCII positions
pub static ZAPF_DINGBATS_UNICODE_MAP: &[(u8, UnicodeMapping)] = &[
    (0x20, UnicodeMapping::Single(0x0020)),
    (0x21, UnicodeMapping::Range { start: 0x2701, count: 4 }),
    (0x25, UnicodeMapping::Single(0x260E)),
    (0x26, UnicodeMapping::Range { start: 0x2706, count: 4 }),
    (0x2A, UnicodeMapping::Single(0x261B)),
    (0x2B, UnicodeMapping::Single(0x261E)),
    (0x2C, UnicodeMapping::Range { start: 0x270C, count: 28 }),
    (0x48, UnicodeMapping::Single(0x2605)),
    (0x49, UnicodeMapping::Range { start: 0x2729, count: 35 }),
    (0x6C, UnicodeMapping::Single(0x25CF)),
    (0x6D, UnicodeMapping::Single(0x274D)),
    (0x6E, UnicodeMapping::Single(0x25A0)),
    (0x6F, UnicodeMapping::Range { start: 0x274F, count: 4 }),
    (0x73, UnicodeMapping::Single(0x25B2)),
    (0x74, UnicodeMapping::Single(0x25BC)),
    (0x75, UnicodeMapping::Single(0x25C6)),
    (0x76, UnicodeMapping::Single(0x2756)),
    (0x77, UnicodeMapping::Single(0x25D7)),
    (0x78, UnicodeMapping::Range { start: 0x2758, count: 7 }),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCategory {
    /// One of the standard fonts every viewer provides
    Core,
}

impl FontCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontCategory::Core => "Core",
        }
    }
}

/// Everything the document needs to know about a font
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub display_name: String,
    pub category: FontCategory,
    /// Underline position in 1/1000 of the font size, negative below baseline
    pub underline_position: i32,
    pub underline_thickness: i32,
    /// Advance widths per byte code in 1/1000 of the font size
    pub widths: [u16; 256],
    /// `None` for fonts with a built-in encoding
    pub encoding: Option<String>,
    pub unicode_map: Vec<(u8, UnicodeMapping)>,
}

impl FontMetrics {
    pub fn char_width(&self, code: u8) -> u16 {
        self.widths[code as usize]
    }
}

/// Source of font metrics, queried read-only by font key
/// (lowercase family followed by the style letters, e.g. `helveticabi`).
pub trait FontMetricsProvider {
    fn get_font(&self, font_key: &str) -> Option<FontMetrics>;
}

/// Provider backed by the built-in tables of the standard 14 fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreFontMetrics;

impl FontMetricsProvider for CoreFontMetrics {
    fn get_font(&self, font_key: &str) -> Option<FontMetrics> {
        CORE_FONTS.get(font_key).cloned()
    }
}

fn core_font(
    name: &str,
    widths: &[u16; 256],
    encoding: Option<&str>,
    unicode_map: &[(u8, UnicodeMapping)],
) -> FontMetrics {
    FontMetrics {
        display_name: name.to_string(),
        category: FontCategory::Core,
        underline_position: -100,
        underline_thickness: 50,
        widths: *widths,
        encoding: encoding.map(str::to_string),
        unicode_map: unicode_map.to_vec(),
    }
}

lazy_static::lazy_static! {
    static ref CORE_FONTS: HashMap<&'static str, FontMetrics> = {
        let text = |name: &str, widths: &[u16; 256]| {
            core_font(name, widths, Some(CP1252), CP1252_UNICODE_MAP)
        };

        let mut fonts = HashMap::new();
        fonts.insert("courier", text("Courier", &core_widths::COURIER));
        fonts.insert("courierb", text("Courier-Bold", &core_widths::COURIER));
        fonts.insert("courieri", text("Courier-Oblique", &core_widths::COURIER));
        fonts.insert("courierbi", text("Courier-BoldOblique", &core_widths::COURIER));
        fonts.insert("helvetica", text("Helvetica", &core_widths::HELVETICA));
        fonts.insert("helveticab", text("Helvetica-Bold", &core_widths::HELVETICA_BOLD));
        fonts.insert("helveticai", text("Helvetica-Oblique", &core_widths::HELVETICA));
        fonts.insert(
            "helveticabi",
            text("Helvetica-BoldOblique", &core_widths::HELVETICA_BOLD),
        );
        fonts.insert("times", text("Times-Roman", &core_widths::TIMES_ROMAN));
        fonts.insert("timesb", text("Times-Bold", &core_widths::TIMES_BOLD));
        fonts.insert("timesi", text("Times-Italic", &core_widths::TIMES_ITALIC));
        fonts.insert("timesbi", text("Times-BoldItalic", &core_widths::TIMES_BOLD_ITALIC));
        fonts.insert(
            "symbol",
            core_font("Symbol", &core_widths::SYMBOL, None, SYMBOL_UNICODE_MAP),
        );
        fonts.insert(
            "zapfdingbats",
            core_font(
                "ZapfDingbats",
                &core_widths::ZAPF_DINGBATS,
                None,
                ZAPF_DINGBATS_UNICODE_MAP,
            ),
        );
        fonts
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered_codes(map: &[(u8, UnicodeMapping)]) -> usize {
        map.iter().map(|(_, m)| m.code_points().count()).sum()
    }

    #[test]
    fn test_all_core_keys_resolve() {
        let provider = CoreFontMetrics;
        for family in ["courier", "helvetica", "times"] {
            for style in ["", "b", "i", "bi"] {
                let key = format!("{family}{style}");
                let metrics = provider.get_font(&key).expect("core font");
                assert_eq!(metrics.category, FontCategory::Core);
                assert_eq!(metrics.encoding.as_deref(), Some(CP1252));
            }
        }
        assert!(provider.get_font("symbol").unwrap().encoding.is_none());
        assert!(provider.get_font("zapfdingbats").unwrap().encoding.is_none());
        assert!(provider.get_font("symbolb").is_none());
        assert!(provider.get_font("arial").is_none());
    }

    #[test]
    fn test_display_names() {
        let provider = CoreFontMetrics;
        let name = |key: &str| provider.get_font(key).unwrap().display_name;
        assert_eq!(name("helveticai"), "Helvetica-Oblique");
        assert_eq!(name("timesbi"), "Times-BoldItalic");
        assert_eq!(name("courierb"), "Courier-Bold");
        assert_eq!(name("times"), "Times-Roman");
    }

    #[test]
    fn test_known_widths() {
        let provider = CoreFontMetrics;
        let helvetica = provider.get_font("helvetica").unwrap();
        assert_eq!(helvetica.char_width(b' '), 278);
        assert_eq!(helvetica.char_width(b'W'), 944);
        assert_eq!(helvetica.char_width(0x80), 556);

        let times = provider.get_font("times").unwrap();
        assert_eq!(times.char_width(b'H'), 722);
        assert_eq!(times.char_width(b'i'), 278);

        let bold = provider.get_font("helveticab").unwrap();
        assert_eq!(bold.char_width(b'a'), 556);
        assert_eq!(bold.char_width(b'b'), 611);

        let courier = provider.get_font("courierbi").unwrap();
        assert!(courier.widths.iter().all(|w| *w == 600));
    }

    #[test]
    fn test_underline_metrics() {
        let metrics = CoreFontMetrics.get_font("timesb").unwrap();
        assert_eq!(metrics.underline_position, -100);
        assert_eq!(metrics.underline_thickness, 50);
    }

    #[test]
    fn test_unicode_map_coverage() {
        // cp1252 leaves 0x81, 0x8D, 0x8F, 0x90 and 0x9D undefined
        assert_eq!(covered_codes(CP1252_UNICODE_MAP), 251);
        assert_eq!(covered_codes(SYMBOL_UNICODE_MAP), 0x7F - 0x20);
        assert_eq!(covered_codes(ZAPF_DINGBATS_UNICODE_MAP), 0x7F - 0x20);
    }

    #[test]
    fn test_unicode_maps_are_ascending() {
        for map in [CP1252_UNICODE_MAP, SYMBOL_UNICODE_MAP, ZAPF_DINGBATS_UNICODE_MAP] {
            let mut next = 0u32;
            for (code, mapping) in map {
                assert!(*code as u32 >= next, "overlap at {code:#04X}");
                next = *code as u32 + mapping.code_points().count() as u32;
            }
            assert!(next <= 256);
        }
    }
}
