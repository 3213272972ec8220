use crate::fonts::UnicodeMapping;
use std::collections::HashMap;

/// Byte substituted for characters the font encoding cannot represent
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Single-byte text encoding derived from a font's code-to-Unicode table.
///
/// Text fonts use the cp1252 table, so this is WinAnsi encoding for them.
/// Fonts with a built-in encoding (Symbol, ZapfDingbats) additionally accept
/// raw code points below 256, which are passed through as byte codes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEncoding {
    to_byte: HashMap<char, u8>,
    to_char: HashMap<u8, char>,
    builtin: bool,
}

impl TextEncoding {
    pub fn from_mapping(mapping: &[(u8, UnicodeMapping)], builtin: bool) -> Self {
        let mut to_byte = HashMap::new();
        let mut to_char = HashMap::new();
        for (code, target) in mapping {
            let bytes = u32::from(*code)..=0xFF;
            for (byte, unicode) in bytes.zip(target.code_points()) {
                let byte = byte as u8;
                if let Some(ch) = char::from_u32(unicode) {
                    to_byte.entry(ch).or_insert(byte);
                    to_char.insert(byte, ch);
                }
            }
        }
        Self {
            to_byte,
            to_char,
            builtin,
        }
    }

    pub fn encode_char(&self, ch: char) -> Option<u8> {
        if let Some(byte) = self.to_byte.get(&ch) {
            return Some(*byte);
        }
        if self.builtin && (ch as u32) < 256 {
            return Some(ch as u8);
        }
        None
    }

    /// Encode text, replacing unmappable characters with `?`
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| self.encode_char(ch).unwrap_or(REPLACEMENT_BYTE))
            .collect()
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| self.to_char.get(b).copied().unwrap_or(*b as char))
            .collect()
    }
}
