//! ToUnicode CMap generation for single-byte fonts.

/// PDF caps each bfrange/bfchar block at 100 entries
const MAX_BLOCK_ENTRIES: usize = 100;

/// Unicode target of a byte code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeMapping {
    /// One byte maps to one code point
    Single(u32),
    /// `count` consecutive bytes map to consecutive code points from `start`
    Range { start: u32, count: u32 },
}

impl UnicodeMapping {
    pub fn code_points(&self) -> impl Iterator<Item = u32> {
        let (start, count) = match *self {
            UnicodeMapping::Single(cp) => (cp, 1),
            UnicodeMapping::Range { start, count } => (start, count),
        };
        start..start.saturating_add(count)
    }
}

/// Build the ToUnicode CMap stream text for a code-to-Unicode table.
///
/// Ranges go to `beginbfrange`, singles to `beginbfchar`; each block keeps
/// the order of `mapping`. More than 100 runs of one kind are split over
/// several blocks, each counting only its own entries.
///
/// A range running past byte 0xFF is cut at 0xFF so every source code stays
/// inside the `<00> <FF>` codespace.
pub fn to_unicode_cmap(mapping: &[(u8, UnicodeMapping)]) -> String {
    let mut ranges = Vec::new();
    let mut chars = Vec::new();
    for (code, target) in mapping {
        match *target {
            UnicodeMapping::Range { start, count } => {
                if count == 0 {
                    continue;
                }
                let last = u32::from(*code).saturating_add(count - 1).min(0xFF);
                ranges.push(format!("<{code:02X}> <{last:02X}> <{start:04X}>"));
            }
            UnicodeMapping::Single(unicode) => {
                chars.push(format!("<{code:02X}> <{unicode:04X}>"));
            }
        }
    }

    let mut cmap = String::new();
    cmap.push_str("/CIDInit /ProcSet findresource begin\n");
    cmap.push_str("12 dict begin\n");
    cmap.push_str("begincmap\n");
    cmap.push_str("/CIDSystemInfo\n");
    cmap.push_str("<</Registry (Adobe)\n");
    cmap.push_str("/Ordering (UCS)\n");
    cmap.push_str("/Supplement 0\n");
    cmap.push_str(">> def\n");
    cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
    cmap.push_str("/CMapType 2 def\n");
    cmap.push_str("1 begincodespacerange\n");
    cmap.push_str("<00> <FF>\n");
    cmap.push_str("endcodespacerange\n");
    write_blocks(&mut cmap, &ranges, "bfrange");
    write_blocks(&mut cmap, &chars, "bfchar");
    cmap.push_str("endcmap\n");
    cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
    cmap.push_str("end\n");
    cmap.push_str("end");
    cmap
}

fn write_blocks(out: &mut String, lines: &[String], kind: &str) {
    for chunk in lines.chunks(MAX_BLOCK_ENTRIES) {
        out.push_str(&format!("{} begin{kind}\n", chunk.len()));
        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("end{kind}\n"));
    }
}
