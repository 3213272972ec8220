//! Object numbering and the cross-reference table.

use crate::error::{PdfError, Result};
use crate::objects::ObjectId;
use std::collections::BTreeMap;

/// Object number of the pages tree root
pub const PAGES_ROOT: u32 = 1;
/// Object number of the resource dictionary shared by every page
pub const RESOURCES: u32 = 2;

/// Hands out object numbers and remembers where each object starts.
///
/// Numbers 1 and 2 are reserved for the pages root and the resource
/// dictionary, so the first allocated number is 3.
#[derive(Debug, Clone)]
pub struct ObjectAllocator {
    counter: u32,
    offsets: BTreeMap<u32, u64>,
}

impl ObjectAllocator {
    pub fn new() -> Self {
        Self {
            counter: RESOURCES,
            offsets: BTreeMap::new(),
        }
    }

    /// Last allocated (or reserved) object number
    pub fn current(&self) -> u32 {
        self.counter
    }

    pub fn allocate_object_number(&mut self) -> ObjectId {
        self.counter += 1;
        ObjectId::from(self.counter)
    }

    pub fn record_offset(&mut self, id: ObjectId, position: u64) {
        self.offsets.insert(id.number(), position);
    }

    pub fn offset(&self, number: u32) -> Option<u64> {
        self.offsets.get(&number).copied()
    }

    pub fn max_object_number(&self) -> u32 {
        let recorded = self.offsets.keys().next_back().copied().unwrap_or(0);
        recorded.max(self.counter)
    }

    /// The classic xref section: subsection header, free-list head, then one
    /// 20-byte line per object in ascending order.
    pub fn xref_table(&self) -> Result<String> {
        let max = self.max_object_number();
        let mut table = String::with_capacity(32 + 20 * (max as usize + 1));
        table.push_str("xref\n");
        table.push_str(&format!("0 {}\n", max + 1));
        table.push_str("0000000000 65535 f \n");
        for number in 1..=max {
            let offset = self.offset(number).ok_or_else(|| {
                PdfError::InvalidStructure(format!("object {number} was never written"))
            })?;
            table.push_str(&format!("{offset:010} 00000 n \n"));
        }
        Ok(table)
    }
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}
