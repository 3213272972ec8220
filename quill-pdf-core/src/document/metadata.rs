use std::collections::BTreeMap;
use std::fmt;

/// Entries of the document information dictionary, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataKey {
    Title,
    Author,
    Subject,
    Keywords,
    Creator,
    Producer,
    CreationDate,
}

impl MetadataKey {
    /// Key as written in the info dictionary
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Title => "Title",
            MetadataKey::Author => "Author",
            MetadataKey::Subject => "Subject",
            MetadataKey::Keywords => "Keywords",
            MetadataKey::Creator => "Creator",
            MetadataKey::Producer => "Producer",
            MetadataKey::CreationDate => "CreationDate",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document information entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    entries: BTreeMap<MetadataKey, String>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry, replacing any previous value
    pub fn set(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: MetadataKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: MetadataKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Entries in info dictionary order
    pub fn iter(&self) -> impl Iterator<Item = (MetadataKey, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
