use crate::error::Result;
use crate::objects::{Dictionary, Object};

/// A stream object body. `Length` is kept in sync with the data.
#[derive(Debug, Clone)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_dictionary(Dictionary::new(), data)
    }

    pub fn with_dictionary(dictionary: Dictionary, data: Vec<u8>) -> Self {
        let mut dictionary = dictionary;
        dictionary.set("Length", data.len());
        Self { dictionary, data }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the data with its zlib encoding and declare `/FlateDecode`.
    #[cfg(feature = "compression")]
    pub fn compress_flate(&mut self) -> Result<()> {
        self.data = crate::compression::compress(&self.data)?;
        // Filter goes ahead of Length in the serialized dictionary
        let mut dictionary = Dictionary::new();
        dictionary.set("Filter", Object::name("FlateDecode"));
        for (key, value) in self.dictionary.entries() {
            if key != "Length" && key != "Filter" {
                dictionary.set(key.clone(), value.clone());
            }
        }
        dictionary.set("Length", self.data.len());
        self.dictionary = dictionary;
        Ok(())
    }

    #[cfg(not(feature = "compression"))]
    pub fn compress_flate(&mut self) -> Result<()> {
        tracing::warn!("flate compression requested but the compression feature is disabled");
        Ok(())
    }

    pub fn into_object(self) -> Object {
        Object::Stream(self.dictionary, self.data)
    }
}
