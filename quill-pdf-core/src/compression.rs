//! `/FlateDecode` stream filter.

use crate::error::Result;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Deflate stream data in zlib format, as `/FlateDecode` expects
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate zlib data written by [`compress`]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut inflated = Vec::with_capacity(data.len() * 4);
    ZlibDecoder::new(data).read_to_end(&mut inflated)?;
    Ok(inflated)
}
