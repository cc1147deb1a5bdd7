//! Deterministic gzip compression
//!
//! Repeated runs on unchanged input must produce byte-identical headers, so
//! the gzip mtime field is forced to zero and the level is a fixed constant.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};

use crate::error::PackResult;

/// First two bytes of every gzip stream
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compress with gzip at maximum level, mtime zeroed
pub fn gzip_compress(data: &[u8]) -> PackResult<Vec<u8>> {
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip stream (round-trip verification)
pub fn gzip_decompress(data: &[u8]) -> PackResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
