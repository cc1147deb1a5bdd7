//! Asset encode pipeline
//!
//! Turns manifest entries into rendered headers: read bytes, gzip, render.
//! Every asset is encoded before anything is written, so a missing source
//! aborts the run with no output file touched.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::compress::gzip_compress;
use crate::error::{PackError, PackResult};
use crate::manifest::{EncoderOptions, Manifest};
use crate::models::{HeaderFile, ResolvedAsset};
use crate::render::render_header;

/// One encoded asset: the resolved entry plus its rendered header
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAsset {
    /// The manifest entry this came from
    pub asset: ResolvedAsset,
    /// Size of the source file in bytes
    pub raw_len: usize,
    /// Size of the gzip payload in bytes
    pub compressed_len: usize,
    /// Rendered header, ready to sync
    pub header: HeaderFile,
}

/// Encode a single resolved asset
pub fn encode_asset(
    asset: &ResolvedAsset,
    root: &Path,
    opts: &EncoderOptions,
) -> PackResult<EncodedAsset> {
    let source_path = root.join(&asset.source);
    let raw = fs::read(&source_path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            PackError::SourceNotFound {
                path: asset.source.clone(),
            }
        } else {
            PackError::Io(e)
        }
    })?;

    let compressed = gzip_compress(&raw)?;
    let content = render_header(&asset.symbol, &compressed, opts);

    Ok(EncodedAsset {
        asset: asset.clone(),
        raw_len: raw.len(),
        compressed_len: compressed.len(),
        header: HeaderFile::new(asset.output.clone(), content),
    })
}

/// Encode every asset in the manifest, in manifest order
pub fn encode_assets(manifest: &Manifest, root: &Path) -> PackResult<Vec<EncodedAsset>> {
    let resolved = manifest.resolve_assets()?;
    let mut encoded = Vec::with_capacity(resolved.len());
    for asset in &resolved {
        encoded.push(encode_asset(asset, root, &manifest.encoder)?);
    }
    Ok(encoded)
}
