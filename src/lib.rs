//! flashpack - build-time web asset packer for embedded firmware
//!
//! flashpack reads the static web files of an embedded device's UI, gzips
//! each one deterministically, and emits a C header per asset carrying the
//! compressed bytes as a flash-resident array plus a length constant, for
//! firmware that serves the asset straight out of program memory.

pub mod check;
pub mod compress;
pub mod encoder;
pub mod error;
pub mod manifest;
pub mod models;
pub mod render;
pub mod watcher;
pub mod writer;

// Re-exports for convenience
pub use check::{run_check, Check, CheckReport, CheckStatus};
pub use compress::{gzip_compress, gzip_decompress};
pub use encoder::{encode_asset, encode_assets, EncodedAsset};
pub use error::{PackError, PackResult};
pub use manifest::{EncoderOptions, Manifest, ManifestWarning, MANIFEST_FILE};
pub use models::{AssetKind, AssetSpec, HeaderFile, ResolvedAsset, Symbol};
pub use render::{parse_header_bytes, render_header};
pub use watcher::{watch, WatchEvent, WatchOptions};
pub use writer::{
    atomic_write, diff_outputs, hash_content, sync_outputs, DiffStatus, SyncOptions, SyncResult,
};
