//! Manifest loading for flashpack
//!
//! The manifest (`flashpack.toml`) generalizes the original hardcoded asset
//! list. When the file is absent, `Manifest::default()` supplies the built-in
//! list so a bare invocation still packs the standard web UI files.
//!
//! Unknown keys are surfaced as warnings rather than errors.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackResult};
use crate::models::{AssetSpec, ResolvedAsset};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "flashpack.toml";

/// Formatting options for generated headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderOptions {
    /// Storage-placement attribute appended to the array declaration.
    /// Empty string omits it entirely.
    #[serde(default = "default_storage_attr")]
    pub storage_attr: String,

    /// Include lines emitted after `#pragma once`, verbatim (`<...>` or `"..."`)
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,

    /// Byte literals per row
    #[serde(default = "default_bytes_per_row")]
    pub bytes_per_row: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            storage_attr: default_storage_attr(),
            includes: default_includes(),
            bytes_per_row: default_bytes_per_row(),
        }
    }
}

fn default_storage_attr() -> String {
    "PROGMEM".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["<Arduino.h>".to_string()]
}

fn default_bytes_per_row() -> usize {
    12
}

/// Non-fatal manifest warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    /// Dotted path of the unknown key
    pub key: String,
    /// Manifest file the key was found in
    pub file: PathBuf,
}

impl std::fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())
    }
}

/// The flashpack manifest: encoder options plus the asset list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Header formatting options
    #[serde(default)]
    pub encoder: EncoderOptions,

    /// Assets to pack, in emission order
    #[serde(default, rename = "asset")]
    pub assets: Vec<AssetSpec>,
}

impl Default for Manifest {
    /// The built-in asset list: the standard web UI files
    fn default() -> Self {
        Self {
            encoder: EncoderOptions::default(),
            assets: vec![
                AssetSpec::new("index.html"),
                AssetSpec::new("app.js"),
                AssetSpec::new("style.css"),
                AssetSpec::new("login.html"),
            ],
        }
    }
}

impl Manifest {
    /// Load a manifest, collecting non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> PackResult<(Self, Vec<ManifestWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let manifest: Manifest = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| PackError::InvalidManifest {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ManifestWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((manifest, warnings))
    }

    /// Load a manifest, or fall back to the built-in defaults when the file
    /// does not exist
    pub fn load_or_default(path: &Path) -> PackResult<(Self, Vec<ManifestWarning>)> {
        if path.exists() {
            Self::load_with_warnings(path)
        } else {
            Ok((Self::default(), Vec::new()))
        }
    }

    /// Resolve every asset, validating symbols and rejecting duplicates
    pub fn resolve_assets(&self) -> PackResult<Vec<ResolvedAsset>> {
        let mut resolved = Vec::with_capacity(self.assets.len());
        for spec in &self.assets {
            resolved.push(spec.resolve()?);
        }

        for (i, asset) in resolved.iter().enumerate() {
            for other in &resolved[i + 1..] {
                if asset.symbol == other.symbol {
                    return Err(PackError::DuplicateSymbol {
                        symbol: asset.symbol.as_str().to_string(),
                    });
                }
                if asset.output == other.output {
                    return Err(PackError::DuplicateOutput {
                        path: asset.output.clone(),
                    });
                }
            }
        }

        Ok(resolved)
    }

    /// Starter manifest written by `flashpack init`
    pub fn starter_toml() -> &'static str {
        r#"# flashpack manifest
#
# Each [[asset]] entry maps a static web file to a generated C header.
# `output` defaults to `<source>.gz.h`; `symbol` is derived from the
# source file name (index.html -> index_html_gz).

[encoder]
storage_attr = "PROGMEM"
includes = ["<Arduino.h>"]
bytes_per_row = 12

[[asset]]
source = "index.html"

[[asset]]
source = "app.js"

[[asset]]
source = "style.css"

[[asset]]
source = "login.html"
"#
    }
}
